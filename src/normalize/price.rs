//! Locale-tolerant price parsing
//!
//! Listing prices arrive as display text: euro formatting (`1.299,00 €`),
//! trailing dashes (`999,-`), and currency glyphs that were decoded with the
//! wrong charset somewhere between the shop and us (`999,00 â‚¬`).

use thiserror::Error;

/// Fragments removed from price text before parsing
///
/// Longer mojibake sequences come first so their pieces are not left behind.
const STRIP_TABLE: &[&str] = &[
    // € (E2 82 AC) decoded as Windows-1252, then encoded and decoded again
    "Ã¢â€šÂ¬",
    // € decoded as Windows-1252
    "â‚¬",
    // same, with the final byte dropped
    "â‚",
    // NBSP (C2 A0) decoded as Windows-1252 leaves a stray Â
    "Â",
    "€",
    "EUR",
    "$",
    "£",
    "\u{a0}",
    "\u{202f}",
];

/// Errors produced while parsing price text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("no digits in price text '{raw}'")]
    Empty { raw: String },

    #[error("price text '{raw}' is not a number (cleaned to '{cleaned}')")]
    NotANumber { raw: String, cleaned: String },

    #[error("price text '{raw}' is negative")]
    Negative { raw: String },
}

/// Parses displayed price text into a number
///
/// # Steps
///
/// 1. Remove currency symbols, known mojibake and all whitespace
/// 2. Drop a trailing `-` (as in `999,-`); a separator left dangling is the
///    decimal mark, so any other separator is a thousands mark
/// 3. Otherwise resolve separators:
///    - both `,` and `.`: the right-most one is the decimal point
///    - `,` only: decimal comma, unless it repeats (then thousands)
///    - `.` only: decimal point, unless it repeats (then thousands)
/// 4. Parse as `f64`; non-finite and negative values are errors
///
/// # Examples
///
/// ```
/// use laptop_scout::normalize::parse_price;
///
/// assert_eq!(parse_price("999,00 €").unwrap(), 999.0);
/// assert_eq!(parse_price("1.299,90 â‚¬").unwrap(), 1299.9);
/// assert!(parse_price("Sold out").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<f64, PriceError> {
    let mut cleaned = raw.to_string();
    for fragment in STRIP_TABLE {
        cleaned = cleaned.replace(fragment, "");
    }
    cleaned.retain(|c| !c.is_whitespace());

    let cleaned = cleaned.trim_end_matches(['-', '\u{2013}']);

    // A dangling separator (`1.299,-`) is the decimal mark with no cents,
    // so every other separator is a thousands mark
    let (digits, whole_units) = match cleaned.strip_suffix([',', '.']) {
        Some(rest) => (rest, true),
        None => (cleaned, false),
    };

    if digits.is_empty() {
        return Err(PriceError::Empty {
            raw: raw.to_string(),
        });
    }

    let normalized = if whole_units {
        digits.replace([',', '.'], "")
    } else {
        resolve_separators(digits)
    };

    let value: f64 = normalized.parse().map_err(|_| PriceError::NotANumber {
        raw: raw.to_string(),
        cleaned: normalized.clone(),
    })?;

    if !value.is_finite() {
        return Err(PriceError::NotANumber {
            raw: raw.to_string(),
            cleaned: normalized,
        });
    }

    if value < 0.0 {
        return Err(PriceError::Negative {
            raw: raw.to_string(),
        });
    }

    Ok(value)
}

/// Rewrites thousands and decimal separators into plain `1234.56` form
fn resolve_separators(text: &str) -> String {
    match (text.rfind(','), text.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => text.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => text.replace(',', ""),
        (Some(_), None) if text.matches(',').count() > 1 => text.replace(',', ""),
        (Some(_), None) => text.replace(',', "."),
        (None, Some(_)) if text.matches('.').count() > 1 => text.replace('.', ""),
        _ => text.to_string(),
    }
}
