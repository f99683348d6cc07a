//! Whitespace cleanup for scraped text

/// Joins text fragments into one clean field value
///
/// Each fragment is trimmed, empty fragments are dropped, and the rest are
/// joined with a single space. Non-breaking spaces become regular spaces.
pub fn clean_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    clean_text(&joined)
}

/// Replaces non-breaking spaces and trims surrounding whitespace
fn clean_text(text: &str) -> String {
    text.replace(['\u{a0}', '\u{202f}'], " ").trim().to_string()
}
