//! Listing page parser
//!
//! This module turns one search results page into candidate records:
//! - Every listing card is located with the card selector
//! - Each card is parsed on its own; a broken card becomes a `CardError`
//!   and never takes the rest of the page down with it
//! - Text fields are whitespace-normalized as they are read

use crate::config::SelectorConfig;
use crate::model::CandidateRecord;
use crate::normalize::clean_fragments;
use crate::url::resolve_link;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Number of leading spec entries a card must have: screen, resolution,
/// OS, CPU, GPU, RAM, storage
pub const REQUIRED_SPECS: usize = 7;

/// Reasons a single listing card could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card has no product title")]
    MissingTitle,

    #[error("title link has no usable href")]
    MissingLink,

    #[error("expected at least 7 spec entries, found {found}")]
    TooFewSpecs { found: usize },

    #[error("card has no price element")]
    MissingPrice,
}

/// Compiled CSS selectors for the listing markup
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    card: Selector,
    title: Selector,
    specs: Selector,
    price: Selector,
}

impl ListingSelectors {
    /// Compiles the configured selectors
    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            card: compile(&config.card)?,
            title: compile(&config.title)?,
            specs: compile(&config.specs)?,
            price: compile(&config.price)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Everything extracted from one search results page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Number of listing cards found on the page
    pub card_count: usize,

    /// Cards that parsed, in document order
    pub candidates: Vec<CandidateRecord>,

    /// Cards that did not parse, with their 1-based position on the page
    pub dropped: Vec<(usize, CardError)>,
}

impl ListingPage {
    /// True if the page held no listing cards at all
    ///
    /// An empty page ends pagination just like a home-page redirect does.
    pub fn is_empty(&self) -> bool {
        self.card_count == 0
    }
}

/// Extracts candidate records from a search results page
///
/// # Arguments
///
/// * `html` - Raw page HTML
/// * `base_url` - Site base URL that relative product links resolve against
/// * `selectors` - Compiled listing selectors
///
/// # Example
///
/// ```
/// use laptop_scout::config::SelectorConfig;
/// use laptop_scout::crawler::{extract_cards, ListingSelectors};
/// use url::Url;
///
/// let selectors = ListingSelectors::from_config(&SelectorConfig::default()).unwrap();
/// let base = Url::parse("https://shop.example.com/").unwrap();
/// let page = extract_cards("<html><body><p>Nothing here</p></body></html>", &base, &selectors);
/// assert!(page.is_empty());
/// ```
pub fn extract_cards(html: &str, base_url: &Url, selectors: &ListingSelectors) -> ListingPage {
    let document = Html::parse_document(html);
    let mut page = ListingPage::default();

    for (index, card) in document.select(&selectors.card).enumerate() {
        page.card_count += 1;
        let position = index + 1;

        match parse_card(card, base_url, selectors) {
            Ok(candidate) => page.candidates.push(candidate),
            Err(e) => {
                tracing::warn!("Skipping unparseable product card #{}: {}", position, e);
                page.dropped.push((position, e));
            }
        }
    }

    page
}

/// Parses one listing card into a candidate record
pub fn parse_card(
    card: ElementRef<'_>,
    base_url: &Url,
    selectors: &ListingSelectors,
) -> Result<CandidateRecord, CardError> {
    let title = card
        .select(&selectors.title)
        .next()
        .ok_or(CardError::MissingTitle)?;

    let name = extract_name(title).ok_or(CardError::MissingTitle)?;

    let link = title
        .value()
        .attr("href")
        .and_then(|href| resolve_link(href, base_url))
        .ok_or(CardError::MissingLink)?;

    let specs: Vec<String> = card
        .select(&selectors.specs)
        .map(|li| clean_fragments(li.text()))
        .collect();

    if specs.len() < REQUIRED_SPECS {
        return Err(CardError::TooFewSpecs { found: specs.len() });
    }

    let price_text = card
        .select(&selectors.price)
        .next()
        .map(|element| clean_fragments(element.text()))
        .ok_or(CardError::MissingPrice)?;

    let mut specs = specs.into_iter();
    let mut next_spec = || specs.next().unwrap_or_default();

    Ok(CandidateRecord {
        name,
        link,
        screen: next_spec(),
        resolution: next_spec(),
        os: next_spec(),
        cpu: next_spec(),
        gpu: next_spec(),
        ram: next_spec(),
        storage: next_spec(),
        price_text,
    })
}

/// Product name from the title link: its `title` attribute, else its text
fn extract_name(title: ElementRef<'_>) -> Option<String> {
    let from_attr = title
        .value()
        .attr("title")
        .map(|t| clean_fragments([t]))
        .filter(|t| !t.is_empty());

    from_attr.or_else(|| {
        let text = clean_fragments(title.text());
        (!text.is_empty()).then_some(text)
    })
}
