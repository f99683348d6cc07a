use crate::UrlError;
use url::Url;

/// Placeholder substituted with the page number in the search URL template
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Expands the search URL template for one page
///
/// # Examples
///
/// ```
/// use laptop_scout::url::page_url;
///
/// let url = page_url("https://shop.example.com/search?q=laptop&page={page}", 3).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/search?q=laptop&page=3");
/// ```
pub fn page_url(template: &str, page: u32) -> Result<Url, UrlError> {
    if !template.contains(PAGE_PLACEHOLDER) {
        return Err(UrlError::MissingPlaceholder(template.to_string()));
    }

    let expanded = template.replace(PAGE_PLACEHOLDER, &page.to_string());
    let url = Url::parse(&expanded).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    Ok(url)
}
