use crate::UrlError;
use url::Url;

/// Normalizes a URL for comparison
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Normalize path:
///    - Remove dot segments (. and ..)
///    - Collapse repeated slashes
///    - Remove trailing slash (the root path stays `/`)
/// 4. Remove fragment (everything after #)
///
/// Host lowercasing and default-port removal are already done by the
/// `url` crate when parsing.
///
/// # Examples
///
/// ```
/// use laptop_scout::url::normalize_url;
///
/// let url = normalize_url("https://Shop.Example.com/laptops/#top").unwrap();
/// assert_eq!(url.as_str(), "https://shop.example.com/laptops");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);
    url.set_fragment(None);

    Ok(url)
}

/// Returns true if `final_url` is the site's home page
///
/// A search request that ends up here was redirected away from an
/// out-of-range page, which is how the site says there are no more results.
/// Trailing slashes are ignored on both sides.
pub fn is_home_page(final_url: &Url, base_url: &Url) -> bool {
    match (
        normalize_parsed(final_url.clone()),
        normalize_parsed(base_url.clone()),
    ) {
        (Ok(a), Ok(b)) => a.as_str().trim_end_matches('/') == b.as_str().trim_end_matches('/'),
        _ => false,
    }
}

/// Resolves a link href against the base URL
///
/// Returns None for empty hrefs, non-navigational schemes and anything that
/// does not resolve to an HTTP(S) URL.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    format!("/{}", segments.join("/"))
}
