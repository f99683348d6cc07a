//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent
//! - GET requests for one search results page
//! - Recognising the home-page redirect that ends pagination
//! - Serving pages from the page cache while they are fresh
//!
//! There is no retry: a failed request ends the run.

use crate::cache::{Clock, FsPageStore, PageCache, PageStore, SystemClock};
use crate::config::SiteConfig;
use crate::url::{is_home_page, page_url};
use crate::{Result, ScoutError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a network fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The search page came back
    Page {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The request was redirected to the site's home page
    RedirectedHome {
        /// The home page URL the request ended on
        final_url: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use laptop_scout::config::SiteConfig;
/// use laptop_scout::crawler::build_http_client;
///
/// let site = SiteConfig {
///     base_url: "https://shop.example.com/".to_string(),
///     search_url: "https://shop.example.com/search?page={page}".to_string(),
///     user_agent: "Mozilla/5.0".to_string(),
///     request_timeout_secs: 30,
/// };
///
/// let client = build_http_client(&site).unwrap();
/// ```
pub fn build_http_client(config: &SiteConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one search results page from the network
///
/// Redirects are followed. If the final URL is the site's base URL the shop
/// sent us home because the page is out of range, which is reported as
/// `RedirectedHome` rather than an error.
///
/// # Errors
///
/// * `ScoutError::Http` - The request itself failed (connection, timeout, body)
/// * `ScoutError::HttpStatus` - The server answered with a non-success status
pub async fn fetch_url(client: &Client, url: &Url, base_url: &Url) -> Result<FetchResult> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ScoutError::Http {
            url: url.to_string(),
            source,
        })?;

    let final_url = response.url().clone();

    if is_home_page(&final_url, base_url) {
        return Ok(FetchResult::RedirectedHome {
            final_url: final_url.to_string(),
        });
    }

    let status = response.status();
    if !status.is_success() {
        return Err(ScoutError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // reqwest decodes using the charset from Content-Type, defaulting to UTF-8
    let body = response.text().await.map_err(|source| ScoutError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchResult::Page {
        final_url: final_url.to_string(),
        body,
    })
}

/// A page as handed to the extractor
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Page HTML, and whether it came from the cache
    Page { html: String, from_cache: bool },

    /// The search page redirected home; pagination is over
    RedirectedHome,
}

/// Search pages from the cache when fresh, from the network otherwise
pub struct PageSource<S = FsPageStore, C = SystemClock> {
    client: Client,
    search_url: String,
    base_url: Url,
    cache: PageCache<S, C>,
}

impl PageSource<FsPageStore, SystemClock> {
    /// Builds the HTTP client and opens the on-disk cache from configuration
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let client = build_http_client(&config.site)?;
        let cache = PageCache::from_config(&config.cache)?;
        Self::new(client, &config.site, cache)
    }
}

impl<S: PageStore, C: Clock> PageSource<S, C> {
    pub fn new(client: Client, site: &SiteConfig, cache: PageCache<S, C>) -> Result<Self> {
        let base_url = Url::parse(&site.base_url)?;
        // Fail early on a bad template rather than at page 1
        page_url(&site.search_url, 1)?;

        Ok(Self {
            client,
            search_url: site.search_url.clone(),
            base_url,
            cache,
        })
    }

    /// Returns the page HTML, or the termination signal
    ///
    /// # Flow
    ///
    /// 1. Fresh cached copy → returned without touching the network
    /// 2. Otherwise the page is downloaded
    ///    - home-page redirect → `Fetched::RedirectedHome` (nothing cached)
    ///    - page → written to the cache, then returned
    pub async fn get_or_fetch(&mut self, page: u32) -> Result<Fetched> {
        if let Some(html) = self.cache.lookup_fresh(page)? {
            tracing::info!("Using cached HTML for page {}", page);
            return Ok(Fetched::Page {
                html,
                from_cache: true,
            });
        }

        let url = page_url(&self.search_url, page)?;
        tracing::info!("Downloading page {} ({})", page, url);

        match fetch_url(&self.client, &url, &self.base_url).await? {
            FetchResult::RedirectedHome { final_url } => {
                tracing::debug!("Page {} redirected to {}", page, final_url);
                Ok(Fetched::RedirectedHome)
            }
            FetchResult::Page { body, .. } => {
                self.cache.store(page, &body)?;
                Ok(Fetched::Page {
                    html: body,
                    from_cache: false,
                })
            }
        }
    }

    pub fn cache(&self) -> &PageCache<S, C> {
        &self.cache
    }
}
