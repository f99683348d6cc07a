use serde::Deserialize;

/// Main configuration structure for Laptop-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Home page of the site; a search request that lands here means
    /// there are no more pages
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Search results URL with a `{page}` placeholder for the page number
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// On-disk page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one `page_<N>.html` file per fetched page
    #[serde(default = "default_cache_directory")]
    pub directory: String,

    /// Maximum age of a cached page before it is refetched (minutes)
    #[serde(rename = "freshness-minutes", default = "default_freshness_minutes")]
    pub freshness_minutes: u64,
}

/// Inclusion criteria for listings
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Substring the GPU field must contain; empty disables the check
    #[serde(rename = "target-gpu", default)]
    pub target_gpu: String,

    /// Substring the CPU field must contain; empty disables the check
    #[serde(rename = "target-cpu", default)]
    pub target_cpu: String,

    /// Inclusive upper bound on the price
    #[serde(rename = "max-price", default = "default_max_price")]
    pub max_price: f64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file records are appended to
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Append each page's matches as soon as the page is done instead of
    /// once at the end of the run
    #[serde(rename = "flush-each-page", default)]
    pub flush_each_page: bool,
}

/// CSS selectors describing the listing markup
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_card_selector")]
    pub card: String,

    #[serde(default = "default_title_selector")]
    pub title: String,

    #[serde(default = "default_specs_selector")]
    pub specs: String,

    #[serde(default = "default_price_selector")]
    pub price: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_directory(),
            freshness_minutes: default_freshness_minutes(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            target_gpu: String::new(),
            target_cpu: String::new(),
            max_price: default_max_price(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            flush_each_page: false,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: default_card_selector(),
            title: default_title_selector(),
            specs: default_specs_selector(),
            price: default_price_selector(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_directory() -> String {
    "cache".to_string()
}

fn default_freshness_minutes() -> u64 {
    60
}

fn default_max_price() -> f64 {
    1000.0
}

fn default_csv_path() -> String {
    "laptops.csv".to_string()
}

fn default_card_selector() -> String {
    "div.card.product".to_string()
}

fn default_title_selector() -> String {
    "div.p-y-10 h3 a".to_string()
}

fn default_specs_selector() -> String {
    "ul.specs li".to_string()
}

fn default_price_selector() -> String {
    "a.btn-success.price".to_string()
}
