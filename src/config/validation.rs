use crate::config::types::{
    CacheConfig, Config, FilterConfig, OutputConfig, SelectorConfig, SiteConfig,
};
use crate::url::page_url;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_cache_config(&config.cache)?;
    validate_filter_config(&config.filter)?;
    validate_output_config(&config.output)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use HTTP or HTTPS, got '{}'",
            config.base_url
        )));
    }

    // Page 1 stands in for every page; the template either expands or it doesn't
    page_url(&config.search_url, 1)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_url: {}", e)))?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "cache directory cannot be empty".to_string(),
        ));
    }

    if config.freshness_minutes < 1 {
        return Err(ConfigError::Validation(format!(
            "freshness_minutes must be >= 1, got {}",
            config.freshness_minutes
        )));
    }

    Ok(())
}

/// Validates filter configuration
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    if !config.max_price.is_finite() || config.max_price < 0.0 {
        return Err(ConfigError::Validation(format!(
            "max_price must be a finite number >= 0, got {}",
            config.max_price
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every listing selector parses
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [&config.card, &config.title, &config.specs, &config.price] {
        validate_selector(selector)?;
    }
    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_site() -> SiteConfig {
        SiteConfig {
            base_url: "https://shop.example.com/".to_string(),
            search_url: "https://shop.example.com/search?q=laptop&page={page}".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn test_validate_site_config() {
        assert!(validate_site_config(&valid_site()).is_ok());

        let mut site = valid_site();
        site.base_url = "not a url".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        let mut site = valid_site();
        site.base_url = "ftp://shop.example.com/".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = valid_site();
        site.search_url = "https://shop.example.com/search?page=1".to_string();
        assert!(validate_site_config(&site).is_err());

        let mut site = valid_site();
        site.user_agent = "  ".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_filter_config() {
        assert!(validate_filter_config(&FilterConfig::default()).is_ok());

        let mut filter = FilterConfig::default();
        filter.max_price = 0.0;
        assert!(validate_filter_config(&filter).is_ok());

        filter.max_price = -1.0;
        assert!(validate_filter_config(&filter).is_err());

        filter.max_price = f64::NAN;
        assert!(validate_filter_config(&filter).is_err());

        filter.max_price = f64::INFINITY;
        assert!(validate_filter_config(&filter).is_err());
    }

    #[test]
    fn test_validate_cache_config() {
        assert!(validate_cache_config(&CacheConfig::default()).is_ok());

        let mut cache = CacheConfig::default();
        cache.freshness_minutes = 0;
        assert!(validate_cache_config(&cache).is_err());

        let mut cache = CacheConfig::default();
        cache.directory = String::new();
        assert!(validate_cache_config(&cache).is_err());
    }

    #[test]
    fn test_validate_selectors() {
        assert!(validate_selectors(&SelectorConfig::default()).is_ok());

        let mut selectors = SelectorConfig::default();
        selectors.price = "a[".to_string();
        assert!(matches!(
            validate_selectors(&selectors),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }
}
