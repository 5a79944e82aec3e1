use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig, SelectorConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_selector_config(&config.selectors)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.seed_page_url).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid seed_page_url '{}': {}",
            config.seed_page_url, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed_page_url must use HTTP or HTTPS, got '{}'",
            config.seed_page_url
        )));
    }

    if config.max_concurrent_pages_open < 1 || config.max_concurrent_pages_open > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages_open must be between 1 and 100, got {}",
            config.max_concurrent_pages_open
        )));
    }

    if config.ready_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "ready_timeout_ms must be >= 100ms, got {}ms",
            config.ready_timeout_ms
        )));
    }

    let suffix = &config.detail_path_suffix;
    if suffix.len() < 2 || !suffix.starts_with('/') || !suffix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "detail_path_suffix must start and end with '/', got '{}'",
            suffix
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_ms must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every selector parses as CSS
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("listing_item", &config.listing_item),
        ("listing_link", &config.listing_link),
        ("cast_row", &config.cast_row),
        ("role_marker", &config.role_marker),
        ("name_cell", &config.name_cell),
        ("profile_link", &config.profile_link),
    ] {
        validate_selector(name, selector)?;
    }

    if config.sentinel.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sentinel cannot be empty".to_string(),
        ));
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

fn validate_selector(name: &str, selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(format!(
            "{} cannot be empty",
            name
        )));
    }

    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("{} '{}': {}", name, selector, e)))
}
