//! Loading `SearchConfig` from the environment

use crate::{Error, Result, SearchConfig};

/// API key for the search endpoint
pub const ENV_API_KEY: &str = "PIXABAY_API_KEY";
/// Overrides `SearchConfig::endpoint`
pub const ENV_ENDPOINT: &str = "PIXGALLERY_ENDPOINT";
/// Overrides `SearchConfig::per_page`
pub const ENV_PER_PAGE: &str = "PIXGALLERY_PER_PAGE";
/// Overrides `SearchConfig::timeout_ms`
pub const ENV_TIMEOUT_MS: &str = "PIXGALLERY_TIMEOUT_MS";

/// Build a config from the defaults overlaid with process environment variables.
pub fn from_env() -> Result<SearchConfig> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Same as [`from_env`] but reads variables through `lookup`.
///
/// Blank values are treated as unset. The result is validated.
pub fn from_lookup<F>(lookup: F) -> Result<SearchConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut config = SearchConfig::default();

    if let Some(key) = get(ENV_API_KEY) {
        config.api_key = key.trim().to_string();
    }
    if let Some(endpoint) = get(ENV_ENDPOINT) {
        config.endpoint = endpoint.trim().to_string();
    }
    if let Some(per_page) = get(ENV_PER_PAGE) {
        config.per_page = parse_number(ENV_PER_PAGE, &per_page)?;
    }
    if let Some(timeout) = get(ENV_TIMEOUT_MS) {
        config.timeout_ms = parse_number(ENV_TIMEOUT_MS, &timeout)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::ConfigError(format!("{} is not a valid number: {:?}", name, raw)))
}
