use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Connection settings for the storefront search endpoint
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the storefront API
    pub base_url: Url,
    /// Path of the product search endpoint, joined onto `base_url`
    pub products_path: String,
    /// Per-request timeout for the HTTP client
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:3000").expect("static default URL is valid"),
            products_path: "/api/ms/products".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("storefront-search/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SearchConfig {
    /// Build a config from the environment, falling back to defaults
    ///
    /// Reads `STOREFRONT_API_URL`, `STOREFRONT_SEARCH_PATH` and `STOREFRONT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("STOREFRONT_API_URL") {
            config.base_url = Url::parse(&raw)
                .with_context(|| format!("STOREFRONT_API_URL is not a valid URL: {}", raw))?;
        }

        if let Some(path) = lookup("STOREFRONT_SEARCH_PATH") {
            config.products_path = path;
        }

        if let Some(raw) = lookup("STOREFRONT_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("STOREFRONT_TIMEOUT_SECS is not a number: {}", raw))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
