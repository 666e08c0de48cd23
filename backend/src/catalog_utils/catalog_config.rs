use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_CATALOG_API_URL: &str = "http://127.0.0.1:8000/graphql/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub cache_enabled: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CATALOG_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_enabled: true,
        }
    }
}

impl CatalogConfig {
    /// Read `CATALOG_API_URL`, `CATALOG_TIMEOUT_SECS` and `CATALOG_CACHE`,
    /// using defaults for unset variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(api_url) = lookup("CATALOG_API_URL").filter(|v| !v.is_empty()) {
            config.api_url = api_url;
        }
        if let Some(timeout) = lookup("CATALOG_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .with_context(|| format!("CATALOG_TIMEOUT_SECS is not a number: {:?}", timeout))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(cache) = lookup("CATALOG_CACHE") {
            config.cache_enabled = match cache.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                other => anyhow::bail!("CATALOG_CACHE must be a boolean, got {:?}", other),
            };
        }
        Ok(config)
    }
}
