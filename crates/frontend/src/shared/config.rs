//! Build-time configuration of the mini-app.
//!
//! The app is a static wasm bundle, so deployment settings are baked in at
//! build time through environment variables:
//!
//! - `DASHBOARD_API_URL`: backend base address, e.g. `https://reports.example.com`
//! - `DASHBOARD_API_TIMEOUT_MS`: request timeout, defaults to 30 000

use crate::shared::api_utils::origin_api_base;
use crate::shared::query::QueryOptions;
use once_cell::sync::Lazy;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Without trailing slash
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    /// Cache policy shared by every report hook
    pub query: QueryOptions,
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_build_env);

/// Process-wide configuration, resolved on first use.
pub fn app_config() -> &'static AppConfig {
    &CONFIG
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let config = Self::resolve(
            option_env!("DASHBOARD_API_URL"),
            option_env!("DASHBOARD_API_TIMEOUT_MS"),
            origin_api_base,
        );
        log::info!(
            "API base: {} (timeout {} ms)",
            config.api_base_url,
            config.request_timeout_ms
        );
        config
    }

    fn resolve(
        api_url: Option<&str>,
        timeout_ms: Option<&str>,
        fallback_base: impl FnOnce() -> String,
    ) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(fallback_base)
            .trim_end_matches('/')
            .to_string();

        let request_timeout_ms = timeout_ms
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        Self {
            api_base_url,
            request_timeout_ms,
            query: QueryOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_url_wins() {
        let config = AppConfig::resolve(
            Some("https://reports.example.com/"),
            None,
            || panic!("fallback must not run"),
        );
        assert_eq!(config.api_base_url, "https://reports.example.com");
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_blank_url_falls_back() {
        let config = AppConfig::resolve(Some("  "), Some("5000"), || {
            "http://127.0.0.1:8000".to_string()
        });
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[test]
    fn test_bad_timeout_uses_default() {
        let config = AppConfig::resolve(Some("http://api"), Some("soon"), String::new);
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        let config = AppConfig::resolve(Some("http://api"), Some("0"), String::new);
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_query_defaults() {
        let config = AppConfig::resolve(Some("http://api"), None, String::new);
        assert_eq!(config.query, QueryOptions::default());
    }
}
