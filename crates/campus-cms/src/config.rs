//! Configuration loading and resolution.

use std::time::Duration;

/// Environment variable selecting the CMS REST base URL.
pub const BASE_URL_ENV: &str = "CMS_API_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "CMS_TIMEOUT_SECS";

/// Placeholder used when no base URL is configured. Requests against it
/// fail, so every accessor with a static fallback serves that fallback.
pub const DEFAULT_BASE_URL: &str = "https://your-wordpress-site.com/wp-json/wp/v2";

/// Settings for reaching the CMS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl CmsConfig {
    /// Resolve from explicit values, then the environment, then defaults.
    pub fn resolve(explicit_url: Option<&str>, explicit_timeout_secs: Option<u64>) -> Self {
        Self {
            base_url: resolve_base_url(explicit_url),
            timeout: resolve_timeout(explicit_timeout_secs),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(None, None)
    }

    /// True when no real CMS has been configured.
    pub fn is_placeholder(&self) -> bool {
        self.base_url.trim_end_matches('/') == DEFAULT_BASE_URL
    }
}

/// Resolve the CMS base URL.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
        if !env_url.trim().is_empty() {
            return env_url.trim().to_string();
        }
    }

    DEFAULT_BASE_URL.to_string()
}

/// Resolve the request timeout. Zero or unparseable values mean "no timeout".
pub fn resolve_timeout(explicit_secs: Option<u64>) -> Option<Duration> {
    let secs = explicit_secs.or_else(|| {
        std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
    })?;

    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins() {
        assert_eq!(
            resolve_base_url(Some(" https://cms.example.edu/wp-json/wp/v2 ")),
            "https://cms.example.edu/wp-json/wp/v2"
        );
    }

    #[test]
    fn test_explicit_timeout() {
        assert_eq!(resolve_timeout(Some(5)), Some(Duration::from_secs(5)));
        assert_eq!(resolve_timeout(Some(0)), None);
    }

    #[test]
    fn test_default_is_placeholder() {
        let config = CmsConfig::default();
        assert!(config.is_placeholder());
        assert!(config.timeout.is_none());
    }
}
