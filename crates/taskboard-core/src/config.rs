//! Client Configuration

/// Backend origin used when no override is supplied
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Delay before a status message is cleared
pub const STATUS_CLEAR_MS: u32 = 5_000;

/// How long an armed delete stays armed
pub const DELETE_CONFIRM_WINDOW_MS: u32 = 3_000;

/// Pause between a successful delete and the redirect away from the page
pub const REDIRECT_AFTER_DELETE_MS: u32 = 1_500;

/// Where the API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build from an optional override (e.g. a build-time env var).
    /// Blank overrides fall back to the default.
    pub fn from_override(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => Self {
                base_url: url.trim_end_matches('/').to_string(),
            },
            None => Self::default(),
        }
    }

    /// Absolute URL for an API path such as `/projects/`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_trims_trailing_slash() {
        let config = ApiConfig::from_override(Some("https://api.example.com/"));
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.url("/projects/"), "https://api.example.com/projects/");
    }

    #[test]
    fn test_blank_override_uses_default() {
        assert_eq!(ApiConfig::from_override(Some("  ")), ApiConfig::default());
        assert_eq!(ApiConfig::from_override(None).base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_url_without_leading_slash() {
        let config = ApiConfig::default();
        assert_eq!(config.url("users/me"), "http://127.0.0.1:8000/users/me");
    }
}
