//! Hashtag API client configuration
//!
//! Loaded from `HASHTAG_API_*` environment variables with development defaults.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HashtagClientConfig {
    /// Base URL every request path is resolved against
    pub base_url: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Optional bearer token
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Largest request line plus headers the transport will send, in bytes
    pub max_header_bytes: usize,

    /// `count` sent with every hashtag search
    pub search_page_size: u32,

    /// Fixed timezone offset in seconds; local offset is used when unset
    pub timezone_offset_secs: Option<i32>,
}

impl Default for HashtagClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1/".to_string(),
            user_agent: format!("nova-hashtag-client/{}", env!("CARGO_PKG_VERSION")),
            access_token: None,
            request_timeout_secs: 30,
            max_header_bytes: 8 * 1024,
            search_page_size: 30,
            timezone_offset_secs: None,
        }
    }
}

impl HashtagClientConfig {
    /// Load configuration from environment variables
    /// Falls back to defaults for development
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("HASHTAG_API_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: env::var("HASHTAG_API_USER_AGENT").unwrap_or(defaults.user_agent),
            access_token: env::var("HASHTAG_API_ACCESS_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
            request_timeout_secs: env::var("HASHTAG_API_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_header_bytes: env::var("HASHTAG_API_MAX_HEADER_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_header_bytes),
            search_page_size: env::var("HASHTAG_API_SEARCH_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.search_page_size),
            timezone_offset_secs: env::var("HASHTAG_API_TIMEZONE_OFFSET_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_max_header_bytes(mut self, limit: usize) -> Self {
        self.max_header_bytes = limit;
        self
    }

    pub fn with_timezone_offset(mut self, offset_secs: i32) -> Self {
        self.timezone_offset_secs = Some(offset_secs);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Offset sent as `timezone_offset`, resolved once per client
    pub fn resolve_timezone_offset(&self) -> i32 {
        self.timezone_offset_secs
            .unwrap_or_else(|| chrono::Local::now().offset().local_minus_utc())
    }
}
