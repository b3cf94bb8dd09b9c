use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Backend origin, without a trailing slash.
    pub api_base_url: String,
    /// Platform path segment in `/api/{platform}/...`.
    pub platform: String,
    pub user_agent: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Whether board updates ask the display to animate.
    pub animate: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparseable values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base_url: lookup("EXPLORER_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            platform: lookup("EXPLORER_PLATFORM")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "chesscom".to_string()),
            user_agent: lookup("EXPLORER_USER_AGENT")
                .unwrap_or_else(|| "ArchiveExplorer/1.0".to_string()),
            request_timeout: lookup("EXPLORER_HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            animate: lookup("EXPLORER_ANIMATE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Defaults pointed at a specific backend.
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.api_base_url = base_url.trim_end_matches('/').to_string();
        config
    }
}
