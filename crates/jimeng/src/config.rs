use std::time::Duration;

/// Default API base URL when `JIMENG_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.jimeng.ai";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the generation API.
///
/// | Env Var               | Default                  |
/// |-----------------------|--------------------------|
/// | `JIMENG_API_BASE_URL` | `https://api.jimeng.ai`  |
/// | `JIMENG_API_KEY`      | empty                    |
/// | `JIMENG_TIMEOUT_SECS` | `60`                     |
#[derive(Debug, Clone)]
pub struct JimengConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl JimengConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// A missing API key is allowed so the server can start without
    /// generation; every call will then be rejected upstream with 401.
    ///
    /// # Panics
    ///
    /// Panics if `JIMENG_TIMEOUT_SECS` is set but is not a valid `u64`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("JIMENG_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("JIMENG_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!("JIMENG_API_KEY is not set; generation requests will fail");
        }

        let timeout_secs: u64 = std::env::var("JIMENG_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("JIMENG_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
