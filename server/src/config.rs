use pulse_core::youtube::DEFAULT_API_BASE;

/// Runtime settings gathered from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    /// Comma-separated origin list; `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_string(), api_key: None, cors_allow_origin: None }
    }
}

impl ServerConfig {
    /// Reads `YOUTUBE_API_KEY` and `CORS_ALLOW_ORIGIN`.
    pub fn from_env(api_base: impl Into<String>) -> Self {
        let api_key = std::env::var("YOUTUBE_API_KEY").ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("YOUTUBE_API_KEY not set, upstream routes will fail");
        }
        Self {
            api_base: api_base.into(),
            api_key,
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
        }
    }
}
