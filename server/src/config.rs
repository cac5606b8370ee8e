//! Server configuration from the environment.

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Credential for the hosted embedding/generation provider. Absence is
    /// a configuration error surfaced per request, not a silent fallback.
    pub api_key: Option<String>,

    /// Override for the provider endpoint (tests, proxies).
    pub provider_base_url: Option<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `FOLIO_HOST` (default `0.0.0.0`)
    /// - `FOLIO_PORT` (default `8787`)
    /// - `GOOGLE_API_KEY` (required for chat requests to succeed)
    /// - `FOLIO_PROVIDER_BASE_URL` (optional endpoint override)
    pub fn from_env() -> Self {
        let host = std::env::var("FOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("FOLIO_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8787);
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let provider_base_url = std::env::var("FOLIO_PROVIDER_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Self {
            host,
            port,
            api_key,
            provider_base_url,
        }
    }

    /// The address to bind, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
