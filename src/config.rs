use itunes_catalog::ITUNES_SEARCH_ENDPOINT;
use serde::Deserialize;
use std::time::Duration;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_catalog_endpoint() -> String {
    ITUNES_SEARCH_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    30u64
}

fn default_session_ttl() -> u64 {
    1800u64
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default = "default_catalog_endpoint")]
    pub(crate) catalog_endpoint: String,
    /// Timeout of a catalog request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: u64,
    /// Idle time after which a search session is dropped, in seconds.
    #[serde(default = "default_session_ttl")]
    pub(crate) session_ttl: u64,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Self>()
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub(crate) fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }
}
