use anyhow::{Context, Result};
use envconfig::Envconfig;
use std::time::Duration;

#[derive(Clone, Debug, Envconfig)]
pub struct AppConfig {
    #[envconfig(from = "CHUNK_ADVISOR_BIND_ADDR", default = "0.0.0.0:8000")]
    pub api_bind_addr: String,
    #[envconfig(from = "CHUNK_ADVISOR_LOG_LEVEL", default = "info")]
    pub log_level: String,
    /// Base URL of a running advisor, used by `query`.
    #[envconfig(from = "CHUNK_ADVISOR_OPTIMIZER_URL", default = "http://localhost:8000")]
    pub optimizer_url: String,
    #[envconfig(from = "CHUNK_ADVISOR_TIMEOUT_SECS", default = "2")]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::init_from_env().context("load configuration from environment")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_bind_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            optimizer_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 2,
        }
    }
}
