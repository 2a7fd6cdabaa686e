use std::net::SocketAddr;

use thiserror::Error;

/// Runtime configuration, read from the environment (`.env` supported).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub github_token: Option<String>,
    pub github_owner: String,
    pub github_repo: String,
    pub stackoverflow_tag: String,
    pub bind_addr: SocketAddr,
    pub metrics_addr: SocketAddr,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingDatabaseUrl: DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("InvalidBindAddr: {source}")]
    InvalidBindAddr {
        source: std::net::AddrParseError,
    },

    #[error("InvalidMetricsAddr: {source}")]
    InvalidMetricsAddr {
        source: std::net::AddrParseError,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let github_token = std::env::var("GITHUB_TOKEN").ok();

        let github_owner =
            std::env::var("GITHUB_OWNER").unwrap_or_else(|_| "prometheus".to_string());
        let github_repo =
            std::env::var("GITHUB_REPO").unwrap_or_else(|_| "prometheus".to_string());
        let stackoverflow_tag =
            std::env::var("STACKOVERFLOW_TAG").unwrap_or_else(|_| "prometheus".to_string());

        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr { source })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let metrics_addr = match std::env::var("METRICS_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|source| ConfigError::InvalidMetricsAddr { source })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 9091)),
        };

        Ok(Self {
            database_url,
            github_token,
            github_owner,
            github_repo,
            stackoverflow_tag,
            bind_addr,
            metrics_addr,
        })
    }
}
