// config.rs
use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::Level;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub log_level: Level,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 5000,
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "LOG_LEVEL",
                value,
            })?,
            None => Level::INFO,
        };

        Ok(AppConfig {
            database_url: required("DATABASE_URL")?,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "devconnector".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST",
            value: self.host.clone(),
        })
    }
}
