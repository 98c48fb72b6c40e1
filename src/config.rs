use std::{
    env,
    net::{IpAddr, SocketAddr},
};

use axum::http::HeaderValue;
use thiserror::Error;

use crate::cors::CorsPolicy;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_BIND_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub cors: CorsPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("CORS_ALLOWED_ORIGINS entry `{0}` is not a valid origin")]
    InvalidOrigin(String),
    #[error("CORS_ALLOWED_ORIGINS must not contain `*` while credentials are allowed")]
    WildcardOrigin,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            bind_port: DEFAULT_BIND_PORT,
            cors: CorsPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parses configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_port = lookup("BIND_PORT")
            .map(|value| {
                value
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort)
            })
            .transpose()?
            .unwrap_or(DEFAULT_BIND_PORT);

        let mut cors = CorsPolicy::default();
        if let Some(raw) = lookup("CORS_ALLOWED_ORIGINS") {
            let origins = parse_origins(&raw)?;
            if !origins.is_empty() {
                cors.allowed_origins = origins;
            }
        }

        let config = Self {
            bind_addr,
            bind_port,
            cors,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .bind_addr
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidSocket)?;
        Ok(SocketAddr::new(ip, self.bind_port))
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(ConfigError::WildcardOrigin);
            }
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
        })
        .collect()
}
