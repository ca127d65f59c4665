//! Server configuration loaded from the environment.

use std::net::SocketAddr;

use chrono::Duration;
use community_auth::{JwtAlgorithm, JwtConfig};
use thiserror::Error;

/// Secret used when `COMMUNITY_JWT_SECRET` is not set.
pub const DEVELOPMENT_SECRET: &str = "community-development-secret";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Session token settings
    pub jwt: JwtConfig,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Insert the default listing categories at startup
    pub seed_categories: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            jwt: JwtConfig {
                secret: DEVELOPMENT_SECRET.to_string(),
                ..JwtConfig::default()
            },
            log_json: false,
            seed_categories: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMMUNITY_BIND_ADDR`: listen address (default: 127.0.0.1:3000)
    /// - `COMMUNITY_JWT_SECRET`: HMAC secret for session tokens
    /// - `COMMUNITY_JWT_ISSUER`: expected token issuer (default: community)
    /// - `COMMUNITY_SESSION_HOURS`: session lifetime in hours (default: 24)
    /// - `COMMUNITY_LOG_JSON`: log as JSON (default: false)
    /// - `COMMUNITY_SEED_CATEGORIES`: seed default categories (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let bind_addr = match lookup("COMMUNITY_BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "COMMUNITY_BIND_ADDR",
                value,
            })?,
            None => default.bind_addr,
        };

        let session_duration = match lookup("COMMUNITY_SESSION_HOURS") {
            Some(value) => match value.parse::<i64>() {
                Ok(hours) if hours > 0 => Duration::hours(hours),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "COMMUNITY_SESSION_HOURS",
                        value,
                    })
                }
            },
            None => default.jwt.session_duration,
        };

        Ok(Self {
            bind_addr,
            jwt: JwtConfig {
                secret: lookup("COMMUNITY_JWT_SECRET")
                    .filter(|s| !s.is_empty())
                    .unwrap_or(default.jwt.secret),
                algorithm: JwtAlgorithm::HS256,
                issuer: lookup("COMMUNITY_JWT_ISSUER").unwrap_or(default.jwt.issuer),
                session_duration,
            },
            log_json: lookup("COMMUNITY_LOG_JSON")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(default.log_json),
            seed_categories: lookup("COMMUNITY_SEED_CATEGORIES")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.seed_categories),
        })
    }

    /// Whether the server is signing sessions with the built-in secret.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt.secret == DEVELOPMENT_SECRET
    }
}
