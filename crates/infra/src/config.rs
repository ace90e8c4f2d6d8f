//! Configuration loading and representation.
//!
//! Values come from environment variables; anything unset falls back to the
//! defaults of [`ServerConfig::default`].

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "ITEMHUB_BIND_ADDR";
pub const ENV_HOMEPAGE: &str = "ITEMHUB_HOMEPAGE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var}: expected `project` or `app`, got {value:?}")]
    InvalidHomepage { var: &'static str, value: String },
}

/// Which fixed-text handler answers `GET /`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum HomepageHandler {
    /// Project-level handler: "Welcome to the API homepage".
    #[default]
    Project,
    /// App-level handler: "Welcome to the API homepage."
    App,
}

impl FromStr for HomepageHandler {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "app" => Ok(Self::App),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub homepage: HomepageHandler,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            homepage: HomepageHandler::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: ENV_BIND_ADDR,
                value: bind_raw.clone(),
            })?;

        let homepage = match lookup(ENV_HOMEPAGE) {
            Some(raw) => raw.parse::<HomepageHandler>().map_err(|()| ConfigError::InvalidHomepage {
                var: ENV_HOMEPAGE,
                value: raw.clone(),
            })?,
            None => HomepageHandler::default(),
        };

        tracing::debug!(%bind_addr, ?homepage, "configuration loaded");
        Ok(Self { bind_addr, homepage })
    }
}
