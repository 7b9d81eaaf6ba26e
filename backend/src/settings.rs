//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `PAINTAPP_*` environment variables and
//! configuration files.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Listener address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9090";
/// Pool size used when none is configured.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,
}

/// Runtime settings for the paintapp backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PAINTAPP")]
pub struct AppSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Insert the default users into an empty store at startup.
    #[ortho_config(default = true)]
    pub seed_users: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// The configured database URL, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BlankDatabaseUrl`] when the value is set but
    /// blank, which is almost always a deployment mistake.
    pub fn database_url(&self) -> Result<Option<&str>, SettingsError> {
        match self.database_url.as_deref().map(str::trim) {
            Some("") => Err(SettingsError::BlankDatabaseUrl),
            other => Ok(other),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
