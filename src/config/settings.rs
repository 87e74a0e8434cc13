//! Process settings read from environment variables.
//!
//! Values usually come from a `.env` file loaded by `dotenvy` in `main`, but
//! they are read through a lookup function so tests can supply their own.

use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Default `SQLite` database used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/catalog.sqlite?mode=rwc";
/// Default HTTP host.
pub const DEFAULT_HTTP_HOST: &str = "localhost";
/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Where the HTTP server listens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host name or address to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Everything the service needs to start.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database URL passed to `SeaORM`
    pub database_url: String,
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Optional TOML file with catalog seed data
    pub seed_path: Option<PathBuf>,
}

// The database URL may carry a password
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("server", &self.server)
            .field("seed_path", &self.seed_path)
            .finish()
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// The database URL is taken from `DATABASE_URL`; failing that it is
    /// assembled from `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB` and
    /// `POSTGRES_PORT` (plus optional `POSTGRES_HOST`), and otherwise falls
    /// back to a local `SQLite` file.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `HTTP_PORT` or `POSTGRES_PORT` is not a valid port.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => postgres_url(&get)?.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        };

        let port = get("HTTP_PORT")
            .map(|raw| parse_port("HTTP_PORT", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_HTTP_PORT);

        Ok(Self {
            database_url,
            server: ServerConfig {
                host: get("HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
                port,
            },
            seed_path: get("CATALOG_SEED_PATH").map(PathBuf::from),
        })
    }
}

fn postgres_url<F>(get: &F) -> Result<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(user), Some(password), Some(database), Some(port)) = (
        get("POSTGRES_USER"),
        get("POSTGRES_PASSWORD"),
        get("POSTGRES_DB"),
        get("POSTGRES_PORT"),
    ) else {
        return Ok(None);
    };
    let port = parse_port("POSTGRES_PORT", &port)?;
    let host = get("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());

    Ok(Some(format!(
        "postgres://{user}:{password}@{host}:{port}/{database}"
    )))
}

fn parse_port(key: &str, raw: &str) -> Result<u16> {
    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("{key} must be a port number, got {raw:?}: {e}"),
    })
}
