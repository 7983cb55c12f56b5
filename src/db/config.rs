use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::{env_parse, env_string};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, DbConfigError> {
        let url = match env_string("DATABASE_URL") {
            Some(url) => url,
            None => default_database_url()?,
        };

        if !url.starts_with("sqlite:") {
            return Err(DbConfigError::UnsupportedUrl { url });
        }

        Ok(Self {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS")
                .filter(|n: &u32| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            busy_timeout: Duration::from_millis(
                env_parse("DB_BUSY_TIMEOUT_MS").unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
            ),
            acquire_timeout: Duration::from_millis(
                env_parse("DB_ACQUIRE_TIMEOUT_MS").unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_MS),
            ),
        })
    }

    /// File-backed database at `path`, created on first connect.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            url: format!("sqlite:{}?mode=rwc", path.display()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            acquire_timeout: Duration::from_millis(DEFAULT_ACQUIRE_TIMEOUT_MS),
        }
    }
}

fn default_database_url() -> Result<String, DbConfigError> {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalima");
    std::fs::create_dir_all(&dir).map_err(|source| DbConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(format!("sqlite:{}?mode=rwc", dir.join("data.db").display()))
}

#[derive(Debug, Error)]
pub enum DbConfigError {
    #[error("unsupported DATABASE_URL `{url}`, expected a sqlite: url")]
    UnsupportedUrl { url: String },
    #[error("cannot create data directory {path:?}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
