use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::db::config::{DbConfig, DbConfigError};

const DEFAULT_PORT: u16 = 3000;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub database: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, DbConfigError> {
        let port = env_parse::<u16>("PORT").unwrap_or(DEFAULT_PORT);
        let host = env_parse::<IpAddr>("HOST").unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let log_level = env_string("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            log_level,
            database: DbConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Non-empty, trimmed value of `key`.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|value| value.parse::<T>().ok())
}

pub fn env_bool(key: &str) -> Option<bool> {
    let normalized = env_string(key)?.to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
