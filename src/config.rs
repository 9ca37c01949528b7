//! Runtime configuration read from the environment.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub pagination: PaginationConfig,
}

/// Defaults and caps applied to `page`/`limit` query parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/catalog".into());
        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", 64 * 1024usize)?;
        let defaults = PaginationConfig::default();
        let pagination = PaginationConfig {
            default_limit: parse_or(&lookup, "DEFAULT_PAGE_SIZE", defaults.default_limit)?,
            max_limit: parse_or(&lookup, "MAX_PAGE_SIZE", defaults.max_limit)?,
        };

        if pagination.default_limit == 0 || pagination.max_limit == 0 {
            return Err(ConfigError::Inconsistent("page sizes must be at least 1".into()));
        }
        if pagination.default_limit > pagination.max_limit {
            return Err(ConfigError::Inconsistent(format!(
                "DEFAULT_PAGE_SIZE ({}) exceeds MAX_PAGE_SIZE ({})",
                pagination.default_limit, pagination.max_limit
            )));
        }
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
            body_limit_bytes,
            pagination,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
