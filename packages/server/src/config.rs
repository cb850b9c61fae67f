//! Server configuration from environment variables
//!
//! # Environment Variables
//!
//! - `GRAPHDESK_HOST`: Bind address (default: 127.0.0.1)
//! - `GRAPHDESK_PORT`: Listen port (default: 8000)
//! - `GRAPHDESK_BACKEND`: `neo4j` or `memory` (default: neo4j)
//! - `NEO4J_URI`: HTTP base URI (default: http://localhost:7474)
//! - `NEO4J_USER` / `NEO4J_PASSWORD`: Basic auth credentials (default: neo4j / empty)
//! - `NEO4J_DATABASE`: Database name (default: neo4j)
//! - `NEO4J_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `CORS_ALLOW_ORIGIN`: Comma-separated allowed origins (default: http://localhost:3000)
//! - `GRAPHDESK_IMPORT_STRICT`: Abort imports on the first malformed entry (default: false)
//! - `GRAPHDESK_LOOKUP_CONCURRENCY`: Parallel endpoint lookups during export (default: 8)

use graphdesk_core::db::Neo4jConfig;
use graphdesk_core::services::TransferOptions;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Frontend origin allowed when `CORS_ALLOW_ORIGIN` is unset
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Which store the server talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Neo4j,
    Memory,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neo4j" => Ok(Backend::Neo4j),
            "memory" => Ok(Backend::Memory),
            other => Err(format!("unknown backend '{}', expected neo4j or memory", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub neo4j: Neo4jConfig,
    pub cors_origins: Vec<String>,
    pub transfer: TransferOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            backend: Backend::Neo4j,
            neo4j: Neo4jConfig::default(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            transfer: TransferOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("GRAPHDESK_HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("GRAPHDESK_PORT") {
            config.port = parse_value("GRAPHDESK_PORT", &port)?;
        }
        if let Some(backend) = get("GRAPHDESK_BACKEND") {
            config.backend = parse_backend(&backend)?;
        }

        if let Some(uri) = get("NEO4J_URI") {
            config.neo4j.uri = uri.trim().to_string();
        }
        if let Some(user) = get("NEO4J_USER") {
            config.neo4j.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            config.neo4j.password = password;
        }
        if let Some(database) = get("NEO4J_DATABASE") {
            config.neo4j.database = database.trim().to_string();
        }
        if let Some(secs) = get("NEO4J_TIMEOUT_SECS") {
            let secs: u64 = parse_value("NEO4J_TIMEOUT_SECS", &secs)?;
            config.neo4j.timeout = Duration::from_secs(secs);
        }

        if let Some(origins) = get("CORS_ALLOW_ORIGIN") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(strict) = get("GRAPHDESK_IMPORT_STRICT") {
            config.transfer.strict = parse_bool("GRAPHDESK_IMPORT_STRICT", &strict)?;
        }
        if let Some(concurrency) = get("GRAPHDESK_LOOKUP_CONCURRENCY") {
            let value: usize = parse_value("GRAPHDESK_LOOKUP_CONCURRENCY", &concurrency)?;
            if value == 0 {
                return Err(ConfigError::invalid(
                    "GRAPHDESK_LOOKUP_CONCURRENCY",
                    concurrency,
                    "must be at least 1",
                ));
            }
            config.transfer.lookup_concurrency = value;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, raw, e.to_string()))
}

fn parse_backend(raw: &str) -> Result<Backend, ConfigError> {
    raw.parse::<Backend>()
        .map_err(|reason| ConfigError::invalid("GRAPHDESK_BACKEND", raw, reason))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected true or false")),
    }
}
