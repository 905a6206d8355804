//! Configuration loading and representation.
//!
//! Everything comes from environment variables with development defaults, so
//! `cargo run` works from the workspace root without any setup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use natours_core::IdCheck;
use natours_observability::LogFormat;

pub const BIND_VAR: &str = "NATOURS_BIND";
pub const TOURS_FILE_VAR: &str = "NATOURS_TOURS_FILE";
pub const ID_CHECK_VAR: &str = "NATOURS_ID_CHECK";
pub const LOG_FORMAT_VAR: &str = "NATOURS_LOG_FORMAT";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_TOURS_FILE: &str = "dev-data/data/tours-simple.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub tours_file: PathBuf,
    pub id_check: IdCheck,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup` (unset variables yield `None`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup(BIND_VAR)
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: BIND_VAR,
                reason: e.to_string(),
            })?;

        let tours_file = lookup(TOURS_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOURS_FILE));

        let id_check = match lookup(ID_CHECK_VAR) {
            Some(raw) => raw.parse::<IdCheck>().map_err(|e| ConfigError {
                var: ID_CHECK_VAR,
                reason: e.to_string(),
            })?,
            None => IdCheck::default(),
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError { var: LOG_FORMAT_VAR, reason })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            tours_file,
            id_check,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.tours_file, PathBuf::from(DEFAULT_TOURS_FILE));
        assert_eq!(config.id_check, IdCheck::Membership);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (BIND_VAR, "0.0.0.0:8080"),
            (TOURS_FILE_VAR, "/tmp/tours.json"),
            (ID_CHECK_VAR, "bounds"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.tours_file, PathBuf::from("/tmp/tours.json"));
        assert_eq!(config.id_check, IdCheck::Bounds);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reports_the_offending_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[(BIND_VAR, "localhost")])).unwrap_err();
        assert_eq!(err.var, BIND_VAR);

        let err = AppConfig::from_lookup(lookup_from(&[(ID_CHECK_VAR, "strict")])).unwrap_err();
        assert_eq!(err.var, ID_CHECK_VAR);
    }
}
