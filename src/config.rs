//! Configuration for how a process observes its NetLog.

use crate::error::{NetLogError, Result};
use crate::net_log::{CaptureMode, NetLog};
use crate::observers::TracingObserver;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::Level;

/// Observation settings
///
/// Defaults come from the environment (`NETLOG_CAPTURE_MODE`,
/// `NETLOG_TRACE_ENTRIES`, `NETLOG_TRACE_LEVEL`), falling back to the default
/// capture mode with tracing disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetLogConfig {
    /// Capture mode for observers installed from this config
    pub capture_mode: CaptureMode,
    /// Whether to forward entries to `tracing`
    pub trace_entries: bool,
    /// Level for forwarded entries: error, warn, info, debug or trace
    pub trace_level: String,
}

impl Default for NetLogConfig {
    fn default() -> Self {
        Self {
            capture_mode: std::env::var("NETLOG_CAPTURE_MODE")
                .ok()
                .and_then(|mode| mode.parse().ok())
                .unwrap_or_default(),
            trace_entries: std::env::var("NETLOG_TRACE_ENTRIES")
                .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            trace_level: std::env::var("NETLOG_TRACE_LEVEL").unwrap_or_else(|_| "debug".to_string()),
        }
    }
}

impl NetLogConfig {
    /// Loads a `.env` file if one exists, then reads the environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.level().map(|_| ())
    }

    pub fn level(&self) -> Result<Level> {
        self.trace_level
            .parse::<Level>()
            .map_err(|_| NetLogError::ConfigError(format!("unknown trace level: {}", self.trace_level)))
    }

    /// Attaches a [`TracingObserver`] to `net_log` when `trace_entries` is
    /// set. The caller keeps the returned observer to detach it later.
    pub fn attach_tracing_observer(&self, net_log: &NetLog) -> Result<Option<Arc<TracingObserver>>> {
        if !self.trace_entries {
            return Ok(None);
        }
        let observer = Arc::new(TracingObserver::new(self.level()?));
        net_log.add_observer(observer.clone(), self.capture_mode)?;
        Ok(Some(observer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net_log::NetLogObserver;
    use std::io::Write;

    fn config(trace_entries: bool, trace_level: &str) -> NetLogConfig {
        NetLogConfig {
            capture_mode: CaptureMode::IncludeCookiesAndCredentials,
            trace_entries,
            trace_level: trace_level.to_string(),
        }
    }

    #[test]
    fn test_from_json_str() {
        let config = NetLogConfig::from_json_str(
            r#"{"capture_mode": "include_socket_bytes", "trace_entries": true, "trace_level": "info"}"#,
        )
        .unwrap();

        assert_eq!(config.capture_mode, CaptureMode::IncludeSocketBytes);
        assert!(config.trace_entries);
        assert_eq!(config.level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_from_json_str_partial() {
        let config = NetLogConfig::from_json_str(r#"{"trace_level": "warn"}"#).unwrap();
        assert_eq!(config.level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_invalid_capture_mode() {
        let err = NetLogConfig::from_json_str(r#"{"capture_mode": "everything"}"#).unwrap_err();
        assert!(matches!(err, NetLogError::SerializationError(_)));
    }

    #[test]
    fn test_invalid_level() {
        let err = NetLogConfig::from_json_str(r#"{"trace_level": "loud"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: unknown trace level: loud");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"capture_mode": "include_cookies_and_credentials", "trace_entries": false, "trace_level": "trace"}}"#
        )
        .unwrap();

        let config = NetLogConfig::from_file(file.path()).unwrap();
        assert_eq!(config, self::config(false, "trace"));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetLogConfig::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, NetLogError::IoError(_)));
    }

    #[test]
    fn test_attach_tracing_observer_disabled() {
        let net_log = NetLog::new();
        let observer = config(false, "debug").attach_tracing_observer(&net_log).unwrap();
        assert!(observer.is_none());
        assert!(!net_log.is_capturing());
    }

    #[test]
    fn test_attach_tracing_observer_enabled() {
        let net_log = NetLog::new();
        let observer = config(true, "info")
            .attach_tracing_observer(&net_log)
            .unwrap()
            .unwrap();

        assert!(net_log.is_capturing());
        assert_eq!(observer.level(), Level::INFO);
        assert_eq!(observer.capture_mode(), Some(CaptureMode::IncludeCookiesAndCredentials));

        net_log.remove_observer(&*observer).unwrap();
    }

    #[test]
    fn test_attach_tracing_observer_bad_level() {
        let net_log = NetLog::new();
        assert!(config(true, "verbose").attach_tracing_observer(&net_log).is_err());
        assert!(!net_log.is_capturing());
    }
}
