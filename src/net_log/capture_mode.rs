//! Capture granularity requested by an observer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much detail an observer wants materialized for each entry.
///
/// Modes are ordered: every mode includes everything the modes below it
/// include. Parameter callbacks receive the mode of the observer they are
/// being evaluated for and should leave out data that mode does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Events and their ordinary parameters. Cookies, credentials and raw
    /// socket bytes are stripped.
    #[default]
    Default,
    /// Additionally includes cookies and credentials.
    IncludeCookiesAndCredentials,
    /// Additionally includes the bytes read from and written to sockets.
    IncludeSocketBytes,
}

impl CaptureMode {
    pub fn include_cookies_and_credentials(self) -> bool {
        self >= CaptureMode::IncludeCookiesAndCredentials
    }

    pub fn include_socket_bytes(self) -> bool {
        self >= CaptureMode::IncludeSocketBytes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaptureMode::Default => "default",
            CaptureMode::IncludeCookiesAndCredentials => "include_cookies_and_credentials",
            CaptureMode::IncludeSocketBytes => "include_socket_bytes",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(CaptureMode::Default),
            "include_cookies_and_credentials" => Ok(CaptureMode::IncludeCookiesAndCredentials),
            "include_socket_bytes" => Ok(CaptureMode::IncludeSocketBytes),
            other => Err(format!("unknown capture mode: {}", other)),
        }
    }
}
