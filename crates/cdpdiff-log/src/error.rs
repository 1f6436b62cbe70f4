//! Errors raised while reading a session log.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Message direction, derived from the line marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Outbound, client to browser.
    Request,
    /// Inbound, browser to client.
    Response,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for log parsing.
///
/// Every variant aborts the whole parse; no partial log is returned.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("unmarshaling {direction} on line {line}: {source}: {payload}")]
    Decode {
        line: usize,
        direction: Direction,
        /// The marker-stripped payload that failed to decode.
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LogError {
    /// The offending payload, for decode failures.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Decode { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
