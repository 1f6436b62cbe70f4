//! Line-oriented session log parser.

use crate::error::{Direction, LogError};
use crate::message::{Request, RequestMessage, Response, ResponseMessage, SessionLog};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Directional prefixes that classify a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Prefix of outbound lines (default `->`).
    pub request: String,
    /// Prefix of inbound lines (default `<-`).
    pub response: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            request: "->".to_string(),
            response: "<-".to_string(),
        }
    }
}

impl Markers {
    /// Classify a raw line, returning its direction and the unstripped payload.
    fn classify<'l>(&self, line: &'l [u8]) -> Option<(Direction, &'l [u8])> {
        if let Some(rest) = line.strip_prefix(self.request.as_bytes()) {
            Some((Direction::Request, rest))
        } else if let Some(rest) = line.strip_prefix(self.response.as_bytes()) {
            Some((Direction::Response, rest))
        } else {
            None
        }
    }
}

/// Parse a session log file.
pub fn parse_file(path: &Path, markers: &Markers) -> Result<SessionLog, LogError> {
    let file = File::open(path).map_err(|source| LogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let log = parse_reader(BufReader::new(file), markers)?;
    tracing::debug!(
        path = %path.display(),
        requests = log.requests.len(),
        responses = log.responses.len(),
        "parsed session log"
    );
    Ok(log)
}

/// Parse an in-memory session log.
pub fn parse_str(content: &str, markers: &Markers) -> Result<SessionLog, LogError> {
    parse_reader(content.as_bytes(), markers)
}

/// Parse a session log from any buffered reader.
///
/// Lines are read as raw bytes without a length limit. Lines without a
/// marker are skipped undecoded. Marked lines are converted lossily (invalid
/// UTF-8 becomes U+FFFD) and a payload that does not decode fails the parse.
pub fn parse_reader<R: BufRead>(mut reader: R, markers: &Markers) -> Result<SessionLog, LogError> {
    let mut log = SessionLog::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        line_no += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LogError::Read {
                line: line_no,
                source,
            })?;
        if read == 0 {
            break;
        }
        let mut bytes = buf.as_slice();
        while let Some((&(b'\n' | b'\r'), rest)) = bytes.split_last() {
            bytes = rest;
        }

        let Some((direction, payload)) = markers.classify(bytes) else {
            continue;
        };
        let raw = String::from_utf8_lossy(bytes).into_owned();
        let payload = String::from_utf8_lossy(payload);
        let payload = payload.trim();

        match direction {
            Direction::Request => {
                let message: RequestMessage = decode(payload, line_no, direction)?;
                log.requests.push(Request {
                    line: line_no,
                    raw,
                    message,
                });
            }
            Direction::Response => {
                let message: ResponseMessage = decode(payload, line_no, direction)?;
                log.responses.push(Response {
                    line: line_no,
                    raw,
                    message,
                });
            }
        }
    }

    Ok(log)
}

fn decode<'de, T: Deserialize<'de>>(
    payload: &'de str,
    line: usize,
    direction: Direction,
) -> Result<T, LogError> {
    serde_json::from_str(payload).map_err(|source| LogError::Decode {
        line,
        direction,
        payload: payload.to_string(),
        source,
    })
}
