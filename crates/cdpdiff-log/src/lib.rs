//! Session log comparison for remote-debugging protocol clients.
//!
//! A session log is a line-oriented capture of a protocol exchange:
//!
//! ```text
//! -> {"id":1,"method":"Page.enable"}
//! <- {"id":1,"result":{}}
//! <- {"method":"Page.loadEventFired","params":{"timestamp":12.5}}
//! ```
//!
//! Lines starting with the outbound marker are requests, lines starting with
//! the inbound marker are responses (replies and events). Anything else is
//! ignored.
//!
//! # Pipeline
//!
//! - [`parse_file`] / [`parse_reader`] decode a log into a [`SessionLog`]
//! - [`link`] correlates requests and responses by identifier
//! - [`request_method_diff`] / [`response_method_diff`] compare two logs by
//!   method name
//!
//! # Example
//!
//! ```ignore
//! use rhizome_cdpdiff_log::{Markers, link, parse_file, request_method_diff};
//!
//! let a = parse_file("k6.log".as_ref(), &Markers::default())?;
//! let b = parse_file("playwright.log".as_ref(), &Markers::default())?;
//! let correlation = link(&a);
//! println!("{} unmatched requests", correlation.unmatched_requests.len());
//! for req in request_method_diff(&a, &b) {
//!     println!("only in A: {}", req.method());
//! }
//! ```

mod correlate;
mod diff;
mod error;
mod message;
mod parser;

pub use correlate::{Correlation, Exchange, link};
pub use diff::{request_method_diff, response_method_diff};
pub use error::{Direction, LogError};
pub use message::{Request, RequestMessage, Response, ResponseMessage, SessionLog};
pub use parser::{Markers, parse_file, parse_reader, parse_str};
