//! Request/response correlation by identifier.

use crate::message::{Request, Response, SessionLog};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A request paired with the response that answered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exchange<'a> {
    pub request: &'a Request,
    pub response: &'a Response,
}

/// Partition of one log's records by correlation outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Correlation<'a> {
    /// Matched pairs, in request order.
    pub matched: Vec<Exchange<'a>>,
    /// Requests without a usable identifier or without a reply, in file order.
    pub unmatched_requests: Vec<&'a Request>,
    /// Replies no request consumed, in file order.
    pub unmatched_responses: Vec<&'a Response>,
    /// Responses without a usable identifier (events, mostly), in file order.
    pub no_id_responses: Vec<&'a Response>,
}

impl<'a> Correlation<'a> {
    /// The response matched to `request`, if any.
    pub fn response_for(&self, request: &Request) -> Option<&'a Response> {
        self.matched
            .iter()
            .find(|ex| ex.request.line == request.line)
            .map(|ex| ex.response)
    }
}

/// Correlate the requests and responses of a single log.
///
/// Responses are keyed by identifier; when two share one the later wins and
/// the earlier is dropped without error. Multiple requests with the same
/// identifier all match the surviving response.
pub fn link(log: &SessionLog) -> Correlation<'_> {
    let mut correlation = Correlation::default();
    let mut by_id: HashMap<i64, usize> = HashMap::new();

    for (idx, resp) in log.responses.iter().enumerate() {
        match resp.id() {
            Some(id) => {
                if let Some(prev) = by_id.insert(id, idx) {
                    tracing::debug!(
                        id,
                        dropped_line = log.responses[prev].line,
                        kept_line = resp.line,
                        "duplicate response id, keeping the later one"
                    );
                }
            }
            None => correlation.no_id_responses.push(resp),
        }
    }

    let mut consumed: HashSet<i64> = HashSet::new();
    for req in &log.requests {
        let matched = req
            .id()
            .and_then(|id| by_id.get(&id).map(|&idx| (id, &log.responses[idx])));
        match matched {
            Some((id, response)) => {
                consumed.insert(id);
                correlation.matched.push(Exchange {
                    request: req,
                    response,
                });
            }
            None => correlation.unmatched_requests.push(req),
        }
    }

    // Walk responses in file order rather than map order so output is stable.
    for (idx, resp) in log.responses.iter().enumerate() {
        let Some(id) = resp.id() else {
            continue;
        };
        if by_id.get(&id) == Some(&idx) && !consumed.contains(&id) {
            correlation.unmatched_responses.push(resp);
        }
    }

    tracing::debug!(
        matched = correlation.matched.len(),
        unmatched_requests = correlation.unmatched_requests.len(),
        unmatched_responses = correlation.unmatched_responses.len(),
        no_id_responses = correlation.no_id_responses.len(),
        "linked session log"
    );

    correlation
}
