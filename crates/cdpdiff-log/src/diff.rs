//! Method-name set differences between two logs.
//!
//! Both functions are directional: call them with the arguments swapped to
//! get the other side. Matching is on the exact method string.

use crate::message::{Request, Response, SessionLog};
use std::collections::HashSet;

/// Requests in `a` whose method no request in `b` uses, in `a`'s order.
pub fn request_method_diff<'a>(a: &'a SessionLog, b: &SessionLog) -> Vec<&'a Request> {
    let methods_in_b: HashSet<&str> = b.requests.iter().map(Request::method).collect();
    a.requests
        .iter()
        .filter(|req| !methods_in_b.contains(req.method()))
        .collect()
}

/// Event-style responses in `a` whose method no response in `b` carries.
///
/// Responses without a method never take part on either side.
pub fn response_method_diff<'a>(a: &'a SessionLog, b: &SessionLog) -> Vec<&'a Response> {
    let methods_in_b: HashSet<&str> = b.responses.iter().filter_map(Response::method).collect();
    a.responses
        .iter()
        .filter(|resp| {
            resp.method()
                .is_some_and(|method| !methods_in_b.contains(method))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Markers, parse_str};

    fn parse(content: &str) -> SessionLog {
        parse_str(content, &Markers::default()).unwrap()
    }

    #[test]
    fn test_request_diff_is_directional() {
        let a = parse(
            r#"-> {"id":1,"method":"Page.enable"}
-> {"id":2,"method":"Network.enable"}
"#,
        );
        let b = parse(r#"-> {"id":9,"method":"Page.enable"}"#);

        let only_a = request_method_diff(&a, &b);
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].method(), "Network.enable");
        assert!(request_method_diff(&b, &a).is_empty());
    }

    #[test]
    fn test_request_diff_reflexive() {
        let a = parse(
            r#"-> {"id":1,"method":"Page.enable"}
-> {"id":2,"method":"Page.enable"}
-> {"method":""}
"#,
        );
        assert!(request_method_diff(&a, &a).is_empty());
    }

    #[test]
    fn test_request_diff_is_set_based() {
        // Multiplicity is ignored: one occurrence in B excludes every one in A.
        let a = parse(
            r#"-> {"id":1,"method":"Runtime.enable"}
-> {"id":2,"method":"Runtime.enable"}
-> {"id":3,"method":"Log.enable"}
-> {"id":4,"method":"Log.enable"}
"#,
        );
        let b = parse(r#"-> {"id":1,"method":"Runtime.enable"}"#);
        let lines: Vec<_> = request_method_diff(&a, &b).iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_request_diff_exact_match() {
        let a = parse(r#"-> {"id":1,"method":"page.enable"}"#);
        let b = parse(r#"-> {"id":1,"method":"Page.enable"}"#);
        assert_eq!(request_method_diff(&a, &b).len(), 1);
    }

    #[test]
    fn test_response_diff_only_events() {
        let a = parse(
            r#"<- {"id":1,"result":{}}
<- {"method":"Page.loadEventFired","params":{}}
<- {"method":"Inspector.detached","params":{}}
"#,
        );
        let b = parse(
            r#"<- {"id":3,"result":{}}
<- {"method":"Page.loadEventFired","params":{}}
"#,
        );

        let only_a = response_method_diff(&a, &b);
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].method(), Some("Inspector.detached"));
        assert!(response_method_diff(&b, &a).is_empty());
    }

    #[test]
    fn test_response_diff_ignores_replies_against_empty() {
        let a = parse("<- {\"id\":1,\"result\":{}}\n<- {\"result\":{}}\n");
        let b = SessionLog::default();
        assert!(response_method_diff(&a, &b).is_empty());
    }
}
