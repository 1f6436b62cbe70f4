//! Decoded protocol messages.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decode `null` as the type's zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload of an outbound message.
///
/// Missing or `null` fields fall back to their zero values; an `id` of 0
/// means the request carries no usable identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
}

/// Payload of an inbound message: either a reply (`id` + `result`) or an
/// event (`method` + `params`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Opaque reply payload. Only its shape is checked.
    #[serde(default, skip_serializing)]
    pub result: Option<Map<String, Value>>,
}

/// An outbound line from a session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// 1-based line number in the source log.
    pub line: usize,
    /// The line as it appeared in the log, marker included.
    pub raw: String,
    #[serde(flatten)]
    pub message: RequestMessage,
}

impl Request {
    /// Identifier usable for correlation (present and non-zero).
    pub fn id(&self) -> Option<i64> {
        (self.message.id != 0).then_some(self.message.id)
    }

    pub fn method(&self) -> &str {
        &self.message.method
    }
}

/// An inbound line from a session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// 1-based line number in the source log.
    pub line: usize,
    /// The line as it appeared in the log, marker included.
    pub raw: String,
    #[serde(flatten)]
    pub message: ResponseMessage,
}

impl Response {
    /// Identifier usable for correlation (present and non-zero).
    pub fn id(&self) -> Option<i64> {
        self.message.id.filter(|&id| id != 0)
    }

    /// Method name, set only on event-style responses.
    pub fn method(&self) -> Option<&str> {
        self.message.method.as_deref()
    }
}

/// A parsed session log: requests and responses, each in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionLog {
    pub requests: Vec<Request>,
    pub responses: Vec<Response>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_missing_fields() {
        let msg: RequestMessage = serde_json::from_str(r#"{"method":"Page.enable"}"#).unwrap();
        assert_eq!(msg.id, 0);
        assert_eq!(msg.method, "Page.enable");

        let msg: RequestMessage =
            serde_json::from_str(r#"{"id":3,"method":"Target.attach","sessionId":"abc"}"#)
                .unwrap();
        assert_eq!(msg.id, 3);
    }

    #[test]
    fn test_request_null_fields_are_zero() {
        let msg: RequestMessage =
            serde_json::from_str(r#"{"id":null,"method":"Page.enable"}"#).unwrap();
        assert_eq!(msg.id, 0);
        assert_eq!(msg.method, "Page.enable");

        let msg: RequestMessage = serde_json::from_str(r#"{"id":4,"method":null}"#).unwrap();
        assert_eq!(msg.id, 4);
        assert_eq!(msg.method, "");
    }

    #[test]
    fn test_request_rejects_wrong_types() {
        assert!(serde_json::from_str::<RequestMessage>(r#"{"id":"1","method":"x"}"#).is_err());
        assert!(serde_json::from_str::<RequestMessage>(r#"{"id":1,"method":7}"#).is_err());
        assert!(serde_json::from_str::<RequestMessage>(r#"{"id":1.5,"method":"x"}"#).is_err());
    }

    #[test]
    fn test_response_distinguishes_missing_id_from_zero() {
        let missing: ResponseMessage = serde_json::from_str(r#"{"result":{}}"#).unwrap();
        assert_eq!(missing.id, None);

        let zero: ResponseMessage = serde_json::from_str(r#"{"id":0,"result":{}}"#).unwrap();
        assert_eq!(zero.id, Some(0));

        let null: ResponseMessage = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert_eq!(null.id, None);
    }

    #[test]
    fn test_response_result_must_be_object() {
        assert!(serde_json::from_str::<ResponseMessage>(r#"{"id":1,"result":"ok"}"#).is_err());
        assert!(serde_json::from_str::<ResponseMessage>(r#"{"id":1,"result":null}"#).is_ok());
    }

    #[test]
    fn test_usable_ids() {
        let req = Request {
            line: 1,
            raw: String::new(),
            message: RequestMessage {
                id: 0,
                method: "Page.enable".into(),
            },
        };
        assert_eq!(req.id(), None);

        let resp = Response {
            line: 2,
            raw: String::new(),
            message: ResponseMessage {
                id: Some(0),
                ..Default::default()
            },
        };
        assert_eq!(resp.id(), None);
        assert_eq!(resp.method(), None);
    }
}
