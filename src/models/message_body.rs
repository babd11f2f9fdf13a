//! Explicit notification message bodies.

use serde_json::{Map, Value};

/// A caller-supplied message body, classified once at the boundary.
///
/// `Invalid` keeps the original value so the payload builder can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// Plain text, sent as `{"text": ...}`
    Text(String),
    /// Structured body, sent verbatim
    Mapping(Map<String, Value>),
    /// Any other shape (sequence, number, bool)
    Invalid(Value),
}

impl MessageBody {
    /// Classifies a JSON value. `null` means no body was supplied.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(MessageBody::Text(text)),
            Value::Object(map) => Some(MessageBody::Mapping(map)),
            other => Some(MessageBody::Invalid(other)),
        }
    }
}

impl From<&str> for MessageBody {
    fn from(text: &str) -> Self {
        MessageBody::Text(text.to_string())
    }
}

impl From<String> for MessageBody {
    fn from(text: String) -> Self {
        MessageBody::Text(text)
    }
}

impl From<Map<String, Value>> for MessageBody {
    fn from(map: Map<String, Value>) -> Self {
        MessageBody::Mapping(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_classification() {
        assert_eq!(MessageBody::from_value(Value::Null), None);
        assert_eq!(
            MessageBody::from_value(json!("hi")),
            Some(MessageBody::Text("hi".to_string()))
        );
        assert!(matches!(
            MessageBody::from_value(json!({"body": "x"})),
            Some(MessageBody::Mapping(_))
        ));
        assert_eq!(
            MessageBody::from_value(json!(["a", "b"])),
            Some(MessageBody::Invalid(json!(["a", "b"])))
        );
        assert_eq!(
            MessageBody::from_value(json!(42)),
            Some(MessageBody::Invalid(json!(42)))
        );
    }
}
