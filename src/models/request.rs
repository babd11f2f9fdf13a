//! Notification requests.

use super::{MessageBody, OutcomeRecord};
use serde_json::{Map, Value};

/// Free-form request parameters keyed by option name.
pub type NotifyParams = Map<String, Value>;

/// Comma-separated list of channels to notify
pub const TARGET_PARAM: &str = "target";
/// Topic used when publishing to the message bus
pub const MESSAGE_BUS_TOPIC_PARAM: &str = "message_bus_topic";
/// Structured request body published to the message bus
pub const MESSAGE_BUS_REQUEST_BODY_PARAM: &str = "message_bus_request_body";

/// One dispatch attempt: where to send, with which options, about which outcome.
///
/// A request is immutable while it is being dispatched. Callers that want to
/// change parameters build a new request, which is validated again.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub target_spec: String,
    pub params: NotifyParams,
    pub message_body: Option<MessageBody>,
    pub outcome: OutcomeRecord,
}

impl NotificationRequest {
    /// Creates a request whose target spec is read from the `target` parameter.
    ///
    /// A missing or null `target` yields an empty spec, which the target
    /// resolver rejects.
    pub fn new(params: NotifyParams, outcome: OutcomeRecord) -> Self {
        let target_spec = match params.get(TARGET_PARAM) {
            Some(Value::String(spec)) => spec.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self {
            target_spec,
            params,
            message_body: None,
            outcome,
        }
    }

    pub fn with_message_body(mut self, body: impl Into<Option<MessageBody>>) -> Self {
        self.message_body = body.into();
        self
    }
}
