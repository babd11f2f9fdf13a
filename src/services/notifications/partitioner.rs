//! Parameter partitioning.
//!
//! The message bus takes a structured request body and a topic, while chat,
//! email and IRC share the generic dispatch parameters. This module splits a
//! request's parameters accordingly.

use super::resolver::ResolvedTargets;
use crate::error::{AppError, AppResult};
use crate::models::{
    Channel, MESSAGE_BUS_REQUEST_BODY_PARAM, MESSAGE_BUS_TOPIC_PARAM, NotifyParams, TARGET_PARAM,
};
use serde::Serialize;
use serde_json::Value;

/// Per-channel parameters for one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionedParams {
    /// Generic parameters shared by every non-dedicated channel
    pub targets: NotifyParams,
    /// Dedicated message bus parameters, present only when a request body was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_bus: Option<NotifyParams>,
}

impl PartitionedParams {
    /// Parameters the transport receives for `channel`.
    pub fn params_for(&self, channel: Channel) -> &NotifyParams {
        match (channel, &self.message_bus) {
            (Channel::MessageBus, Some(message_bus)) => message_bus,
            _ => &self.targets,
        }
    }
}

/// Splits `params` between the generic targets and the dedicated message bus entry.
///
/// # Errors
/// - Validation error when `message_bus` is targeted without a topic
/// - Validation error when the request body is neither a mapping nor a string
///   holding a JSON object
pub fn partition(resolved: &ResolvedTargets, params: &NotifyParams) -> AppResult<PartitionedParams> {
    let mut targets = NotifyParams::new();
    for (key, value) in params {
        if key == TARGET_PARAM
            || key == MESSAGE_BUS_TOPIC_PARAM
            || key == MESSAGE_BUS_REQUEST_BODY_PARAM
        {
            continue;
        }
        targets.insert(key.clone(), value.clone());
    }

    if !resolved.contains(Channel::MessageBus) {
        targets.insert(TARGET_PARAM.to_string(), Value::String(resolved.joined()));
        return Ok(PartitionedParams {
            targets,
            message_bus: None,
        });
    }

    let topic = message_bus_topic(params)?;

    let body = match params.get(MESSAGE_BUS_REQUEST_BODY_PARAM) {
        None | Some(Value::Null) => None,
        Some(body) => Some(normalize_request_body(body)?),
    };

    match body {
        Some(body) => {
            targets.insert(
                TARGET_PARAM.to_string(),
                Value::String(resolved.joined_without(Some(Channel::MessageBus))),
            );

            let mut message_bus = NotifyParams::new();
            message_bus.insert(MESSAGE_BUS_TOPIC_PARAM.to_string(), topic);
            message_bus.insert(MESSAGE_BUS_REQUEST_BODY_PARAM.to_string(), body);

            Ok(PartitionedParams {
                targets,
                message_bus: Some(message_bus),
            })
        }
        None => {
            targets.insert(TARGET_PARAM.to_string(), Value::String(resolved.joined()));
            targets.insert(MESSAGE_BUS_TOPIC_PARAM.to_string(), topic);

            Ok(PartitionedParams {
                targets,
                message_bus: None,
            })
        }
    }
}

fn message_bus_topic(params: &NotifyParams) -> AppResult<Value> {
    match params.get(MESSAGE_BUS_TOPIC_PARAM) {
        Some(Value::String(topic)) if !topic.trim().is_empty() => Ok(Value::String(topic.clone())),
        Some(other @ (Value::Number(_) | Value::Bool(_) | Value::Array(_) | Value::Object(_))) => {
            Err(AppError::validation(
                MESSAGE_BUS_TOPIC_PARAM,
                format!("The message_bus_topic must be a string, got {other}"),
            ))
        }
        _ => Err(AppError::validation(
            MESSAGE_BUS_TOPIC_PARAM,
            "A message_bus_topic is required when message_bus is a target",
        )),
    }
}

/// Accepts a mapping as-is, or a string holding a JSON object.
fn normalize_request_body(body: &Value) -> AppResult<Value> {
    let invalid = || {
        AppError::validation(
            MESSAGE_BUS_REQUEST_BODY_PARAM,
            format!("The message_bus_request_body needs to be a dictionary or a JSON object string {body}"),
        )
    };

    match body {
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => Ok(decoded),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::resolver::resolve;
    use serde_json::json;

    fn params(value: Value) -> NotifyParams {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_message_bus_with_body_gets_dedicated_entry() {
        let resolved = resolve("gchat,message_bus").unwrap();
        let partitioned = partition(
            &resolved,
            &params(json!({
                "target": "gchat,message_bus",
                "message_bus_topic": "topic1",
                "message_bus_request_body": {"body": "message1"},
            })),
        )
        .unwrap();

        assert_eq!(partitioned.targets, params(json!({"target": "gchat"})));
        assert_eq!(
            partitioned.message_bus,
            Some(params(json!({
                "message_bus_topic": "topic1",
                "message_bus_request_body": {"body": "message1"},
            })))
        );
    }

    #[test]
    fn test_message_bus_without_body_stays_inline() {
        let resolved = resolve("gchat,message_bus").unwrap();
        let partitioned = partition(
            &resolved,
            &params(json!({
                "target": "gchat,message_bus",
                "message_bus_topic": "topic1",
                "message_bus_request_body": null,
            })),
        )
        .unwrap();

        assert_eq!(
            partitioned.targets,
            params(json!({"target": "gchat,message_bus", "message_bus_topic": "topic1"}))
        );
        assert!(partitioned.message_bus.is_none());
        assert_eq!(partitioned.params_for(Channel::MessageBus), &partitioned.targets);
    }

    #[test]
    fn test_no_message_bus_drops_bus_fields() {
        let resolved = resolve("Slack, IRC").unwrap();
        let partitioned = partition(
            &resolved,
            &params(json!({
                "target": "Slack, IRC",
                "message_bus_topic": "topic1",
                "message_bus_request_body": {"body": "ignored"},
                "slack_template_name": "slack1",
            })),
        )
        .unwrap();

        assert_eq!(
            partitioned.targets,
            params(json!({"target": "slack,irc", "slack_template_name": "slack1"}))
        );
        assert!(partitioned.message_bus.is_none());
    }

    #[test]
    fn test_message_bus_only_leaves_empty_target() {
        let resolved = resolve("message_bus").unwrap();
        let partitioned = partition(
            &resolved,
            &params(json!({
                "message_bus_topic": "topic1",
                "message_bus_request_body": {"body": "message1"},
            })),
        )
        .unwrap();

        assert_eq!(partitioned.targets, params(json!({"target": ""})));
        assert_eq!(
            partitioned.params_for(Channel::MessageBus)["message_bus_topic"],
            "topic1"
        );
    }

    #[test]
    fn test_message_bus_requires_topic() {
        let resolved = resolve("message_bus").unwrap();
        let err = partition(
            &resolved,
            &params(json!({"message_bus_request_body": {"body": "message1"}})),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("message_bus_topic"));

        let err = partition(&resolved, &params(json!({"message_bus_topic": "  "}))).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_string_topic_is_named_as_such() {
        let resolved = resolve("message_bus").unwrap();
        let err = partition(
            &resolved,
            &params(json!({
                "message_bus_topic": 2024,
                "message_bus_request_body": {"body": "message1"}
            })),
        )
        .unwrap_err();

        assert_eq!(err.reason(), Some("The message_bus_topic must be a string, got 2024"));
    }

    #[test]
    fn test_string_body_is_decoded() {
        let resolved = resolve("message_bus").unwrap();
        let partitioned = partition(
            &resolved,
            &params(json!({
                "message_bus_topic": "topic1",
                "message_bus_request_body": "{\"body\": \"message1\"}",
            })),
        )
        .unwrap();

        assert_eq!(
            partitioned.message_bus.unwrap()["message_bus_request_body"],
            json!({"body": "message1"})
        );
    }

    #[test]
    fn test_plain_string_body_is_rejected() {
        let resolved = resolve("message_bus").unwrap();
        for body in [json!("string1"), json!("[1, 2]"), json!(["a"]), json!(3)] {
            let err = partition(
                &resolved,
                &params(json!({
                    "message_bus_topic": "topic1",
                    "message_bus_request_body": body,
                })),
            )
            .unwrap_err();
            assert!(err.is_validation(), "body {body} should be rejected");
        }
    }

    #[test]
    fn test_partition_is_idempotent() {
        let resolved = resolve("gchat,message_bus").unwrap();
        let input = params(json!({
            "message_bus_topic": "topic1",
            "message_bus_request_body": {"body": "message1"},
        }));
        assert_eq!(
            partition(&resolved, &input).unwrap(),
            partition(&resolved, &input).unwrap()
        );
    }
}
