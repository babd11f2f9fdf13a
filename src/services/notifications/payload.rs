//! Payload construction.

use crate::error::{AppError, AppResult};
use crate::models::{MessageBody, OutcomeRecord};
use serde_json::{Value, json};

/// Builds the JSON payload shared by every channel of one dispatch.
///
/// With no explicit body the outcome's task lists become the default body.
/// Text is wrapped as `{"text": ...}` and mappings are sent unchanged.
pub fn build_payload(outcome: &OutcomeRecord, message_body: Option<&MessageBody>) -> AppResult<String> {
    let payload = match message_body {
        None => json!({
            "body": {
                "passed_tasks": outcome.passed_summary(),
                "failed_tasks": outcome.failed_summary(),
            }
        }),
        Some(MessageBody::Text(text)) => json!({ "text": text }),
        Some(MessageBody::Mapping(map)) => Value::Object(map.clone()),
        Some(MessageBody::Invalid(value)) => {
            return Err(AppError::validation(
                "message_body",
                format!("The body needs to be in a dictionary or string format {value}"),
            ));
        }
    };

    Ok(serde_json::to_string(&payload)?)
}
