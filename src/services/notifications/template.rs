//! Named template lookup.

use super::transport::{ApiRequest, NotifyTransport, is_falsy};
use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;

/// Template content returned by the notify service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateContent {
    pub name: String,
    pub content: Value,
}

/// Looks up `name` through the transport.
///
/// An empty answer means the template does not exist and is reported as a
/// validation error. Transport failures propagate unchanged. Nothing is cached.
pub async fn resolve_template(
    name: &str,
    transport: &dyn NotifyTransport,
) -> AppResult<TemplateContent> {
    let request = ApiRequest::Template {
        name: name.to_string(),
    };

    let response = transport.api_call(&request).await?;

    match response {
        Some(content) if !is_falsy(&content) => {
            tracing::debug!(template = name, transport = transport.name(), "Resolved template");
            Ok(TemplateContent {
                name: name.to_string(),
                content,
            })
        }
        _ => Err(AppError::validation(
            "template",
            format!("Error finding template {name}"),
        )),
    }
}
