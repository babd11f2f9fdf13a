//! Core notification transport trait and request types.
//!
//! The transport is the only collaborator that talks to the notify service.
//! The dispatcher never performs I/O itself: it validates a request, then
//! hands one [`ApiRequest`] per channel to the transport.

use crate::error::AppResult;
use crate::models::{Channel, NotifyParams};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// A single call to the notify service API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiRequest {
    /// Deliver the shared payload to one channel
    Dispatch {
        channel: Channel,
        payload: String,
        params: NotifyParams,
        #[serde(skip_serializing_if = "Option::is_none")]
        template: Option<Value>,
    },
    /// Look up a named template
    Template { name: String },
}

impl ApiRequest {
    /// Endpoint name used in logs and transport errors.
    pub fn endpoint(&self) -> String {
        match self {
            ApiRequest::Dispatch { channel, .. } => channel.as_str().to_string(),
            ApiRequest::Template { name } => format!("templates/{name}"),
        }
    }
}

/// Trait for notify service transports.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All transports must be Send + Sync for use in async contexts.
///
/// A transport returns `Ok(None)` (or any falsy JSON value) when the service
/// answered with nothing. For template lookups that means "no such template";
/// it is not a transport failure.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct NotifyServiceClient {
///     base_url: String,
/// }
///
/// #[async_trait]
/// impl NotifyTransport for NotifyServiceClient {
///     async fn api_call(&self, request: &ApiRequest) -> AppResult<Option<Value>> {
///         // POST to {base_url}/{request.endpoint()}
///     }
///
///     fn name(&self) -> &'static str {
///         "notify_service"
///     }
/// }
/// ```
#[async_trait]
pub trait NotifyTransport: Send + Sync {
    /// Performs one API call, blocking the dispatch until it completes.
    ///
    /// # Arguments
    /// * `request` - The dispatch or template lookup to perform
    ///
    /// # Returns
    /// The service response, or `None` when the service returned nothing
    async fn api_call(&self, request: &ApiRequest) -> AppResult<Option<Value>>;

    /// Returns the transport name for logging/debugging
    fn name(&self) -> &'static str;
}

/// Python-style truthiness of a service response.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` are all treated as "no answer".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
