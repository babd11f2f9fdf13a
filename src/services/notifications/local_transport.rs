//! In-process transport used by the CLI.
//!
//! Templates are served from configuration and deliveries are logged and
//! recorded instead of being sent anywhere.

use super::transport::{ApiRequest, NotifyTransport};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// Transport that answers template lookups from a fixed table and records
/// every dispatch call.
#[derive(Debug, Default)]
pub struct LocalTransport {
    templates: HashMap<String, Value>,
    deliveries: Mutex<Vec<ApiRequest>>,
}

impl LocalTransport {
    /// Creates a new LocalTransport
    ///
    /// # Arguments
    /// * `templates` - Template content keyed by template name
    pub fn new(templates: HashMap<String, Value>) -> Self {
        Self {
            templates,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// Dispatch calls received so far, in call order.
    pub fn deliveries(&self) -> AppResult<Vec<ApiRequest>> {
        let deliveries = self
            .deliveries
            .lock()
            .map_err(|e| anyhow::anyhow!("Delivery log poisoned: {e}"))?;
        Ok(deliveries.clone())
    }
}

#[async_trait]
impl NotifyTransport for LocalTransport {
    async fn api_call(&self, request: &ApiRequest) -> AppResult<Option<Value>> {
        match request {
            ApiRequest::Template { name } => Ok(self.templates.get(name).cloned()),
            ApiRequest::Dispatch {
                channel,
                payload,
                params,
                template,
            } => {
                let params = Value::Object(params.clone());
                tracing::info!(
                    channel = %channel,
                    payload = %payload,
                    params = %params,
                    template = template.is_some(),
                    "Delivered notification"
                );

                self.deliveries
                    .lock()
                    .map_err(|e| {
                        AppError::transport(
                            request.endpoint(),
                            anyhow::anyhow!("Delivery log poisoned: {e}"),
                        )
                    })?
                    .push(request.clone());

                Ok(Some(json!({ "status": "delivered", "channel": channel })))
            }
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
