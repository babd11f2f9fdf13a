//! Dispatch orchestration.
//!
//! `notify` runs in two phases. Planning resolves targets, partitions
//! parameters, builds the payload and resolves templates; any failure there
//! aborts before a single channel is called. Delivery then calls the
//! transport once per channel, in resolved order.

use super::partitioner::{PartitionedParams, partition};
use super::payload::build_payload;
use super::resolver::{ResolvedTargets, resolve};
use super::template::{TemplateContent, resolve_template};
use super::transport::{ApiRequest, NotifyTransport, is_falsy};
use crate::error::AppResult;
use crate::models::{Channel, NotificationRequest, NotifyParams};
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

/// One transport call prepared during planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelCall {
    pub channel: Channel,
    pub params: NotifyParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateContent>,
}

/// A fully validated dispatch, ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchPlan {
    pub targets: ResolvedTargets,
    pub partitioned: PartitionedParams,
    pub payload: String,
    pub calls: Vec<ChannelCall>,
}

impl DispatchPlan {
    fn api_requests(&self) -> impl Iterator<Item = ApiRequest> + '_ {
        self.calls.iter().map(|call| ApiRequest::Dispatch {
            channel: call.channel,
            payload: self.payload.clone(),
            params: call.params.clone(),
            template: call.template.as_ref().map(|t| t.content.clone()),
        })
    }
}

/// Orchestrates notification dispatch over a transport.
///
/// Cloning is cheap: the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct NotifyDispatcher {
    transport: Arc<dyn NotifyTransport>,
}

impl NotifyDispatcher {
    /// Creates a new NotifyDispatcher
    ///
    /// # Arguments
    /// * `transport` - The collaborator performing API calls
    pub fn new(transport: Arc<dyn NotifyTransport>) -> Self {
        Self { transport }
    }

    /// Validates `request` and prepares every channel call without delivering.
    ///
    /// Template lookups do go through the transport, since a missing template
    /// is a validation failure.
    pub async fn plan(&self, request: &NotificationRequest) -> AppResult<DispatchPlan> {
        let targets = resolve(&request.target_spec)?;
        let partitioned = partition(&targets, &request.params)?;
        let payload = build_payload(&request.outcome, request.message_body.as_ref())?;

        let mut calls: Vec<ChannelCall> = targets
            .iter()
            .map(|channel| ChannelCall {
                channel,
                params: partitioned.params_for(channel).clone(),
                template: None,
            })
            .collect();

        for (key, value) in &request.params {
            let Some(name) = key.strip_suffix("_template_name") else {
                continue;
            };
            let Some(template_name) = value.as_str().filter(|n| !n.trim().is_empty()) else {
                continue;
            };

            let channel = match name.parse::<Channel>() {
                Ok(channel) if channel.supports_templates() => channel,
                _ => {
                    tracing::warn!(param = %key, "Ignoring template for a channel without template support");
                    continue;
                }
            };

            let Some(call) = calls.iter_mut().find(|call| call.channel == channel) else {
                tracing::warn!(param = %key, channel = %channel, "Ignoring template for a channel that is not targeted");
                continue;
            };

            call.template = Some(resolve_template(template_name, self.transport.as_ref()).await?);
        }

        Ok(DispatchPlan {
            targets,
            partitioned,
            payload,
            calls,
        })
    }

    /// Delivers a plan, one transport call per channel.
    ///
    /// The first transport error stops delivery. A falsy answer is only logged.
    pub async fn deliver(&self, plan: &DispatchPlan) -> AppResult<()> {
        for request in plan.api_requests() {
            let endpoint = request.endpoint();
            let response = self.transport.api_call(&request).await?;

            match response {
                Some(ref value) if !is_falsy(value) => {
                    tracing::debug!(channel = %endpoint, "Channel accepted notification");
                }
                _ => {
                    tracing::warn!(channel = %endpoint, "Channel returned an empty response");
                }
            }
        }

        Ok(())
    }

    /// Validates the whole request, then notifies every targeted channel.
    pub async fn notify(&self, request: &NotificationRequest) -> AppResult<()> {
        let span = tracing::info_span!(
            "notify",
            target_spec = %request.target_spec,
            transport = self.transport.name()
        );

        async {
            let plan = self.plan(request).await?;
            tracing::info!(
                channels = %plan.targets.joined(),
                templates = plan.calls.iter().filter(|c| c.template.is_some()).count(),
                "Dispatching notification"
            );
            self.deliver(&plan).await
        }
        .instrument(span)
        .await
    }
}
