//! Send command handler
//!
//! Builds a notification request from the command line and configuration,
//! then plans or dispatches it through the local transport.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::cli::parser::SendArgs;
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::models::{MessageBody, NotificationRequest, NotifyParams, OutcomeRecord, TARGET_PARAM};
use crate::services::notifications::{DispatchPlan, LocalTransport, NotifyDispatcher};

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
    transport: Arc<LocalTransport>,
    dispatcher: NotifyDispatcher,
}

impl SendCommandHandler {
    /// Create a new send command handler
    ///
    /// Templates are served from `[notify.templates]`.
    pub fn new(config: Settings) -> Self {
        let transport = Arc::new(LocalTransport::new(config.notify.template_table()));
        let dispatcher = NotifyDispatcher::new(transport.clone());

        Self {
            config,
            transport,
            dispatcher,
        }
    }

    /// Execute the send command
    ///
    /// With `dry_run` the validated plan is printed as JSON and nothing is
    /// delivered.
    ///
    /// # Errors
    /// - Unreadable or malformed outcome and parameter files
    /// - Any validation error raised while planning the dispatch
    /// - Transport errors during delivery
    pub async fn execute(&self, args: &SendArgs) -> AppResult<()> {
        let request = self.build_request(args)?;

        if args.dry_run {
            let plan = self.dispatcher.plan(&request).await?;
            println!("{}", Self::render_plan(&plan)?);
            return Ok(());
        }

        self.dispatcher.notify(&request).await?;

        let delivered = self.transport.deliveries()?.len();
        println!("✓ Notification dispatched to {delivered} channel(s)");
        Ok(())
    }

    /// Builds the request from the outcome file, parameters and message flags.
    ///
    /// Parameters layer as: configured defaults, then `--params-file`, then
    /// each `--param`, then `--target`.
    pub fn build_request(&self, args: &SendArgs) -> AppResult<NotificationRequest> {
        let outcome = read_outcome(&args.outcome)?;

        let mut request_params = match args.params_file {
            Some(ref path) => read_params_file(path)?,
            None => NotifyParams::new(),
        };
        for (key, value) in &args.params {
            request_params.insert(key.clone(), value.clone());
        }
        if let Some(ref target) = args.target {
            request_params.insert(TARGET_PARAM.to_string(), Value::String(target.clone()));
        }

        let params = self.config.notify.merged_params(request_params);

        let message_body = match (&args.message, &args.message_json) {
            (Some(text), _) => Some(MessageBody::from(text.as_str())),
            (None, Some(json)) => MessageBody::from_value(json.clone()),
            (None, None) => None,
        };

        tracing::debug!(
            outcome = %args.outcome.display(),
            succeeded = outcome.is_success(),
            params = params.len(),
            "Built notification request"
        );

        Ok(NotificationRequest::new(params, outcome).with_message_body(message_body))
    }

    fn render_plan(plan: &DispatchPlan) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(plan)?)
    }

    pub fn transport(&self) -> &Arc<LocalTransport> {
        &self.transport
    }
}

fn read_outcome(path: &Path) -> AppResult<OutcomeRecord> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::validation("outcome", format!("Cannot read '{}': {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AppError::validation(
            "outcome",
            format!("Invalid outcome record in '{}': {e}", path.display()),
        )
    })
}

fn read_params_file(path: &Path) -> AppResult<NotifyParams> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::validation("params_file", format!("Cannot read '{}': {e}", path.display()))
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(params)) => Ok(params),
        Ok(other) => Err(AppError::validation(
            "params_file",
            format!("Parameters must be a JSON object, got {other}"),
        )),
        Err(e) => Err(AppError::validation(
            "params_file",
            format!("Invalid JSON in '{}': {e}", path.display()),
        )),
    }
}
