//! Target resolution.
//!
//! Turns the caller's comma-separated target spec into the set of channels to
//! notify.

use crate::error::{AppError, AppResult};
use crate::models::Channel;
use serde::Serialize;

/// Channels named by a target spec, deduplicated, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedTargets {
    channels: Vec<Channel>,
}

impl ResolvedTargets {
    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }

    /// All channels joined with commas, e.g. `gchat,message_bus`.
    pub fn joined(&self) -> String {
        self.joined_without(None)
    }

    /// Channels joined with commas, leaving out `excluded`.
    pub fn joined_without(&self, excluded: Option<Channel>) -> String {
        self.channels
            .iter()
            .filter(|channel| Some(**channel) != excluded)
            .map(Channel::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parses a target spec such as `"GChat, message_bus"`.
///
/// Segments are trimmed and lower-cased. Empty segments are skipped, so
/// `"gchat,,slack"` names two channels.
///
/// # Errors
/// - Validation error when no channel is named at all
/// - Validation error naming the first unrecognized segment
pub fn resolve(target_spec: &str) -> AppResult<ResolvedTargets> {
    let segments: Vec<String> = target_spec
        .split(',')
        .map(|segment| segment.trim().to_lowercase())
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return Err(AppError::validation(
            "target",
            "At least one Target(gchat/email/slack/irc/message_bus) are required to send \
             notifications using the Notify Service",
        ));
    }

    let mut channels = Vec::with_capacity(segments.len());
    for segment in &segments {
        let channel: Channel = segment.parse()?;
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }

    tracing::debug!(target_spec, resolved = ?channels, "Resolved notification targets");

    Ok(ResolvedTargets { channels })
}
