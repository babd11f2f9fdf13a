//! Notification delivery channels.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A notification delivery medium.
///
/// The recognized set is closed: targets naming anything else are rejected
/// during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Gchat,
    Email,
    Slack,
    Irc,
    MessageBus,
}

impl Channel {
    /// Every recognized channel, in canonical order.
    pub const ALL: [Channel; 5] = [
        Channel::Gchat,
        Channel::Email,
        Channel::Slack,
        Channel::Irc,
        Channel::MessageBus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Gchat => "gchat",
            Channel::Email => "email",
            Channel::Slack => "slack",
            Channel::Irc => "irc",
            Channel::MessageBus => "message_bus",
        }
    }

    /// Whether the notify service keeps named templates for this channel.
    pub fn supports_templates(&self) -> bool {
        match self {
            Channel::Gchat | Channel::Slack | Channel::Email => true,
            Channel::Irc | Channel::MessageBus => false,
        }
    }

    /// Name of the request parameter selecting a template for this channel,
    /// e.g. `gchat_template_name`.
    pub fn template_param(&self) -> String {
        format!("{}_template_name", self.as_str())
    }

    /// The recognized channel names joined with commas:
    /// `gchat,email,slack,irc,message_bus`.
    pub fn recognized_list() -> String {
        Self::ALL
            .iter()
            .map(Channel::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for Channel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gchat" => Ok(Channel::Gchat),
            "email" => Ok(Channel::Email),
            "slack" => Ok(Channel::Slack),
            "irc" => Ok(Channel::Irc),
            "message_bus" => Ok(Channel::MessageBus),
            _ => Err(AppError::validation(
                "target",
                format!(
                    "Unknown target value {} found.Target should be one or more of this list: '{}'",
                    s,
                    Channel::recognized_list()
                ),
            )),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
