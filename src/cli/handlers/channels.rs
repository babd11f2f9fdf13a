//! Channels command handler

use serde::Serialize;

use crate::error::AppResult;
use crate::models::Channel;

#[derive(Debug, Serialize)]
struct ChannelInfo {
    name: &'static str,
    templates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_param: Option<String>,
}

/// Handler for the channels command
pub struct ChannelsCommandHandler;

impl ChannelsCommandHandler {
    pub fn execute(json: bool) -> AppResult<()> {
        println!("{}", Self::render(json)?);
        Ok(())
    }

    /// Renders the recognized channels as a table or as JSON.
    pub fn render(json: bool) -> AppResult<String> {
        let channels: Vec<ChannelInfo> = Channel::ALL
            .iter()
            .map(|channel| ChannelInfo {
                name: channel.as_str(),
                templates: channel.supports_templates(),
                template_param: channel
                    .supports_templates()
                    .then(|| channel.template_param()),
            })
            .collect();

        if json {
            return Ok(serde_json::to_string_pretty(&channels)?);
        }

        let mut out = format!("{:<12} {:<10} {}", "CHANNEL", "TEMPLATES", "PARAMETER");
        for info in &channels {
            out.push('\n');
            out.push_str(&format!(
                "{:<12} {:<10} {}",
                info.name,
                if info.templates { "yes" } else { "no" },
                info.template_param.as_deref().unwrap_or("-")
            ));
        }
        Ok(out)
    }
}
