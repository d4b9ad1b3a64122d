//! Webhook JSON payload

use super::Message;
use crate::config::WebhookConfig;
use serde::{Deserialize, Serialize};

/// Chat webhook message with a single embed card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Plain text shown above the card
    pub content: String,
    /// Poster display name
    pub username: String,
    /// Poster avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Cards attached to the message
    pub embeds: Vec<Embed>,
    /// Always empty; no files are uploaded
    pub attachments: Vec<serde_json::Value>,
}

/// Card carrying the sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    /// Sentence in bold
    pub description: String,
    /// Side bar color
    pub color: u32,
    /// Progress marker
    pub footer: Footer,
}

/// Card footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    /// `ordinal/quota`
    pub text: String,
}

impl WebhookPayload {
    /// Build the payload for `message`
    pub fn build(message: &Message, webhook: &WebhookConfig) -> Self {
        Self {
            content: webhook.content.clone(),
            username: webhook.username.clone(),
            avatar_url: webhook.avatar_url.clone(),
            embeds: vec![Embed {
                description: format!("**{}**", message.sentence),
                color: webhook.color,
                footer: Footer {
                    text: message.progress(),
                },
            }],
            attachments: Vec::new(),
        }
    }
}
