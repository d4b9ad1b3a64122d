//! Message delivery
//!
//! A [`Notifier`] receives the chosen sentence together with its position in
//! the weekly quota. The run treats delivery as success or failure only.

pub mod payload;
pub mod webhook;

pub use payload::WebhookPayload;
pub use webhook::WebhookNotifier;

use crate::config::WebhookConfig;
use crate::error::CliError;
use std::cell::RefCell;
use std::io::Write;

/// A sentence ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sentence text
    pub sentence: String,
    /// 1-based position within the current cycle
    pub ordinal: u32,
    /// Messages per cycle
    pub quota: u32,
}

impl Message {
    /// Create a message
    pub fn new(sentence: impl Into<String>, ordinal: u32, quota: u32) -> Self {
        Self {
            sentence: sentence.into(),
            ordinal,
            quota,
        }
    }

    /// Progress marker such as `3/14`
    pub fn progress(&self) -> String {
        format!("{}/{}", self.ordinal, self.quota)
    }
}

/// Sink for chosen sentences
pub trait Notifier {
    /// Deliver one message; any error leaves the state untouched
    fn notify(&self, message: &Message) -> Result<(), CliError>;
}

/// Writes the payload that would be posted instead of posting it
pub struct DryRunNotifier<W: Write> {
    writer: RefCell<W>,
    webhook: WebhookConfig,
}

impl<W: Write> DryRunNotifier<W> {
    /// Create a dry-run sink writing to `writer`
    pub fn new(writer: W, webhook: WebhookConfig) -> Self {
        Self {
            writer: RefCell::new(writer),
            webhook,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> Notifier for DryRunNotifier<W> {
    fn notify(&self, message: &Message) -> Result<(), CliError> {
        let payload = WebhookPayload::build(message, &self.webhook);
        let mut writer = self.writer.borrow_mut();
        serde_json::to_writer_pretty(&mut *writer, &payload)
            .map_err(|e| CliError::Delivery(e.to_string()))?;
        writeln!(writer).map_err(|e| CliError::Delivery(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CliError::Delivery(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_marker() {
        let message = Message::new("Some sentence.", 3, 14);
        assert_eq!(message.progress(), "3/14");
    }

    #[test]
    fn test_dry_run_writes_payload() {
        let notifier = DryRunNotifier::new(Vec::new(), WebhookConfig::default());
        notifier
            .notify(&Message::new("A sentence worth sharing today.", 1, 14))
            .unwrap();

        let output = String::from_utf8(notifier.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value["embeds"][0]["description"],
            "**A sentence worth sharing today.**"
        );
        assert_eq!(value["embeds"][0]["footer"]["text"], "1/14");
    }
}
