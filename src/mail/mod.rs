//! Mail module for recap
//!
//! Dispatches rendered summaries. The default transport is a sandbox outbox that
//! never reaches a real mailbox and hands back a preview locator instead.

mod outbox;
mod relay;

pub use outbox::OutboxMailer;
pub use relay::RelayMailer;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;

/// A message ready to be dispatched
#[derive(Debug, Clone)]
pub struct OutgoingMail<'a> {
    pub recipients: &'a [String],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
}

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub message_id: String,
    /// Where a human can look at the message
    pub preview_url: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail<'_>) -> Result<Delivery>;
}

/// Build a mailer from runtime settings.
pub fn build_mailer(settings: &Settings) -> Result<Box<dyn Mailer>> {
    match settings.mail.transport.to_lowercase().as_str() {
        "outbox" => Ok(Box::new(OutboxMailer::from_settings(settings))),
        "relay" => Ok(Box::new(RelayMailer::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported mail.transport '{}'. Supported transports: outbox, relay",
            other
        ),
    }
}
