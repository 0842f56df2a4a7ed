//! Outbound notification boundary.
//!
//! Email dispatch is an external collaborator: the core hands over a
//! recipient, subject and body and gets no delivery confirmation back.

pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use smtp::{MockNotifier, SentNotification, SmtpNotifier};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notifier not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Send error: {0}")]
    SendFailed(String),
}

/// Fire-and-forget notification sink.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}
