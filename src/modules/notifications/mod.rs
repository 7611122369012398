//! Participant notifications.
//!
//! `Notifier` is the outbound seam used when participants are shortlisted. Delivery
//! transports are out of scope; `LogNotifier` renders the message and records it in the
//! application log.

mod templates;

pub use templates::render_shortlisted;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::config::NotificationConfig;
use crate::features::participants::models::Participant;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to render notification template: {0}")]
    Template(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Where a notification goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantContact {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
}

impl From<&Participant> for ParticipantContact {
    fn from(p: &Participant) -> Self {
        Self {
            name: p.name.clone(),
            email_address: p.email_address.clone(),
            phone_number: p.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        contact: &ParticipantContact,
        message: &NotificationMessage,
    ) -> Result<(), DeliveryError>;

    /// Disabled notifiers are skipped before any template is rendered
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Notifier that writes each message to the log instead of a mail transport
pub struct LogNotifier {
    config: NotificationConfig,
}

impl LogNotifier {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(
        &self,
        contact: &ParticipantContact,
        message: &NotificationMessage,
    ) -> Result<(), DeliveryError> {
        if contact.email_address.is_empty() {
            return Err(DeliveryError::Delivery(format!(
                "No email address for participant '{}'",
                contact.name
            )));
        }

        tracing::info!(
            from = %self.config.sender,
            to = %contact.email_address,
            subject = %message.subject,
            "Notification dispatched"
        );
        tracing::debug!("Notification body:\n{}", message.body);

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}
