//! Notification service: turns change notices into journal entries, log
//! lines and outgoing messages.
//!
//! Actual delivery goes through a [`Messenger`]. The default
//! [`TracingMessenger`] only logs what it would have sent; real email or SMS
//! gateways plug in behind the same trait.

use crate::metrics::NOTIFICATIONS_DELIVERED;
use eventdesk_core::error::ObserverError;
use eventdesk_core::observer::{ChangeKind, ChangeObserver, Subject};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Outgoing message could not be delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// Email was not sent
    #[error("Email '{subject}' not delivered: {reason}")]
    Email {
        /// Subject line
        subject: String,
        /// Failure reason
        reason: String,
    },

    /// SMS was not sent
    #[error("SMS to {recipient} not delivered: {reason}")]
    Sms {
        /// Addressee
        recipient: String,
        /// Failure reason
        reason: String,
    },
}

/// Outgoing message capability.
pub trait Messenger: Send + Sync {
    /// Send an announcement email.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Email`] if the message could not be sent.
    fn send_email(&self, subject: &str, body: &str) -> Result<(), DeliveryError>;

    /// Send a short message to one recipient.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Sms`] if the message could not be sent.
    fn send_sms(&self, recipient: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Messenger that logs instead of sending.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMessenger;

impl Messenger for TracingMessenger {
    fn send_email(&self, subject: &str, body: &str) -> Result<(), DeliveryError> {
        tracing::info!(subject, body, "Email sent");
        Ok(())
    }

    fn send_sms(&self, recipient: &str, body: &str) -> Result<(), DeliveryError> {
        tracing::info!(recipient, body, "SMS sent");
        Ok(())
    }
}

/// Observer that journals every notice and forwards it through a
/// [`Messenger`].
///
/// - Event updates send an email announcing the change.
/// - Registration status changes send an SMS to the participant.
///
/// A delivery failure is reported as an [`ObserverError`], so it reaches
/// whoever triggered the change.
pub struct NotificationService {
    messenger: Arc<dyn Messenger>,
    journal: Mutex<Vec<String>>,
}

impl NotificationService {
    /// Name reported in observer errors.
    pub const NAME: &'static str = "notification-service";

    /// Service sending through `messenger`.
    #[must_use]
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self {
            messenger,
            journal: Mutex::new(Vec::new()),
        }
    }

    /// Every journal line so far, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<String> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, line: String) {
        tracing::info!(notice = %line, "Notification recorded");
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }

    fn delivery_failed(err: &DeliveryError) -> ObserverError {
        tracing::error!(error = %err, "Notification delivery failed");
        ObserverError::new(Self::NAME, err.to_string())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(Arc::new(TracingMessenger))
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("journal_len", &self.journal.lock().map_or(0, |j| j.len()))
            .finish_non_exhaustive()
    }
}

impl ChangeObserver for NotificationService {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_change(&self, subject: Subject<'_>, kind: ChangeKind) -> Result<(), ObserverError> {
        match (subject, kind) {
            (Subject::Event(event), ChangeKind::EventUpdated) => {
                self.record(format!(
                    "[NOTIFICATION] Event '{}' was updated: {}",
                    event.name(),
                    event.description()
                ));
                self.messenger
                    .send_email(
                        &format!("Event update: {}", event.name()),
                        &format!("The event '{}' has been updated.", event.name()),
                    )
                    .map_err(|err| Self::delivery_failed(&err))?;
            }
            (Subject::Registration(registration), ChangeKind::RegistrationStatusChanged) => {
                let status = if registration.is_approved() {
                    "approved"
                } else {
                    "pending"
                };
                let participant = registration.participant();
                let event_name = registration.event().read().name().to_string();

                self.record(format!(
                    "[NOTIFICATION] Registration of '{}' for '{event_name}' is now {status}.",
                    participant.name()
                ));
                self.messenger
                    .send_sms(
                        participant.email(),
                        &format!("Your registration for {event_name} is {status}."),
                    )
                    .map_err(|err| Self::delivery_failed(&err))?;
            }
            (subject, kind) => {
                self.record(format!(
                    "[NOTIFICATION] {} reported a change of type {kind}",
                    subject.label()
                ));
            }
        }

        metrics::counter!(NOTIFICATIONS_DELIVERED, "kind" => kind.as_str()).increment(1);
        Ok(())
    }
}
