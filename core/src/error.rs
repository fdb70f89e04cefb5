//! Error types for the event domain model.
//!
//! Only genuinely exceptional paths are errors. A lookup that finds nothing,
//! or an access check that says no, is reported through
//! [`DetailsOutcome`](crate::access::DetailsOutcome) instead.

use crate::event::EventKind;
use thiserror::Error;

/// Result type alias for event construction.
pub type Result<T> = std::result::Result<T, EventError>;

/// Failures raised while building events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The kind tag does not name a known event kind.
    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),

    /// A field required by the event kind was not supplied.
    #[error("{kind} requires field '{field}'")]
    MissingField {
        /// Kind being built
        kind: EventKind,
        /// Key of the missing field
        field: &'static str,
    },

    /// A field set could not be parsed.
    #[error("Invalid field set: {0}")]
    InvalidFieldSet(String),
}

/// A change observer failed while handling a notice.
///
/// Returned to whoever triggered the change. Observers subscribed after the
/// failing one do not receive that notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Observer '{observer}' failed: {reason}")]
pub struct ObserverError {
    /// Name of the failing observer
    pub observer: String,
    /// What went wrong
    pub reason: String,
}

impl ObserverError {
    /// Build an error for the named observer.
    #[must_use]
    pub fn new(observer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            observer: observer.into(),
            reason: reason.into(),
        }
    }
}
