//! Change notification between domain objects and interested handlers.
//!
//! Events and registrations each own an [`ObserverList`]. When they change
//! they publish a [`ChangeKind`] together with a [`Subject`] borrowing
//! themselves, and every subscribed [`ChangeObserver`] is called in turn.
//!
//! # Delivery
//!
//! - **Synchronous**: `notify` returns once every observer has run.
//! - **Ordered**: observers run in subscription order.
//! - **Fail-fast**: the first observer error is returned to the publisher and
//!   later observers are skipped for that notice.
//! - **Identity-based**: subscribing the same `Arc` twice keeps one entry;
//!   unsubscribing an unknown observer does nothing.
//!
//! # Example
//!
//! ```
//! use eventdesk_core::error::ObserverError;
//! use eventdesk_core::observer::{ChangeKind, ChangeObserver, ObserverList, Subject};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl ChangeObserver for Printer {
//!     fn name(&self) -> &str {
//!         "printer"
//!     }
//!
//!     fn on_change(&self, subject: Subject<'_>, kind: ChangeKind) -> Result<(), ObserverError> {
//!         println!("{kind}: {}", subject.label());
//!         Ok(())
//!     }
//! }
//!
//! let mut list = ObserverList::new();
//! let printer: Arc<dyn ChangeObserver> = Arc::new(Printer);
//! list.subscribe(Arc::clone(&printer));
//! list.subscribe(printer);
//! assert_eq!(list.len(), 1);
//! ```

use crate::error::ObserverError;
use crate::event::Event;
use crate::registration::Registration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// An event's description was rewritten.
    EventUpdated,
    /// A registration's approval flipped.
    RegistrationStatusChanged,
}

impl ChangeKind {
    /// Stable tag for logs and journals.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventUpdated => "event-updated",
            Self::RegistrationStatusChanged => "registration-status-changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The object that changed, borrowed for the duration of the notice.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    /// An event
    Event(&'a Event),
    /// A registration
    Registration(&'a Registration),
}

impl Subject<'_> {
    /// Short human-readable label of the subject.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Subject::Event(event) => format!("event {} ({})", event.id(), event.name()),
            Subject::Registration(registration) => format!(
                "registration of {} for {}",
                registration.participant().name(),
                registration.event().read().name()
            ),
        }
    }
}

/// Anything that wants to hear about changes.
///
/// Handlers get the subject by reference. They must not try to lock the
/// event they are being told about; everything they need is on the subject.
pub trait ChangeObserver: Send + Sync {
    /// Name used in logs and in [`ObserverError`].
    fn name(&self) -> &str;

    /// Handle one change notice.
    ///
    /// # Errors
    ///
    /// Any error is propagated to the caller of the mutation that triggered
    /// the notice and stops delivery to the remaining observers.
    fn on_change(&self, subject: Subject<'_>, kind: ChangeKind) -> Result<(), ObserverError>;
}

/// Ordered, duplicate-free list of observers.
#[derive(Clone, Default)]
pub struct ObserverList {
    observers: Vec<Arc<dyn ChangeObserver>>,
}

impl ObserverList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Append an observer unless that same instance is already subscribed.
    ///
    /// Returns `true` if the observer was added.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Remove an observer if present.
    ///
    /// Returns `true` if the observer was subscribed.
    pub fn unsubscribe(&mut self, observer: &Arc<dyn ChangeObserver>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|existing| !same_observer(existing, observer));
        self.observers.len() != before
    }

    /// Whether this exact observer instance is subscribed.
    #[must_use]
    pub fn contains(&self, observer: &Arc<dyn ChangeObserver>) -> bool {
        self.observers
            .iter()
            .any(|existing| same_observer(existing, observer))
    }

    /// Number of subscribed observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver a notice to every observer in order.
    ///
    /// # Errors
    ///
    /// Returns the first observer error; later observers are not called.
    pub fn notify(&self, subject: Subject<'_>, kind: ChangeKind) -> Result<(), ObserverError> {
        for observer in &self.observers {
            tracing::trace!(observer = observer.name(), %kind, "Delivering change notice");
            observer.on_change(subject, kind)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|observer| observer.name()))
            .finish()
    }
}

// Compare data pointers only; vtable pointers for one type may differ between
// codegen units.
fn same_observer(a: &Arc<dyn ChangeObserver>, b: &Arc<dyn ChangeObserver>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
