//! Registrations of participants for events.
//!
//! A [`Registration`] ties one participant to one event and carries the
//! [`ValidationRule`] that decides its approval. Approval only changes when
//! [`Registration::evaluate`] is called; swapping the rule does not
//! re-evaluate.

use crate::error::ObserverError;
use crate::event::SharedEvent;
use crate::observer::{ChangeKind, ChangeObserver, ObserverList, Subject};
use crate::participant::Participant;
use crate::validation::ValidationRule;
use std::sync::Arc;

/// One participant registered for one event.
#[derive(Debug)]
pub struct Registration {
    participant: Arc<Participant>,
    event: SharedEvent,
    rule: Arc<dyn ValidationRule>,
    approved: bool,
    observers: ObserverList,
}

impl Registration {
    /// Create a pending registration.
    #[must_use]
    pub fn new(
        participant: Arc<Participant>,
        event: SharedEvent,
        rule: Arc<dyn ValidationRule>,
    ) -> Self {
        Self {
            participant,
            event,
            rule,
            approved: false,
            observers: ObserverList::new(),
        }
    }

    /// The registered participant.
    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// The event registered for.
    #[must_use]
    pub const fn event(&self) -> &SharedEvent {
        &self.event
    }

    /// Outcome of the last evaluation. `false` until evaluated.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }

    /// Name of the attached rule.
    #[must_use]
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// Replace the validation rule. Approval is left as it was.
    pub fn set_rule(&mut self, rule: Arc<dyn ValidationRule>) {
        tracing::debug!(
            participant_id = %self.participant.id(),
            from = self.rule.name(),
            to = rule.name(),
            "Validation rule replaced"
        );
        self.rule = rule;
    }

    /// Run the current rule and store the result.
    ///
    /// Subscribers are told about the change only when approval actually
    /// flips.
    ///
    /// # Errors
    ///
    /// Returns the first observer failure. The new approval is already
    /// stored at that point.
    pub fn evaluate(&mut self) -> Result<bool, ObserverError> {
        let previous = self.approved;
        self.approved = self.rule.evaluate(self);

        if self.approved != previous {
            tracing::info!(
                participant_id = %self.participant.id(),
                event_id = %self.event.id(),
                rule = self.rule.name(),
                approved = self.approved,
                "Registration status changed"
            );
            self.observers
                .notify(Subject::Registration(self), ChangeKind::RegistrationStatusChanged)?;
        }
        Ok(self.approved)
    }

    /// Subscribe an observer. Returns `false` if it already was.
    pub fn subscribe(&mut self, observer: Arc<dyn ChangeObserver>) -> bool {
        self.observers.subscribe(observer)
    }

    /// Unsubscribe an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, observer: &Arc<dyn ChangeObserver>) -> bool {
        self.observers.unsubscribe(observer)
    }

    /// Current subscribers.
    #[must_use]
    pub const fn observers(&self) -> &ObserverList {
        &self.observers
    }
}
