//! Registration validation rules.
//!
//! A [`ValidationRule`] answers one question: should this registration be
//! approved? Rules hold no state and have no side effects, so one instance
//! can back any number of registrations.

use crate::event::EventKind;
use crate::registration::Registration;
use std::fmt;
use std::sync::Arc;

/// Policy deciding whether a registration is acceptable.
pub trait ValidationRule: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether `registration` should be approved.
    fn evaluate(&self, registration: &Registration) -> bool;
}

impl fmt::Debug for dyn ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hackathons are open to students only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HackathonRule;

impl ValidationRule for HackathonRule {
    fn name(&self) -> &'static str {
        "hackathon"
    }

    fn evaluate(&self, registration: &Registration) -> bool {
        registration.participant().is_student()
    }
}

/// Conferences accept registrations while seats remain.
///
/// An event without a seat count (any non-conference) is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConferenceRule;

impl ValidationRule for ConferenceRule {
    fn name(&self) -> &'static str {
        "conference"
    }

    fn evaluate(&self, registration: &Registration) -> bool {
        registration
            .event()
            .read()
            .capacity()
            .is_some_and(|seats| seats > 0)
    }
}

/// Approves everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneralRule;

impl ValidationRule for GeneralRule {
    fn name(&self) -> &'static str {
        "general"
    }

    fn evaluate(&self, _registration: &Registration) -> bool {
        true
    }
}

/// The rule attached by default when registering for an event of `kind`.
#[must_use]
pub fn default_rule_for(kind: EventKind) -> Arc<dyn ValidationRule> {
    match kind {
        EventKind::Conference => Arc::new(ConferenceRule),
        EventKind::Hackathon => Arc::new(HackathonRule),
        EventKind::Seminar => Arc::new(GeneralRule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_follow_the_event_kind() {
        assert_eq!(default_rule_for(EventKind::Conference).name(), "conference");
        assert_eq!(default_rule_for(EventKind::Hackathon).name(), "hackathon");
        assert_eq!(default_rule_for(EventKind::Seminar).name(), "general");
    }
}
