//! # EventDesk Testing
//!
//! Testing utilities and helpers for EventDesk.
//!
//! This crate provides:
//! - Recording and failing change observers
//! - Recording and failing messengers
//! - Fixture dates, field sets and events
//! - A Given-When-Then builder for access checks ([`AccessTest`])
//! - proptest strategies for domain inputs
//!
//! ## Example
//!
//! ```
//! use eventdesk_core::{ChangeKind, EventFactory, EventKind};
//! use eventdesk_testing::{fixtures, mocks::RecordingObserver};
//! use std::sync::Arc;
//!
//! let factory = EventFactory::default();
//! let mut event = fixtures::event(&factory, EventKind::Seminar, "Blockchain 101");
//! let recorder = Arc::new(RecordingObserver::new("recorder"));
//! event.subscribe(recorder.clone());
//!
//! event.update_description("New agenda").unwrap();
//! assert_eq!(recorder.kinds(), vec![ChangeKind::EventUpdated]);
//! ```

/// Given-When-Then testing of detail lookups
pub mod access_test;

pub use access_test::AccessTest;

/// Mock observers and messengers.
pub mod mocks {
    use eventdesk_core::error::ObserverError;
    use eventdesk_core::observer::{ChangeKind, ChangeObserver, Subject};
    use eventdesk_runtime::notification::{DeliveryError, Messenger};
    use std::sync::{Arc, Mutex, PoisonError};

    /// One notice as seen by a [`RecordingObserver`].
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Notice {
        /// Name of the observer that received it
        pub observer: String,
        /// Label of the subject
        pub subject: String,
        /// What changed
        pub kind: ChangeKind,
    }

    /// Notice log that several recorders can append to, preserving the
    /// overall delivery order.
    pub type NoticeLog = Arc<Mutex<Vec<Notice>>>;

    /// Observer that records every notice it receives.
    #[derive(Debug)]
    pub struct RecordingObserver {
        name: String,
        log: NoticeLog,
    }

    impl RecordingObserver {
        /// Recorder with its own log.
        #[must_use]
        pub fn new(name: impl Into<String>) -> Self {
            Self::sharing(name, &NoticeLog::default())
        }

        /// Recorder appending to `log`.
        #[must_use]
        pub fn sharing(name: impl Into<String>, log: &NoticeLog) -> Self {
            Self {
                name: name.into(),
                log: Arc::clone(log),
            }
        }

        /// Notices received by this recorder, in order.
        #[must_use]
        pub fn notices(&self) -> Vec<Notice> {
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|notice| notice.observer == self.name)
                .cloned()
                .collect()
        }

        /// Change kinds received by this recorder, in order.
        #[must_use]
        pub fn kinds(&self) -> Vec<ChangeKind> {
            self.notices().into_iter().map(|notice| notice.kind).collect()
        }

        /// Number of notices received.
        #[must_use]
        pub fn count(&self) -> usize {
            self.notices().len()
        }
    }

    impl ChangeObserver for RecordingObserver {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_change(&self, subject: Subject<'_>, kind: ChangeKind) -> Result<(), ObserverError> {
            self.log
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Notice {
                    observer: self.name.clone(),
                    subject: subject.label(),
                    kind,
                });
            Ok(())
        }
    }

    /// Observer that rejects every notice.
    #[derive(Clone, Debug)]
    pub struct FailingObserver {
        name: String,
        reason: String,
    }

    impl FailingObserver {
        /// Observer failing with `reason`.
        #[must_use]
        pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                reason: reason.into(),
            }
        }
    }

    impl ChangeObserver for FailingObserver {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_change(&self, _subject: Subject<'_>, _kind: ChangeKind) -> Result<(), ObserverError> {
            Err(ObserverError::new(self.name.clone(), self.reason.clone()))
        }
    }

    /// Messenger that keeps every message instead of sending it.
    #[derive(Debug, Default)]
    pub struct RecordingMessenger {
        emails: Mutex<Vec<(String, String)>>,
        messages: Mutex<Vec<(String, String)>>,
    }

    impl RecordingMessenger {
        /// Empty messenger.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// `(subject, body)` of every email, in order.
        #[must_use]
        pub fn emails(&self) -> Vec<(String, String)> {
            self.emails
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// `(recipient, body)` of every SMS, in order.
        #[must_use]
        pub fn sms(&self) -> Vec<(String, String)> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl Messenger for RecordingMessenger {
        fn send_email(&self, subject: &str, body: &str) -> Result<(), DeliveryError> {
            self.emails
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((subject.to_string(), body.to_string()));
            Ok(())
        }

        fn send_sms(&self, recipient: &str, body: &str) -> Result<(), DeliveryError> {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((recipient.to_string(), body.to_string()));
            Ok(())
        }
    }

    /// Messenger whose every delivery fails.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct FailingMessenger;

    impl Messenger for FailingMessenger {
        fn send_email(&self, subject: &str, _body: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError::Email {
                subject: subject.to_string(),
                reason: "mail server unavailable".to_string(),
            })
        }

        fn send_sms(&self, recipient: &str, _body: &str) -> Result<(), DeliveryError> {
            Err(DeliveryError::Sms {
                recipient: recipient.to_string(),
                reason: "sms gateway unavailable".to_string(),
            })
        }
    }
}

/// Fixture dates, field sets and events.
pub mod fixtures {
    use eventdesk_core::{Event, EventFactory, EventKind, FieldSet, NaiveDate};

    /// Build a date from literal parts.
    ///
    /// # Panics
    ///
    /// Panics if the parts do not form a calendar date.
    #[must_use]
    #[allow(clippy::expect_used)] // Fixture dates are literals
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("fixture date should be valid")
    }

    /// Default date for events that don't care (2025-11-15).
    #[must_use]
    pub fn test_date() -> NaiveDate {
        date(2025, 11, 15)
    }

    /// Complete field set for `kind`.
    #[must_use]
    pub fn fields_for(kind: EventKind) -> FieldSet {
        match kind {
            EventKind::Conference => FieldSet::new().capacity(100).principal_speaker("Mr. Coder"),
            EventKind::Hackathon => FieldSet::new().sponsor("DevNet").duration_hours(24),
            EventKind::Seminar => FieldSet::new().domain("Finance"),
        }
    }

    /// Event of `kind` named `name`, created through `factory` with
    /// [`fields_for`] and [`test_date`].
    ///
    /// # Panics
    ///
    /// Panics if the factory rejects the fixture fields.
    #[must_use]
    #[allow(clippy::expect_used)] // Fixture field sets are complete
    pub fn event(factory: &EventFactory, kind: EventKind, name: &str) -> Event {
        factory
            .create_kind(
                kind,
                name,
                format!("{name} description"),
                test_date(),
                &fields_for(kind),
            )
            .expect("fixture fields should be complete")
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use eventdesk_core::{DetailKind, EventKind, FieldSet, MediumKind};
    use proptest::prelude::*;

    /// Any event kind.
    pub fn event_kind() -> impl Strategy<Value = EventKind> {
        prop::sample::select(EventKind::ALL.to_vec())
    }

    /// Any detail level.
    pub fn detail_kind() -> impl Strategy<Value = DetailKind> {
        prop_oneof![Just(DetailKind::Summary), Just(DetailKind::Full)]
    }

    /// Any medium.
    pub fn medium_kind() -> impl Strategy<Value = MediumKind> {
        prop_oneof![Just(MediumKind::Web), Just(MediumKind::Text)]
    }

    /// Non-blank single-line text.
    pub fn text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 ]{0,30}"
    }

    /// Field set carrying every key any kind needs.
    pub fn complete_fields() -> impl Strategy<Value = FieldSet> {
        (0u32..500, text(), text(), 1u32..96, text()).prop_map(
            |(capacity, speaker, sponsor, hours, domain)| {
                FieldSet::new()
                    .capacity(capacity)
                    .principal_speaker(speaker)
                    .sponsor(sponsor)
                    .duration_hours(hours)
                    .domain(domain)
            },
        )
    }
}

/// Install a test-friendly tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `warn`. Calling this more
/// than once is harmless.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FailingMessenger, FailingObserver, RecordingMessenger, RecordingObserver};

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::{ChangeKind, ChangeObserver, EventFactory, EventKind, Subject};

    #[test]
    fn shared_log_keeps_delivery_order() {
        let log = mocks::NoticeLog::default();
        let first = RecordingObserver::sharing("first", &log);
        let second = RecordingObserver::sharing("second", &log);
        let event = fixtures::event(&EventFactory::default(), EventKind::Seminar, "Talk");

        let _ = second.on_change(Subject::Event(&event), ChangeKind::EventUpdated);
        let _ = first.on_change(Subject::Event(&event), ChangeKind::EventUpdated);

        let order: Vec<String> = log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|notice| notice.observer.clone())
            .collect();
        assert_eq!(order, vec!["second", "first"]);
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn failing_observer_reports_its_name() {
        let observer = FailingObserver::new("audit", "disk full");
        let event = fixtures::event(&EventFactory::default(), EventKind::Seminar, "Talk");

        let err = observer.on_change(Subject::Event(&event), ChangeKind::EventUpdated);

        assert_eq!(err.err().map(|e| e.observer), Some("audit".to_string()));
    }
}
