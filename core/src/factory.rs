//! Event factory.
//!
//! Turns a kind tag plus a loose [`FieldSet`] into a typed [`Event`] with a
//! fresh identifier. Fields required by the kind are checked before an
//! identifier is allocated, so a failed call leaves no trace.

use crate::error::{EventError, Result};
use crate::event::{Event, EventDetails, EventKind};
use crate::ids::{EventId, IdSequence};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind-specific fields supplied when creating an event.
///
/// Every key is optional here; the factory decides which ones the kind
/// needs. Deserializes from JSON objects with snake_case keys.
///
/// # Examples
///
/// ```
/// use eventdesk_core::factory::FieldSet;
///
/// let fields = FieldSet::new().sponsor("DevNet").duration_hours(24);
/// assert_eq!(fields.sponsor.as_deref(), Some("DevNet"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    /// Conference seat count
    pub capacity: Option<u32>,
    /// Conference headline speaker
    pub principal_speaker: Option<String>,
    /// Hackathon sponsor
    pub sponsor: Option<String>,
    /// Hackathon length in hours
    pub duration_hours: Option<u32>,
    /// Seminar subject area
    pub domain: Option<String>,
}

impl FieldSet {
    /// Empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seat count.
    #[must_use]
    pub const fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the headline speaker.
    #[must_use]
    pub fn principal_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.principal_speaker = Some(speaker.into());
        self
    }

    /// Set the sponsor.
    #[must_use]
    pub fn sponsor(mut self, sponsor: impl Into<String>) -> Self {
        self.sponsor = Some(sponsor.into());
        self
    }

    /// Set the duration in hours.
    #[must_use]
    pub const fn duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    /// Set the seminar domain.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Parse a field set from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidFieldSet`] if the text is not a JSON
    /// object with fields of the expected types.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| EventError::InvalidFieldSet(err.to_string()))
    }

    /// Extract the fields `kind` needs.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingField`] naming the first absent key.
    pub fn to_details(&self, kind: EventKind) -> Result<EventDetails> {
        let missing = |field| EventError::MissingField { kind, field };

        Ok(match kind {
            EventKind::Conference => EventDetails::Conference {
                capacity: self.capacity.ok_or_else(|| missing("capacity"))?,
                principal_speaker: self
                    .principal_speaker
                    .clone()
                    .ok_or_else(|| missing("principal_speaker"))?,
            },
            EventKind::Hackathon => EventDetails::Hackathon {
                sponsor: self.sponsor.clone().ok_or_else(|| missing("sponsor"))?,
                duration_hours: self
                    .duration_hours
                    .ok_or_else(|| missing("duration_hours"))?,
            },
            EventKind::Seminar => EventDetails::Seminar {
                domain: self.domain.clone().ok_or_else(|| missing("domain"))?,
            },
        })
    }
}

/// Builds events and assigns their identifiers.
///
/// Clones share one [`IdSequence`], so identifiers stay unique across every
/// factory derived from the same allocator.
#[derive(Clone, Debug)]
pub struct EventFactory {
    ids: Arc<IdSequence>,
}

impl EventFactory {
    /// Factory drawing identifiers from `ids`.
    #[must_use]
    pub const fn new(ids: Arc<IdSequence>) -> Self {
        Self { ids }
    }

    /// The allocator this factory draws from.
    #[must_use]
    pub const fn ids(&self) -> &Arc<IdSequence> {
        &self.ids
    }

    /// Create an event from a kind tag.
    ///
    /// # Errors
    ///
    /// - [`EventError::UnknownEventKind`] if `kind` is not a known tag
    /// - [`EventError::MissingField`] if `fields` lacks a key the kind needs
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use eventdesk_core::error::EventError;
    /// use eventdesk_core::factory::{EventFactory, FieldSet};
    ///
    /// let factory = EventFactory::default();
    /// let date = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
    ///
    /// let seminar = factory
    ///     .create("Seminar", "Blockchain 101", "Intro", date, &FieldSet::new().domain("Finance"))
    ///     .unwrap();
    /// assert_eq!(seminar.id().as_str(), "EV001");
    ///
    /// let err = factory
    ///     .create("Workshop", "Drawing", "Sketching", date, &FieldSet::new())
    ///     .unwrap_err();
    /// assert_eq!(err, EventError::UnknownEventKind("Workshop".into()));
    /// ```
    pub fn create(
        &self,
        kind: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        fields: &FieldSet,
    ) -> Result<Event> {
        let kind = kind.parse::<EventKind>().inspect_err(|err| {
            tracing::warn!(error = %err, "Rejected event creation");
        })?;
        self.create_kind(kind, name, description, date, fields)
    }

    /// Create an event of an already-parsed kind.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingField`] if `fields` lacks a key the kind
    /// needs.
    pub fn create_kind(
        &self,
        kind: EventKind,
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        fields: &FieldSet,
    ) -> Result<Event> {
        let details = fields.to_details(kind)?;
        let id = EventId::new(self.ids.next_id());
        let event = Event::new(id, name.into(), description.into(), date, details);

        tracing::info!(event_id = %event.id(), %kind, name = event.name(), "Event created");
        Ok(event)
    }
}

impl Default for EventFactory {
    /// Factory with its own `EV`-prefixed, three-digit allocator.
    fn default() -> Self {
        Self::new(Arc::new(IdSequence::new("EV", 3)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[allow(clippy::expect_used)] // Panics: hardcoded date is valid
    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date")
    }

    #[test]
    fn creates_each_kind_with_its_fields() {
        let factory = EventFactory::default();
        let fields = FieldSet::new()
            .capacity(200)
            .principal_speaker("Dr. Elara Vance")
            .sponsor("TechCorp")
            .duration_hours(48)
            .domain("Finance");

        for kind in EventKind::ALL {
            let event = factory
                .create(kind.as_str(), "Name", "Description", date(), &fields)
                .map_err(|err| err.to_string());
            assert_eq!(event.map(|e| e.kind()), Ok(kind));
        }
    }

    #[test]
    fn missing_field_is_named_and_consumes_no_id() {
        let factory = EventFactory::default();
        let err = factory
            .create(
                "Hackathon",
                "Hack1",
                "Build things",
                date(),
                &FieldSet::new().sponsor("DevNet"),
            )
            .err();

        assert_eq!(
            err,
            Some(EventError::MissingField {
                kind: EventKind::Hackathon,
                field: "duration_hours",
            })
        );
        assert_eq!(factory.ids().allocated(), 0);
    }

    #[test]
    fn unknown_kind_consumes_no_id() {
        let factory = EventFactory::default();
        let err = factory
            .create("Workshop", "Drawing", "Sketching", date(), &FieldSet::new())
            .err();

        assert_eq!(err, Some(EventError::UnknownEventKind("Workshop".to_string())));
        assert_eq!(factory.ids().allocated(), 0);
    }

    #[test]
    fn cloned_factories_share_the_allocator() {
        let first = EventFactory::default();
        let second = first.clone();
        let fields = FieldSet::new().domain("General");

        let a = first.create("Seminar", "A", "a", date(), &fields);
        let b = second.create("Seminar", "B", "b", date(), &fields);

        assert_eq!(a.map(|e| e.id().clone()), Ok(EventId::new("EV001")));
        assert_eq!(b.map(|e| e.id().clone()), Ok(EventId::new("EV002")));
    }

    #[test]
    fn field_set_parses_from_json() {
        let fields = FieldSet::from_json(r#"{ "capacity": 300, "principal_speaker": "Dr. Data" }"#);
        assert_eq!(
            fields,
            Ok(FieldSet::new().capacity(300).principal_speaker("Dr. Data"))
        );
    }

    #[test]
    fn field_set_rejects_wrongly_typed_json() {
        let fields = FieldSet::from_json(r#"{ "capacity": "lots" }"#);
        assert!(matches!(fields, Err(EventError::InvalidFieldSet(_))));
    }

    proptest! {
        #[test]
        fn identifiers_are_pairwise_distinct(kinds in proptest::collection::vec(0usize..3, 1..200)) {
            let factory = EventFactory::default();
            let fields = FieldSet::new()
                .capacity(10)
                .principal_speaker("Speaker")
                .sponsor("Sponsor")
                .duration_hours(12)
                .domain("Domain");

            let mut seen = HashSet::new();
            for index in &kinds {
                let kind = EventKind::ALL[*index];
                let event = factory.create_kind(kind, "E", "D", date(), &fields);
                prop_assert!(event.is_ok());
                if let Ok(event) = event {
                    prop_assert!(seen.insert(event.id().clone()));
                }
            }
            prop_assert_eq!(seen.len(), kinds.len());
        }
    }
}
