//! Event entities.
//!
//! An [`Event`] carries the fields every kind shares (identifier, name,
//! description, date) plus an [`EventDetails`] variant with the fields of its
//! kind. Events are only built by the [`EventFactory`](crate::factory::EventFactory),
//! which assigns the identifier.
//!
//! Events are shared between the catalog, registrations and callers through
//! [`SharedEvent`], a reference-counted handle with a read/write lock.

use crate::error::{EventError, ObserverError};
use crate::ids::EventId;
use crate::observer::{ChangeKind, ChangeObserver, ObserverList, Subject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Date format used in every rendered string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three kinds of event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Talks with a seat limit and a headline speaker
    Conference,
    /// Sponsored build sessions, restricted to registered participants
    Hackathon,
    /// Topic-focused sessions
    Seminar,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Conference, Self::Hackathon, Self::Seminar];

    /// The tag this kind is created from.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Hackathon => "Hackathon",
            Self::Seminar => "Seminar",
        }
    }

    /// Whether details of events of this kind are only shown to users
    /// registered for them.
    #[must_use]
    pub const fn requires_registration_gate(self) -> bool {
        matches!(self, Self::Hackathon)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = EventError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| EventError::UnknownEventKind(tag.to_string()))
    }
}

/// Kind-specific fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EventDetails {
    /// Conference fields
    Conference {
        /// Seats still available
        capacity: u32,
        /// Headline speaker
        principal_speaker: String,
    },
    /// Hackathon fields
    Hackathon {
        /// Sponsoring organisation
        sponsor: String,
        /// Length of the hackathon
        duration_hours: u32,
    },
    /// Seminar fields
    Seminar {
        /// Subject area
        domain: String,
    },
}

impl EventDetails {
    /// The kind these fields belong to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Conference { .. } => EventKind::Conference,
            Self::Hackathon { .. } => EventKind::Hackathon,
            Self::Seminar { .. } => EventKind::Seminar,
        }
    }
}

/// A schedulable event.
#[derive(Debug)]
pub struct Event {
    id: EventId,
    name: String,
    description: String,
    date: NaiveDate,
    details: EventDetails,
    observers: ObserverList,
}

impl Event {
    pub(crate) fn new(
        id: EventId,
        name: String,
        description: String,
        date: NaiveDate,
        details: EventDetails,
    ) -> Self {
        Self {
            id,
            name,
            description,
            date,
            details,
            observers: ObserverList::new(),
        }
    }

    /// Identifier assigned by the factory.
    #[must_use]
    pub const fn id(&self) -> &EventId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Scheduled date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.details.kind()
    }

    /// Kind-specific fields.
    #[must_use]
    pub const fn fields(&self) -> &EventDetails {
        &self.details
    }

    /// Seat count, for conferences.
    #[must_use]
    pub const fn capacity(&self) -> Option<u32> {
        match self.details {
            EventDetails::Conference { capacity, .. } => Some(capacity),
            _ => None,
        }
    }

    /// Whether details are restricted to registered users.
    #[must_use]
    pub const fn requires_registration_gate(&self) -> bool {
        self.kind().requires_registration_gate()
    }

    /// The date as `YYYY-MM-DD`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Base line shared by every kind: identifier, name and date.
    #[must_use]
    pub fn base_info(&self) -> String {
        format!(
            "ID: {}, Name: {}, Date: {}",
            self.id,
            self.name,
            self.formatted_date()
        )
    }

    /// Full detail string: base info, then the kind and its fields, then the
    /// description.
    #[must_use]
    pub fn details(&self) -> String {
        let specific = match &self.details {
            EventDetails::Conference {
                capacity,
                principal_speaker,
            } => format!("  Capacity: {capacity}\n  Speaker: {principal_speaker}"),
            EventDetails::Hackathon {
                sponsor,
                duration_hours,
            } => format!("  Sponsor: {sponsor}\n  Duration: {duration_hours}h"),
            EventDetails::Seminar { domain } => format!("  Domain: {domain}"),
        };

        format!(
            "{}\n  Type: {}\n{specific}\n  Description: {}",
            self.base_info(),
            self.kind(),
            self.description
        )
    }

    /// Overwrite the description and notify every subscriber.
    ///
    /// Subscribers are notified even if the text did not change.
    ///
    /// # Errors
    ///
    /// Returns the first observer failure. The description is already
    /// updated at that point.
    pub fn update_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ObserverError> {
        self.description = description.into();
        tracing::info!(event_id = %self.id, "Event description updated");
        self.observers
            .notify(Subject::Event(self), ChangeKind::EventUpdated)
    }

    /// Set the remaining seat count of a conference.
    ///
    /// Returns `false` and changes nothing for other kinds. No notice is
    /// published; registrations pick the new value up on their next
    /// evaluation.
    pub fn set_capacity(&mut self, seats: u32) -> bool {
        match &mut self.details {
            EventDetails::Conference { capacity, .. } => {
                *capacity = seats;
                tracing::debug!(event_id = %self.id, seats, "Conference capacity changed");
                true
            }
            _ => false,
        }
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

/// Shared, lockable handle to an [`Event`].
///
/// Cloning the handle shares the event. Poisoned locks are recovered, since
/// every mutation leaves the event in a valid state.
#[derive(Clone, Debug)]
pub struct SharedEvent(Arc<RwLock<Event>>);

impl SharedEvent {
    /// Wrap an event for sharing.
    #[must_use]
    pub fn new(event: Event) -> Self {
        Self(Arc::new(RwLock::new(event)))
    }

    /// Borrow the event for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Event> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Borrow the event for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, Event> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the event's identifier.
    #[must_use]
    pub fn id(&self) -> EventId {
        self.read().id().clone()
    }

    /// Whether both handles point to the same event.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Event> for SharedEvent {
    fn from(event: Event) -> Self {
        Self::new(event)
    }
}
