//! Shared in-memory store of events keyed by identifier.

use crate::event::SharedEvent;
use crate::ids::EventId;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Events by identifier.
///
/// Clones share the same map: the owner inserts, lookup services holding a
/// clone only read. Iteration is in identifier order.
#[derive(Clone, Debug, Default)]
pub struct EventCatalog {
    events: Arc<RwLock<BTreeMap<EventId, SharedEvent>>>,
}

impl EventCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an event under its identifier, returning any event it replaced.
    pub fn insert(&self, event: SharedEvent) -> Option<SharedEvent> {
        let id = event.id();
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, event)
    }

    /// Look an event up.
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<SharedEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Whether an event with this identifier is stored.
    #[must_use]
    pub fn contains(&self, id: &EventId) -> bool {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Every stored event, in identifier order.
    #[must_use]
    pub fn events(&self) -> Vec<SharedEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{EventFactory, FieldSet};
    use chrono::NaiveDate;

    #[test]
    #[allow(clippy::expect_used)] // Panics: fixture fields are complete
    fn clones_share_entries() {
        let catalog = EventCatalog::new();
        let reader = catalog.clone();
        let event = EventFactory::default()
            .create(
                "Seminar",
                "Open Seminar",
                "General overview",
                NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
                &FieldSet::new().domain("General"),
            )
            .expect("seminar fields are complete");

        assert!(catalog.insert(event.into()).is_none());

        let id = EventId::new("EV001");
        assert!(reader.contains(&id));
        assert_eq!(reader.get(&id).map(|e| e.read().name().to_string()), Some("Open Seminar".to_string()));
        assert_eq!(reader.len(), 1);
        assert!(reader.get(&EventId::new("EV404")).is_none());
    }
}
