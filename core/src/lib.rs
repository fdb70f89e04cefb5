//! # EventDesk Core
//!
//! In-memory domain model for running conferences, hackathons and seminars:
//! creating events, registering participants, validating registrations,
//! publishing change notices, rendering event details, and guarding detail
//! lookups behind an authorization check.
//!
//! ## Building Blocks
//!
//! - **Event factory** ([`factory`]): typed events from a kind tag and a
//!   field set, with identifiers from an explicit allocator ([`ids`])
//! - **Validation rules** ([`validation`]): pluggable approval policies
//! - **Registrations** ([`registration`]): participant × event × rule,
//!   re-evaluated on demand
//! - **Change notification** ([`observer`]): ordered, synchronous,
//!   fail-fast delivery to subscribed handlers
//! - **Rendering** ([`render`]): detail level × output medium, composed
//!   rather than multiplied
//! - **Access control** ([`access`]): login and registration checks in
//!   front of a plain catalog lookup
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eventdesk_core::access::{
//!     AuthorizationService, DetailsOutcome, EventDetailsService, GuardedCatalogService,
//!     SecretMarker,
//! };
//! use eventdesk_core::catalog::EventCatalog;
//! use eventdesk_core::factory::{EventFactory, FieldSet};
//! use eventdesk_core::ids::ParticipantId;
//! use std::sync::Arc;
//!
//! let factory = EventFactory::default();
//! let catalog = EventCatalog::new();
//! let event = factory
//!     .create(
//!         "Hackathon",
//!         "Hack1",
//!         "Build web apps",
//!         NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
//!         &FieldSet::new().sponsor("DevNet").duration_hours(24),
//!     )
//!     .unwrap();
//! let id = event.id().clone();
//! catalog.insert(event.into());
//!
//! let auth = Arc::new(AuthorizationService::new());
//! let service = GuardedCatalogService::new(catalog, Arc::clone(&auth), SecretMarker::default());
//! let user = ParticipantId::new("P001");
//!
//! assert_eq!(service.get_details(&id, Some(&user)), DetailsOutcome::RegistrationRequired);
//! auth.register(&user, &id);
//! assert!(service.get_details(&id, Some(&user)).is_found());
//! ```

pub mod access;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod factory;
pub mod ids;
pub mod observer;
pub mod participant;
pub mod registration;
pub mod render;
pub mod validation;

// Re-export commonly used types
pub use access::{
    AuthorizationService, CatalogService, DetailsOutcome, EventDetailsService,
    GuardedCatalogService, SecretMarker,
};
pub use catalog::EventCatalog;
pub use chrono::NaiveDate;
pub use config::{ConfigError, DeskConfig};
pub use error::{EventError, ObserverError};
pub use event::{Event, EventDetails, EventKind, SharedEvent};
pub use factory::{EventFactory, FieldSet};
pub use ids::{EventId, IdSequence, ParticipantId};
pub use observer::{ChangeKind, ChangeObserver, ObserverList, Subject};
pub use participant::Participant;
pub use registration::Registration;
pub use render::{
    DetailKind, DetailLevel, MediumKind, RenderMedium, RenderSelectionError, Rendering,
};
pub use validation::{default_rule_for, ConferenceRule, GeneralRule, HackathonRule, ValidationRule};
