//! The event desk: one place to create events, enroll participants,
//! handle registrations, render events and answer detail lookups.
//!
//! The desk owns the event catalog, the participant roster, the
//! registration list and the login/registration bookkeeping. Every event
//! and registration it creates is subscribed to its
//! [`NotificationService`], so updates and approval changes end up in the
//! journal.
//!
//! # Example
//!
//! ```
//! use eventdesk_core::render::{DetailKind, MediumKind};
//! use eventdesk_core::{FieldSet, NaiveDate};
//! use eventdesk_runtime::EventDesk;
//!
//! # fn main() -> Result<(), eventdesk_runtime::DeskError> {
//! let mut desk = EventDesk::default();
//! let date = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap_or_default();
//!
//! let seminar = desk.create_event(
//!     "Seminar",
//!     "Blockchain 101",
//!     "Introduction to distributed ledgers",
//!     date,
//!     &FieldSet::new().domain("Finance"),
//! )?;
//! let alice = desk.add_participant("Alice", "alice@example.com", true)?;
//! let position = desk.register(&alice, &seminar)?;
//!
//! assert!(desk.validate_registration(position)?);
//! assert!(desk.render(&seminar, DetailKind::Summary, MediumKind::Text)?.contains("Blockchain 101"));
//! # Ok(())
//! # }
//! ```

use crate::metrics::{ACCESS_DENIED, EVENTS_CREATED};
use crate::notification::{Messenger, NotificationService};
use eventdesk_core::access::{
    AuthorizationService, DetailsOutcome, EventDetailsService, GuardedCatalogService,
};
use eventdesk_core::catalog::EventCatalog;
use eventdesk_core::config::{ConfigError, DeskConfig};
use eventdesk_core::error::{EventError, ObserverError};
use eventdesk_core::event::SharedEvent;
use eventdesk_core::factory::{EventFactory, FieldSet};
use eventdesk_core::ids::{EventId, IdSequence, ParticipantId};
use eventdesk_core::observer::ChangeObserver;
use eventdesk_core::participant::Participant;
use eventdesk_core::registration::Registration;
use eventdesk_core::render::{DetailKind, MediumKind, RenderSelectionError, Rendering};
use eventdesk_core::validation::{default_rule_for, ValidationRule};
use eventdesk_core::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`EventDesk`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// Event creation failed
    #[error(transparent)]
    Event(#[from] EventError),

    /// A subscriber rejected a change notice
    #[error(transparent)]
    Observer(#[from] ObserverError),

    /// Desk configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unknown detail level or medium tag
    #[error(transparent)]
    Render(#[from] RenderSelectionError),

    /// No event with this identifier
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// No participant with this identifier
    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// No registration at this position
    #[error("No registration at position {0}")]
    RegistrationNotFound(usize),

    /// A required text field was empty
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),
}

/// Result alias for desk operations.
pub type Result<T> = std::result::Result<T, DeskError>;

/// One row of the registration listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    /// Position in the registration list
    pub position: usize,
    /// Participant name
    pub participant: String,
    /// Event name
    pub event: String,
    /// Outcome of the last evaluation
    pub approved: bool,
}

/// Front desk over the whole event domain.
pub struct EventDesk {
    factory: EventFactory,
    participant_ids: IdSequence,
    catalog: EventCatalog,
    participants: BTreeMap<ParticipantId, Arc<Participant>>,
    registrations: Vec<Registration>,
    auth: Arc<AuthorizationService>,
    gateway: GuardedCatalogService,
    notifications: Arc<NotificationService>,
}

impl EventDesk {
    /// Desk using `config` and logging-only notifications.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Config`] if `config` fails validation.
    pub fn new(config: DeskConfig) -> Result<Self> {
        Self::with_notifications(config, Arc::new(NotificationService::default()))
    }

    /// Desk using `config` and delivering notifications through `messenger`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Config`] if `config` fails validation.
    pub fn with_messenger(config: DeskConfig, messenger: Arc<dyn Messenger>) -> Result<Self> {
        Self::with_notifications(config, Arc::new(NotificationService::new(messenger)))
    }

    fn with_notifications(
        config: DeskConfig,
        notifications: Arc<NotificationService>,
    ) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            event_prefix = %config.event_id_prefix,
            participant_prefix = %config.participant_id_prefix,
            "Event desk ready"
        );
        Ok(Self::assemble(&config, notifications))
    }

    fn assemble(config: &DeskConfig, notifications: Arc<NotificationService>) -> Self {
        let catalog = EventCatalog::new();
        let auth = Arc::new(AuthorizationService::new());
        let gateway = GuardedCatalogService::new(
            catalog.clone(),
            Arc::clone(&auth),
            config.secret_marker.clone(),
        );

        Self {
            factory: EventFactory::new(Arc::new(config.event_ids())),
            participant_ids: config.participant_ids(),
            catalog,
            participants: BTreeMap::new(),
            registrations: Vec::new(),
            auth,
            gateway,
            notifications,
        }
    }

    fn notifier(&self) -> Arc<dyn ChangeObserver> {
        Arc::clone(&self.notifications) as Arc<dyn ChangeObserver>
    }

    fn shared_event(&self, event_id: &EventId) -> Result<SharedEvent> {
        self.catalog
            .get(event_id)
            .ok_or_else(|| DeskError::EventNotFound(event_id.clone()))
    }

    fn registration_mut(&mut self, position: usize) -> Result<&mut Registration> {
        self.registrations
            .get_mut(position)
            .ok_or(DeskError::RegistrationNotFound(position))
    }

    fn require_text(field: &'static str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            tracing::warn!(field, "Rejected blank field");
            return Err(DeskError::BlankField(field));
        }
        Ok(())
    }

    // ========== Events ==========

    /// Create an event, add it to the catalog and subscribe the
    /// notification service to it.
    ///
    /// # Errors
    ///
    /// - [`DeskError::BlankField`] if `name` or `description` is blank
    /// - [`DeskError::Event`] for an unknown kind or missing fields
    pub fn create_event(
        &mut self,
        kind: &str,
        name: &str,
        description: &str,
        date: NaiveDate,
        fields: &FieldSet,
    ) -> Result<EventId> {
        Self::require_text("name", name)?;
        Self::require_text("description", description)?;

        let mut event = self.factory.create(kind, name, description, date, fields)?;
        event.subscribe(self.notifier());

        let id = event.id().clone();
        metrics::counter!(EVENTS_CREATED, "kind" => event.kind().as_str()).increment(1);
        self.catalog.insert(event.into());
        Ok(id)
    }

    /// Replace an event's description. Subscribers are always notified.
    ///
    /// # Errors
    ///
    /// - [`DeskError::EventNotFound`] if the event does not exist
    /// - [`DeskError::Observer`] if a subscriber fails; the new description
    ///   is kept regardless
    pub fn update_description(&self, event_id: &EventId, description: &str) -> Result<()> {
        let event = self.shared_event(event_id)?;
        let mut guard = event.write();
        guard.update_description(description)?;
        Ok(())
    }

    /// Set the remaining seats of a conference.
    ///
    /// Returns `false` if the event is not a conference.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::EventNotFound`] if the event does not exist.
    pub fn set_capacity(&self, event_id: &EventId, seats: u32) -> Result<bool> {
        Ok(self.shared_event(event_id)?.write().set_capacity(seats))
    }

    /// Look an event up by identifier.
    #[must_use]
    pub fn event(&self, event_id: &EventId) -> Option<SharedEvent> {
        self.catalog.get(event_id)
    }

    /// Every event, ordered by identifier.
    #[must_use]
    pub fn events(&self) -> Vec<SharedEvent> {
        self.catalog.events()
    }

    /// The underlying catalog.
    #[must_use]
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    // ========== Participants ==========

    /// Enroll a participant under a freshly allocated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::BlankField`] if `name` or `email` is blank.
    pub fn add_participant(
        &mut self,
        name: &str,
        email: &str,
        is_student: bool,
    ) -> Result<ParticipantId> {
        Self::require_text("name", name)?;
        Self::require_text("email", email)?;

        let participant =
            Participant::enroll(&self.participant_ids, name, email).with_student(is_student);
        let id = participant.id().clone();

        tracing::info!(participant_id = %id, name, is_student, "Participant enrolled");
        self.participants.insert(id.clone(), Arc::new(participant));
        Ok(id)
    }

    /// Look a participant up by identifier.
    #[must_use]
    pub fn participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(participant_id).map(AsRef::as_ref)
    }

    /// Every participant, ordered by identifier.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values().map(AsRef::as_ref)
    }

    // ========== Registrations ==========

    /// Register a participant for an event and return the registration's
    /// position.
    ///
    /// The registration gets the default rule for the event's kind and the
    /// notification service as subscriber, and the participant is recorded
    /// as registered with the authorization service. Registering the same
    /// pair again returns the existing position.
    ///
    /// # Errors
    ///
    /// - [`DeskError::ParticipantNotFound`] if the participant is unknown
    /// - [`DeskError::EventNotFound`] if the event does not exist
    pub fn register(
        &mut self,
        participant_id: &ParticipantId,
        event_id: &EventId,
    ) -> Result<usize> {
        let participant = self
            .participants
            .get(participant_id)
            .cloned()
            .ok_or_else(|| DeskError::ParticipantNotFound(participant_id.clone()))?;
        let event = self.shared_event(event_id)?;

        if let Some(position) = self.registrations.iter().position(|registration| {
            registration.participant().id() == participant_id
                && registration.event().ptr_eq(&event)
        }) {
            tracing::debug!(%participant_id, %event_id, position, "Already registered");
            return Ok(position);
        }

        let kind = event.read().kind();
        let mut registration = Registration::new(participant, event, default_rule_for(kind));
        registration.subscribe(self.notifier());
        self.auth.register(participant_id, event_id);

        let position = self.registrations.len();
        tracing::info!(
            %participant_id,
            %event_id,
            rule = registration.rule_name(),
            position,
            "Registration created"
        );
        self.registrations.push(registration);
        Ok(position)
    }

    /// Replace the rule of a registration. Approval is not re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::RegistrationNotFound`] for an unknown position.
    pub fn set_rule(&mut self, position: usize, rule: Arc<dyn ValidationRule>) -> Result<()> {
        self.registration_mut(position)?.set_rule(rule);
        Ok(())
    }

    /// Evaluate a registration against its rule and return the approval.
    ///
    /// # Errors
    ///
    /// - [`DeskError::RegistrationNotFound`] for an unknown position
    /// - [`DeskError::Observer`] if a subscriber fails on a status change;
    ///   the new status is kept regardless
    pub fn validate_registration(&mut self, position: usize) -> Result<bool> {
        Ok(self.registration_mut(position)?.evaluate()?)
    }

    /// The registration at `position`.
    #[must_use]
    pub fn registration(&self, position: usize) -> Option<&Registration> {
        self.registrations.get(position)
    }

    /// Listing of every registration in creation order.
    #[must_use]
    pub fn registrations(&self) -> Vec<RegistrationSummary> {
        self.registrations
            .iter()
            .enumerate()
            .map(|(position, registration)| RegistrationSummary {
                position,
                participant: registration.participant().name().to_string(),
                event: registration.event().read().name().to_string(),
                approved: registration.is_approved(),
            })
            .collect()
    }

    // ========== Rendering ==========

    /// Render an event at a detail level on a medium.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::EventNotFound`] if the event does not exist.
    pub fn render(
        &self,
        event_id: &EventId,
        detail: DetailKind,
        medium: MediumKind,
    ) -> Result<String> {
        let event = self.shared_event(event_id)?;
        let rendering = Rendering::new(detail.level(), medium.medium());
        let text = rendering.render(&event.read());
        Ok(text)
    }

    /// Render with the detail level and medium given as tags
    /// (`summary`/`full`, `web`/`text`).
    ///
    /// # Errors
    ///
    /// - [`DeskError::Render`] for an unknown tag
    /// - [`DeskError::EventNotFound`] if the event does not exist
    pub fn render_tagged(&self, event_id: &EventId, detail: &str, medium: &str) -> Result<String> {
        self.render(event_id, detail.parse()?, medium.parse()?)
    }

    // ========== Access ==========

    /// Log a participant in.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::ParticipantNotFound`] if the participant is
    /// unknown.
    pub fn log_in(&self, participant_id: &ParticipantId) -> Result<()> {
        if !self.participants.contains_key(participant_id) {
            return Err(DeskError::ParticipantNotFound(participant_id.clone()));
        }
        self.auth.log_in(participant_id);
        Ok(())
    }

    /// Log a participant out. Returns whether they were logged in.
    pub fn log_out(&self, participant_id: &ParticipantId) -> bool {
        self.auth.log_out(participant_id)
    }

    /// The authorization bookkeeping shared with the access gateway.
    #[must_use]
    pub const fn authorization(&self) -> &Arc<AuthorizationService> {
        &self.auth
    }

    /// Event details as seen by `user`, after login and registration checks.
    #[must_use]
    pub fn event_details(
        &self,
        event_id: &EventId,
        user: Option<&ParticipantId>,
    ) -> DetailsOutcome {
        let outcome = self.gateway.get_details(event_id, user);
        let reason = match outcome {
            DetailsOutcome::LoginRequired => Some("login-required"),
            DetailsOutcome::RegistrationRequired => Some("registration-required"),
            DetailsOutcome::Found(_) | DetailsOutcome::NotFound => None,
        };
        if let Some(reason) = reason {
            metrics::counter!(ACCESS_DENIED, "reason" => reason).increment(1);
        }
        outcome
    }

    // ========== Notifications ==========

    /// Notification journal, oldest first.
    #[must_use]
    pub fn journal(&self) -> Vec<String> {
        self.notifications.journal()
    }

    /// The notification service subscribed to every event and registration.
    #[must_use]
    pub const fn notifications(&self) -> &Arc<NotificationService> {
        &self.notifications
    }
}

impl Default for EventDesk {
    fn default() -> Self {
        Self::assemble(
            &DeskConfig::default(),
            Arc::new(NotificationService::default()),
        )
    }
}

impl std::fmt::Debug for EventDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDesk")
            .field("events", &self.catalog.len())
            .field("participants", &self.participants.len())
            .field("registrations", &self.registrations.len())
            .finish_non_exhaustive()
    }
}
