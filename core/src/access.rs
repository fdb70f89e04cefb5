//! Access-controlled event detail lookup.
//!
//! [`CatalogService`] answers detail requests straight from the
//! [`EventCatalog`]. [`GuardedCatalogService`] sits in front of it with the
//! same [`EventDetailsService`] interface and checks, in this order:
//!
//! 1. **Existence**: unknown identifier → [`DetailsOutcome::NotFound`]
//! 2. **Secrecy**: the name matches the [`SecretMarker`] and the user is
//!    absent or not logged in → [`DetailsOutcome::LoginRequired`]
//! 3. **Registration gate**: the event's kind requires registration and the
//!    user is absent or not registered for it →
//!    [`DetailsOutcome::RegistrationRequired`]
//! 4. Otherwise the request is delegated and its answer returned as is.
//!
//! Every outcome is a value. Callers branch on it; nothing here fails.

use crate::catalog::EventCatalog;
use crate::event::Event;
use crate::ids::{EventId, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Result of a detail lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailsOutcome {
    /// The event's full detail string
    Found(String),
    /// No event has that identifier
    NotFound,
    /// The event is secret and the user is not logged in
    LoginRequired,
    /// The event is restricted to registered users
    RegistrationRequired,
}

impl DetailsOutcome {
    /// Whether details were returned.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether access was refused.
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::LoginRequired | Self::RegistrationRequired)
    }

    /// The detail string, if found.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Found(details) => Some(details),
            _ => None,
        }
    }
}

impl fmt::Display for DetailsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(details) => f.write_str(details),
            Self::NotFound => f.write_str("Event not found."),
            Self::LoginRequired => {
                f.write_str("ACCESS DENIED: this event is secret and requires login.")
            }
            Self::RegistrationRequired => f.write_str(
                "ACCESS DENIED: details are reserved for participants registered for this event.",
            ),
        }
    }
}

/// Anything that can answer an event detail request.
pub trait EventDetailsService: Send + Sync {
    /// Details of `event_id` as seen by `user` (`None` for anonymous).
    fn get_details(&self, event_id: &EventId, user: Option<&ParticipantId>) -> DetailsOutcome;
}

/// Unguarded lookup straight from the catalog.
#[derive(Clone, Debug)]
pub struct CatalogService {
    catalog: EventCatalog,
}

impl CatalogService {
    /// Serve details from `catalog`.
    #[must_use]
    pub const fn new(catalog: EventCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog being served.
    #[must_use]
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }
}

impl EventDetailsService for CatalogService {
    fn get_details(&self, event_id: &EventId, _user: Option<&ParticipantId>) -> DetailsOutcome {
        self.catalog
            .get(event_id)
            .map_or(DetailsOutcome::NotFound, |event| {
                DetailsOutcome::Found(event.read().details())
            })
    }
}

/// How secret events are recognised by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "lowercase")]
pub enum SecretMarker {
    /// Name contains the substring
    Contains(String),
    /// Name equals the string
    Exact(String),
}

impl SecretMarker {
    /// Whether an event called `name` is secret.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Contains(marker) => name.contains(marker.as_str()),
            Self::Exact(secret) => name == secret,
        }
    }
}

impl Default for SecretMarker {
    fn default() -> Self {
        Self::Contains("Secret".to_string())
    }
}

#[derive(Debug, Default)]
struct Sessions {
    logged_in: HashSet<ParticipantId>,
    registrations: HashMap<ParticipantId, HashSet<EventId>>,
}

/// Who is logged in, and who is registered for what.
///
/// Process memory only. Every operation is idempotent.
#[derive(Debug, Default)]
pub struct AuthorizationService {
    sessions: Mutex<Sessions>,
}

impl AuthorizationService {
    /// Create a service with nobody logged in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark `user` as logged in.
    pub fn log_in(&self, user: &ParticipantId) {
        if self.sessions().logged_in.insert(user.clone()) {
            tracing::info!(user = %user, "User logged in");
        }
    }

    /// Mark `user` as logged out. Returns `false` if they were not logged in.
    pub fn log_out(&self, user: &ParticipantId) -> bool {
        let removed = self.sessions().logged_in.remove(user);
        if removed {
            tracing::info!(user = %user, "User logged out");
        }
        removed
    }

    /// Whether `user` is logged in.
    #[must_use]
    pub fn is_logged_in(&self, user: &ParticipantId) -> bool {
        self.sessions().logged_in.contains(user)
    }

    /// Record that `user` is registered for `event_id`.
    pub fn register(&self, user: &ParticipantId, event_id: &EventId) {
        let added = self
            .sessions()
            .registrations
            .entry(user.clone())
            .or_default()
            .insert(event_id.clone());
        if added {
            tracing::debug!(user = %user, event_id = %event_id, "Registration recorded");
        }
    }

    /// Whether `user` is registered for `event_id`.
    #[must_use]
    pub fn is_registered(&self, user: &ParticipantId, event_id: &EventId) -> bool {
        self.sessions()
            .registrations
            .get(user)
            .is_some_and(|events| events.contains(event_id))
    }
}

/// Detail lookup that enforces login and registration checks before
/// delegating to a [`CatalogService`].
#[derive(Debug)]
pub struct GuardedCatalogService<A = std::sync::Arc<AuthorizationService>> {
    inner: CatalogService,
    auth: A,
    secret: SecretMarker,
}

impl<A> GuardedCatalogService<A>
where
    A: AsRef<AuthorizationService>,
{
    /// Guard lookups into `catalog` with `auth`.
    #[must_use]
    pub const fn new(catalog: EventCatalog, auth: A, secret: SecretMarker) -> Self {
        Self {
            inner: CatalogService::new(catalog),
            auth,
            secret,
        }
    }

    fn check(&self, event: &Event, user: Option<&ParticipantId>) -> Option<DetailsOutcome> {
        let auth = self.auth.as_ref();

        if self.secret.matches(event.name())
            && !user.is_some_and(|user| auth.is_logged_in(user))
        {
            return Some(DetailsOutcome::LoginRequired);
        }

        if event.requires_registration_gate()
            && !user.is_some_and(|user| auth.is_registered(user, event.id()))
        {
            return Some(DetailsOutcome::RegistrationRequired);
        }

        None
    }
}

impl<A> EventDetailsService for GuardedCatalogService<A>
where
    A: AsRef<AuthorizationService> + Send + Sync,
{
    fn get_details(&self, event_id: &EventId, user: Option<&ParticipantId>) -> DetailsOutcome {
        let Some(event) = self.inner.catalog().get(event_id) else {
            return DetailsOutcome::NotFound;
        };

        let denial = self.check(&event.read(), user);
        if let Some(denial) = denial {
            tracing::warn!(
                event_id = %event_id,
                user = user.map(ParticipantId::as_str),
                outcome = ?denial,
                "Event details denied"
            );
            return denial;
        }

        tracing::debug!(event_id = %event_id, "Access granted, delegating");
        self.inner.get_details(event_id, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{EventFactory, FieldSet};
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct Fixture {
        auth: Arc<AuthorizationService>,
        guarded: GuardedCatalogService,
        secret_conference: EventId,
        hackathon: EventId,
        seminar: EventId,
        secret_hackathon: EventId,
    }

    #[allow(clippy::expect_used)] // Panics: fixture fields are complete
    fn fixture() -> Fixture {
        let factory = EventFactory::default();
        let catalog = EventCatalog::new();
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date");
        let conference = FieldSet::new().capacity(50).principal_speaker("Agent X");
        let hack = FieldSet::new().sponsor("DevNet").duration_hours(24);

        let add = |kind: &str, name: &str, fields: &FieldSet| {
            let event = factory
                .create(kind, name, "Description", date, fields)
                .expect("fields are complete");
            let id = event.id().clone();
            catalog.insert(event.into());
            id
        };

        let secret_conference = add("Conference", "Secret Talk", &conference);
        let hackathon = add("Hackathon", "Hack1", &hack);
        let seminar = add("Seminar", "Open Seminar", &FieldSet::new().domain("General"));
        let secret_hackathon = add("Hackathon", "Secret Hack", &hack);

        let auth = Arc::new(AuthorizationService::new());
        let guarded =
            GuardedCatalogService::new(catalog, Arc::clone(&auth), SecretMarker::default());

        Fixture {
            auth,
            guarded,
            secret_conference,
            hackathon,
            seminar,
            secret_hackathon,
        }
    }

    #[test]
    fn unknown_event_is_not_found() {
        let f = fixture();
        let outcome = f.guarded.get_details(&EventId::new("EV999"), None);
        assert_eq!(outcome, DetailsOutcome::NotFound);
        assert_eq!(outcome.to_string(), "Event not found.");
    }

    #[test]
    fn public_event_is_open_to_anonymous_users() {
        let f = fixture();
        let outcome = f.guarded.get_details(&f.seminar, None);
        assert!(outcome.is_found());
    }

    #[test]
    fn secret_event_requires_login_even_when_registered() {
        let f = fixture();
        let u1 = ParticipantId::new("U1");
        f.auth.register(&u1, &f.secret_conference);

        assert_eq!(
            f.guarded.get_details(&f.secret_conference, Some(&u1)),
            DetailsOutcome::LoginRequired
        );
        assert_eq!(
            f.guarded.get_details(&f.secret_conference, None),
            DetailsOutcome::LoginRequired
        );
    }

    #[test]
    fn secret_event_opens_after_login() {
        let f = fixture();
        let u2 = ParticipantId::new("U2");
        f.auth.log_in(&u2);

        let outcome = f.guarded.get_details(&f.secret_conference, Some(&u2));
        assert_eq!(
            outcome.details(),
            Some(
                "ID: EV001, Name: Secret Talk, Date: 2025-12-01\n  Type: Conference\n  \
                 Capacity: 50\n  Speaker: Agent X\n  Description: Description"
            )
        );
    }

    #[test]
    fn hackathon_requires_registration() {
        let f = fixture();
        let u3 = ParticipantId::new("U3");
        f.auth.log_in(&u3);

        assert_eq!(
            f.guarded.get_details(&f.hackathon, Some(&u3)),
            DetailsOutcome::RegistrationRequired
        );

        f.auth.register(&u3, &f.hackathon);
        assert!(f.guarded.get_details(&f.hackathon, Some(&u3)).is_found());
    }

    #[test]
    fn secret_hackathon_checks_login_before_registration() {
        let f = fixture();
        let user = ParticipantId::new("U4");

        assert_eq!(
            f.guarded.get_details(&f.secret_hackathon, Some(&user)),
            DetailsOutcome::LoginRequired
        );

        f.auth.log_in(&user);
        assert_eq!(
            f.guarded.get_details(&f.secret_hackathon, Some(&user)),
            DetailsOutcome::RegistrationRequired
        );

        f.auth.register(&user, &f.secret_hackathon);
        assert!(f.guarded.get_details(&f.secret_hackathon, Some(&user)).is_found());
    }

    #[test]
    fn logout_closes_secret_events_again() {
        let f = fixture();
        let user = ParticipantId::new("U5");
        f.auth.log_in(&user);
        assert!(f.guarded.get_details(&f.secret_conference, Some(&user)).is_found());

        assert!(f.auth.log_out(&user));
        assert!(!f.auth.log_out(&user));
        assert!(f.guarded.get_details(&f.secret_conference, Some(&user)).is_denied());
    }

    #[test]
    fn authorization_operations_are_idempotent() {
        let auth = AuthorizationService::new();
        let user = ParticipantId::new("P001");
        let event = EventId::new("EV002");

        auth.log_in(&user);
        auth.log_in(&user);
        auth.register(&user, &event);
        auth.register(&user, &event);

        assert!(auth.is_logged_in(&user));
        assert!(auth.is_registered(&user, &event));
        assert!(!auth.is_registered(&user, &EventId::new("EV003")));
        assert!(!auth.is_logged_in(&ParticipantId::new("P002")));
    }

    #[test]
    fn exact_marker_only_matches_the_whole_name() {
        let marker = SecretMarker::Exact("Secret Conference".to_string());
        assert!(marker.matches("Secret Conference"));
        assert!(!marker.matches("Secret Conference 2"));
        assert!(SecretMarker::default().matches("Top Secret Briefing"));
    }

    #[test]
    fn unguarded_service_ignores_access_rules() {
        let f = fixture();
        let plain = CatalogService::new(f.guarded.inner.catalog().clone());
        assert!(plain.get_details(&f.secret_conference, None).is_found());
        assert!(plain.get_details(&f.hackathon, None).is_found());
    }
}
