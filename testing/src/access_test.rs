//! Fluent Given-When-Then testing of guarded detail lookups.

#![allow(clippy::module_name_repetitions)] // AccessTest is the natural name

use eventdesk_core::access::{
    AuthorizationService, DetailsOutcome, EventDetailsService, GuardedCatalogService,
    SecretMarker,
};
use eventdesk_core::catalog::EventCatalog;
use eventdesk_core::event::Event;
use eventdesk_core::ids::{EventId, ParticipantId};
use std::sync::Arc;

/// Type alias for outcome assertion functions
type OutcomeAssertion = Box<dyn FnOnce(&DetailsOutcome)>;

/// Fluent API for testing the access gateway with Given-When-Then syntax.
///
/// # Example
///
/// ```
/// use eventdesk_core::{DetailsOutcome, EventFactory, EventKind};
/// use eventdesk_testing::{fixtures, AccessTest};
///
/// let factory = EventFactory::default();
///
/// AccessTest::new()
///     .given_event(fixtures::event(&factory, EventKind::Hackathon, "Hack1"))
///     .given_registered("U3", "EV001")
///     .when_requesting("EV001", Some("U3"))
///     .then_outcome(|outcome| assert!(outcome.is_found()))
///     .run();
/// ```
pub struct AccessTest {
    catalog: EventCatalog,
    auth: Arc<AuthorizationService>,
    secret: SecretMarker,
    request: Option<(EventId, Option<ParticipantId>)>,
    assertions: Vec<OutcomeAssertion>,
}

impl AccessTest {
    /// Create a new test with an empty catalog and nobody logged in
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: EventCatalog::new(),
            auth: Arc::new(AuthorizationService::new()),
            secret: SecretMarker::default(),
            request: None,
            assertions: Vec::new(),
        }
    }

    /// Use a different secret marker
    #[must_use]
    pub fn with_secret(mut self, secret: SecretMarker) -> Self {
        self.secret = secret;
        self
    }

    /// Add an event to the catalog (Given)
    #[must_use]
    pub fn given_event(self, event: Event) -> Self {
        self.catalog.insert(event.into());
        self
    }

    /// Mark a user as logged in (Given)
    #[must_use]
    pub fn given_logged_in(self, user: &str) -> Self {
        self.auth.log_in(&ParticipantId::from(user));
        self
    }

    /// Record a user as registered for an event (Given)
    #[must_use]
    pub fn given_registered(self, user: &str, event_id: &str) -> Self {
        self.auth
            .register(&ParticipantId::from(user), &EventId::from(event_id));
        self
    }

    /// Set the lookup to test (When)
    #[must_use]
    pub fn when_requesting(mut self, event_id: &str, user: Option<&str>) -> Self {
        self.request = Some((EventId::from(event_id), user.map(ParticipantId::from)));
        self
    }

    /// Add an assertion about the outcome (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&DetailsOutcome) + 'static,
    {
        self.assertions.push(Box::new(assertion));
        self
    }

    /// Expect exactly this outcome (Then)
    #[must_use]
    pub fn then_expect(self, expected: DetailsOutcome) -> Self {
        self.then_outcome(move |outcome| assert_eq!(outcome, &expected))
    }

    /// Run the lookup and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no lookup was set, or if any assertion fails.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let (event_id, user) = self
            .request
            .expect("Lookup must be set with when_requesting()");

        let service = GuardedCatalogService::new(self.catalog, self.auth, self.secret);
        let outcome = service.get_details(&event_id, user.as_ref());

        for assertion in self.assertions {
            assertion(&outcome);
        }
    }
}

impl Default for AccessTest {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper assertions for lookup outcomes
pub mod assertions {
    use eventdesk_core::access::DetailsOutcome;

    /// Assert that the details were returned and contain `fragment`
    ///
    /// # Panics
    ///
    /// Panics if access was refused or the details lack `fragment`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_found_containing(outcome: &DetailsOutcome, fragment: &str) {
        match outcome.details() {
            Some(details) => assert!(
                details.contains(fragment),
                "Expected details to contain {fragment:?}, got {details:?}"
            ),
            None => panic!("Expected details, but lookup returned: {outcome}"),
        }
    }

    /// Assert that access was refused
    ///
    /// # Panics
    ///
    /// Panics if the outcome is not a denial.
    pub fn assert_denied(outcome: &DetailsOutcome) {
        assert!(outcome.is_denied(), "Expected a denial, got: {outcome}");
    }
}
