//! # EventDesk Runtime
//!
//! Services wired around the [`eventdesk_core`] domain model.
//!
//! ## Core Components
//!
//! - **Event desk** ([`EventDesk`]): catalog, participant roster,
//!   registrations, rendering and guarded detail lookups behind one facade
//! - **Notification service** ([`NotificationService`]): journals change
//!   notices and forwards them through a pluggable [`Messenger`]
//! - **Metrics** ([`metrics`]): Prometheus counters for created events,
//!   denied lookups and delivered notifications
//!
//! ## Example
//!
//! ```
//! use eventdesk_core::{DetailsOutcome, FieldSet, NaiveDate};
//! use eventdesk_runtime::EventDesk;
//!
//! # fn main() -> Result<(), eventdesk_runtime::DeskError> {
//! let mut desk = EventDesk::default();
//! let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap_or_default();
//!
//! let hack = desk.create_event(
//!     "Hackathon",
//!     "Hack1",
//!     "Build web apps",
//!     date,
//!     &FieldSet::new().sponsor("DevNet").duration_hours(24),
//! )?;
//! let bob = desk.add_participant("Bob", "bob@example.com", true)?;
//!
//! assert_eq!(desk.event_details(&hack, Some(&bob)), DetailsOutcome::RegistrationRequired);
//! desk.register(&bob, &hack)?;
//! assert!(desk.event_details(&hack, Some(&bob)).is_found());
//! # Ok(())
//! # }
//! ```

/// Front desk facade over the domain
pub mod desk;

/// Prometheus metrics for observability
pub mod metrics;

/// Change notice journal and message delivery
pub mod notification;

pub use desk::{DeskError, EventDesk, RegistrationSummary};
pub use notification::{DeliveryError, Messenger, NotificationService, TracingMessenger};
