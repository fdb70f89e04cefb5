//! Prometheus metrics for the event desk.
//!
//! Counters emitted by the desk and its notification service:
//! - Events created, by kind
//! - Detail lookups denied, by reason
//! - Notifications delivered, by change kind
//!
//! Metrics go to whatever recorder is installed. [`MetricsExporter`]
//! installs a Prometheus recorder and renders its text exposition; without
//! one the counters are no-ops.
//!
//! # Example
//!
//! ```rust,no_run
//! use eventdesk_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! // ... run the desk ...
//!
//! if let Some(text) = exporter.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Events created through the desk.
pub const EVENTS_CREATED: &str = "eventdesk_events_created_total";

/// Detail lookups refused by the access gateway.
pub const ACCESS_DENIED: &str = "eventdesk_access_denied_total";

/// Notices handled by the notification service.
pub const NOTIFICATIONS_DELIVERED: &str = "eventdesk_notifications_delivered_total";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus recorder for the desk's counters.
#[derive(Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Exporter with no recorder installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe the desk's metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Install`] if the recorder cannot be installed.
    /// A recorder installed earlier by someone else is tolerated: the call
    /// succeeds but [`render`](Self::render) keeps returning `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                register_metrics();
                tracing::info!("Metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            }
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if this exporter did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

impl std::fmt::Debug for MetricsExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsExporter")
            .field("installed", &self.handle.is_some())
            .finish()
    }
}

fn register_metrics() {
    describe_counter!(EVENTS_CREATED, "Total number of events created, by kind");
    describe_counter!(
        ACCESS_DENIED,
        "Total number of event detail lookups refused, by reason"
    );
    describe_counter!(
        NOTIFICATIONS_DELIVERED,
        "Total number of change notices handled by the notification service"
    );
}
