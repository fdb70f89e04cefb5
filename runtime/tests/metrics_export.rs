//! Prometheus export of desk counters.
//!
//! Kept in its own test binary because it installs the global recorder.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use eventdesk_core::FieldSet;
use eventdesk_runtime::EventDesk;
use eventdesk_runtime::metrics::{EVENTS_CREATED, MetricsExporter};
use eventdesk_testing::fixtures;

#[test]
fn created_events_are_counted() {
    let mut exporter = MetricsExporter::new();
    exporter.install().unwrap();

    let mut desk = EventDesk::default();
    desk.create_event(
        "Seminar",
        "Blockchain 101",
        "Intro",
        fixtures::test_date(),
        &FieldSet::new().domain("Finance"),
    )
    .unwrap();

    let text = exporter.render().unwrap();
    assert!(text.contains(EVENTS_CREATED));
    assert!(text.contains("kind=\"Seminar\""));
}
