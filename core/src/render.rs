//! Event rendering along two independent axes.
//!
//! How much to show ([`DetailLevel`]: [`Summary`], [`Full`]) is kept apart
//! from where it is shown ([`RenderMedium`]: [`WebMarkup`], [`PlainText`]).
//! A detail level only picks which medium operation to call; the medium owns
//! all formatting. Adding a medium or a detail level touches one axis only.
//!
//! ```text
//!              ┌──────────── RenderMedium ────────────┐
//!              │  WebMarkup            PlainText      │
//! DetailLevel  │                                      │
//!   Summary ───┼─▶ render_summary   ─▶ render_summary │
//!   Full    ───┼─▶ render_full      ─▶ render_full    │
//!              └──────────────────────────────────────┘
//! ```
//!
//! Rendering reads the event and nothing else, so the same event state always
//! renders to the same text.

use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An output medium: knows how to format events at each detail level.
pub trait RenderMedium: Send + Sync {
    /// Name and date only.
    fn render_summary(&self, event: &Event) -> String;

    /// Name, description, date and the full detail string.
    fn render_full(&self, event: &Event) -> String;
}

/// A detail level: chooses what the medium renders.
pub trait DetailLevel: Send + Sync {
    /// Render `event` on `medium` at this level.
    fn render(&self, event: &Event, medium: &dyn RenderMedium) -> String;
}

/// Name and date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary;

impl DetailLevel for Summary {
    fn render(&self, event: &Event, medium: &dyn RenderMedium) -> String {
        medium.render_summary(event)
    }
}

/// Everything the event has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Full;

impl DetailLevel for Full {
    fn render(&self, event: &Event, medium: &dyn RenderMedium) -> String {
        medium.render_full(event)
    }
}

/// HTML fragments for web pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WebMarkup;

impl RenderMedium for WebMarkup {
    fn render_summary(&self, event: &Event) -> String {
        format!(
            "<div class='event-card'><h2>{}</h2><p>{}</p></div>",
            event.name(),
            event.formatted_date()
        )
    }

    fn render_full(&self, event: &Event) -> String {
        format!(
            "<div class='event-page'><h1>{}</h1><p>Description: {}</p><p>Date: {}</p><p>Details: {}</p></div>",
            event.name(),
            event.description(),
            event.formatted_date(),
            event.details()
        )
    }
}

/// Delimited text blocks for terminals and small screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlainText;

impl RenderMedium for PlainText {
    fn render_summary(&self, event: &Event) -> String {
        format!("--- {} ---\nDate: {}\n", event.name(), event.formatted_date())
    }

    fn render_full(&self, event: &Event) -> String {
        format!(
            "--- DETAILS {} ---\nDescription: {}\nDate: {}\nDetails: {}\n--- END ---\n",
            event.name().to_uppercase(),
            event.description(),
            event.formatted_date(),
            event.details()
        )
    }
}

/// A detail level paired with a medium.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eventdesk_core::factory::{EventFactory, FieldSet};
/// use eventdesk_core::render::{PlainText, Rendering, Summary};
///
/// let event = EventFactory::default()
///     .create(
///         "Conference",
///         "Data Science",
///         "Big data",
///         NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///         &FieldSet::new().capacity(300).principal_speaker("Dr. Data"),
///     )
///     .unwrap();
///
/// let text = Rendering::new(&Summary, &PlainText).render(&event);
/// assert_eq!(text, "--- Data Science ---\nDate: 2025-09-01\n");
/// ```
#[derive(Clone, Copy)]
pub struct Rendering<'a> {
    detail: &'a dyn DetailLevel,
    medium: &'a dyn RenderMedium,
}

impl<'a> Rendering<'a> {
    /// Pair a detail level with a medium.
    #[must_use]
    pub const fn new(detail: &'a dyn DetailLevel, medium: &'a dyn RenderMedium) -> Self {
        Self { detail, medium }
    }

    /// Render `event`.
    #[must_use]
    pub fn render(&self, event: &Event) -> String {
        self.detail.render(event, self.medium)
    }
}

/// A tag could not be mapped to a detail level or medium.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderSelectionError {
    /// Unknown detail level tag
    #[error("Unknown detail level: {0}")]
    UnknownDetail(String),
    /// Unknown medium tag
    #[error("Unknown medium: {0}")]
    UnknownMedium(String),
}

/// Detail levels selectable by tag (`summary`, `full`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// [`Summary`]
    Summary,
    /// [`Full`]
    Full,
}

impl DetailKind {
    /// The detail level this tag selects.
    #[must_use]
    pub fn level(self) -> &'static dyn DetailLevel {
        match self {
            Self::Summary => &Summary,
            Self::Full => &Full,
        }
    }
}

impl FromStr for DetailKind {
    type Err = RenderSelectionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "full" => Ok(Self::Full),
            _ => Err(RenderSelectionError::UnknownDetail(tag.to_string())),
        }
    }
}

/// Media selectable by tag (`web`, `text`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumKind {
    /// [`WebMarkup`]
    Web,
    /// [`PlainText`]
    Text,
}

impl MediumKind {
    /// The medium this tag selects.
    #[must_use]
    pub fn medium(self) -> &'static dyn RenderMedium {
        match self {
            Self::Web => &WebMarkup,
            Self::Text => &PlainText,
        }
    }
}

impl FromStr for MediumKind {
    type Err = RenderSelectionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "text" => Ok(Self::Text),
            _ => Err(RenderSelectionError::UnknownMedium(tag.to_string())),
        }
    }
}

impl fmt::Debug for Rendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendering").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{EventFactory, FieldSet};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[allow(clippy::expect_used)] // Panics: fixture fields are complete
    fn hackathon() -> Event {
        EventFactory::default()
            .create(
                "Hackathon",
                "IoT Hackathon",
                "Build connected objects",
                NaiveDate::from_ymd_opt(2025, 10, 10).expect("valid date"),
                &FieldSet::new().sponsor("IoT Solutions").duration_hours(36),
            )
            .expect("hackathon fields are complete")
    }

    #[test]
    fn web_summary_is_a_card() {
        let text = Rendering::new(&Summary, &WebMarkup).render(&hackathon());
        assert_eq!(
            text,
            "<div class='event-card'><h2>IoT Hackathon</h2><p>2025-10-10</p></div>"
        );
    }

    #[test]
    fn web_full_embeds_description_date_and_details() {
        let event = hackathon();
        let text = Rendering::new(&Full, &WebMarkup).render(&event);

        assert!(text.starts_with("<div class='event-page'><h1>IoT Hackathon</h1>"));
        assert!(text.contains("<p>Description: Build connected objects</p>"));
        assert!(text.contains("<p>Date: 2025-10-10</p>"));
        assert!(text.contains(&event.details()));
    }

    #[test]
    fn text_full_is_a_delimited_block() {
        let text = Rendering::new(&Full, &PlainText).render(&hackathon());

        assert!(text.starts_with("--- DETAILS IOT HACKATHON ---\n"));
        assert!(text.contains("Sponsor: IoT Solutions"));
        assert!(text.contains("Duration: 36h"));
        assert!(text.ends_with("--- END ---\n"));
    }

    #[test]
    fn summary_omits_description() {
        let text = Rendering::new(&Summary, &PlainText).render(&hackathon());
        assert!(!text.contains("Build connected objects"));
    }

    #[test]
    fn tags_select_axes() {
        assert_eq!("Full".parse::<DetailKind>(), Ok(DetailKind::Full));
        assert_eq!("web".parse::<MediumKind>(), Ok(MediumKind::Web));
        assert_eq!(
            "mobile".parse::<MediumKind>(),
            Err(RenderSelectionError::UnknownMedium("mobile".to_string()))
        );
        assert_eq!(
            "brief".parse::<DetailKind>(),
            Err(RenderSelectionError::UnknownDetail("brief".to_string()))
        );
    }

    proptest! {
        #[test]
        fn rendering_is_a_pure_function_of_event_state(
            description in "[A-Za-z0-9 ]{0,40}",
            detail in prop_oneof![Just(DetailKind::Summary), Just(DetailKind::Full)],
            medium in prop_oneof![Just(MediumKind::Web), Just(MediumKind::Text)],
        ) {
            let mut event = hackathon();
            prop_assert!(event.update_description(description).is_ok());

            let rendering = Rendering::new(detail.level(), medium.medium());
            prop_assert_eq!(rendering.render(&event), rendering.render(&event));
        }
    }
}
