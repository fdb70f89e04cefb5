//! Identifier types and the sequential allocator that hands them out.
//!
//! Identifiers are a fixed prefix followed by a zero-padded sequence number
//! (`EV001`, `P001`). The allocator is an explicit object: whoever owns it
//! decides its lifetime, and every clone of the owning `Arc` draws from the
//! same counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique identifier for an event (e.g. `EV001`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Wrap an existing identifier string.
    ///
    /// No validation is done; use this for identifiers that came from an
    /// [`IdSequence`] or from a caller echoing one back.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a participant (e.g. `P001`).
///
/// The same identifier doubles as the user identity checked by the
/// authorization service.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Monotonic allocator of prefixed, zero-padded identifiers.
///
/// Sequence numbers start at 1 and are never reused for the lifetime of the
/// allocator. Allocation is a single atomic increment, so a shared allocator
/// stays unique even if callers share it across threads.
///
/// # Examples
///
/// ```
/// use eventdesk_core::ids::IdSequence;
///
/// let ids = IdSequence::new("EV", 3);
/// assert_eq!(ids.next_id(), "EV001");
/// assert_eq!(ids.next_id(), "EV002");
/// ```
#[derive(Debug)]
pub struct IdSequence {
    prefix: String,
    width: usize,
    last: AtomicU32,
}

impl IdSequence {
    /// Create an allocator whose first identifier is `{prefix}{1:0width}`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
            last: AtomicU32::new(0),
        }
    }

    /// Allocate the next identifier.
    pub fn next_id(&self) -> String {
        let sequence = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.last.load(Ordering::Relaxed)
    }

    /// The prefix every identifier starts with.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_zero_padded_and_monotonic() {
        let ids = IdSequence::new("P", 3);
        assert_eq!(ids.next_id(), "P001");
        assert_eq!(ids.next_id(), "P002");
        assert_eq!(ids.allocated(), 2);
    }

    #[test]
    fn sequence_grows_past_padding_width() {
        let ids = IdSequence::new("EV", 1);
        let all: Vec<String> = (0..10).map(|_| ids.next_id()).collect();
        assert_eq!(all[0], "EV1");
        assert_eq!(all[9], "EV10");
    }

    #[test]
    fn ids_display_as_their_inner_string() {
        assert_eq!(EventId::new("EV007").to_string(), "EV007");
        assert_eq!(ParticipantId::from("P042").as_str(), "P042");
    }
}
