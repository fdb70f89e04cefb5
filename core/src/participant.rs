//! Participants.

use crate::ids::{IdSequence, ParticipantId};
use serde::{Deserialize, Serialize};

/// Someone who can register for events.
///
/// Immutable once created. Students are the default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    email: String,
    is_student: bool,
}

impl Participant {
    /// Create a student participant with an explicit identifier.
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            is_student: true,
        }
    }

    /// Create a student participant, drawing the identifier from `ids`.
    #[must_use]
    pub fn enroll(ids: &IdSequence, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(ParticipantId::new(ids.next_id()), name, email)
    }

    /// Set whether the participant is a student.
    #[must_use]
    pub const fn with_student(mut self, is_student: bool) -> Self {
        self.is_student = is_student;
        self
    }

    /// Identifier, also used as the user identity for access checks.
    #[must_use]
    pub const fn id(&self) -> &ParticipantId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the participant is a student.
    #[must_use]
    pub const fn is_student(&self) -> bool {
        self.is_student
    }
}
