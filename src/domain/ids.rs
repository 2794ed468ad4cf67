//! Opaque identifier types for every entity that crosses a module boundary.
//!
//! The source system stringifies and re-coerces ids inconsistently between
//! components. Every id here is a distinct newtype so a `RoomId` can never be
//! passed where a `BatchId` is expected, and nothing downstream has to guess
//! at a representation.

use std::fmt;

macro_rules! opaque_id {
    ($name:ident, $repr:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub $repr);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(RoomId, u64);
opaque_id!(TimeslotId, u64);
opaque_id!(BatchId, u64);
opaque_id!(OfferingId, u64);
opaque_id!(FacultyId, u64);
opaque_id!(ScheduleEntryId, u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ScheduleVersionId(pub uuid::Uuid);

impl fmt::Display for ScheduleVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subjects are keyed by a human-assigned code in the source schema, not a
/// surrogate integer; wrapped here so it still participates as a first-class
/// id rather than a bare `String` passed around by convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct SubjectCode(pub String);

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubjectCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Index of an [`Event`](super::event::Event) within a single solve. Never
/// persisted, never compared across solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventIndex(pub usize);

impl fmt::Display for EventIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
