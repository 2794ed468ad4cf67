use super::ids::{BatchId, EventIndex, FacultyId, OfferingId};
use super::subject::SubjectType;
use serde::{Deserialize, Serialize};

/// One instance of a class meeting needing one timeslot and one room.
///
/// Derived by the event expander, owned entirely by a single solve, and
/// discarded once that solve finishes — never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub index: EventIndex,
    pub offering_id: OfferingId,
    pub batch_id: BatchId,
    pub faculty_id: FacultyId,
    pub subject_type: SubjectType,
    pub batch_size: u32,
}

impl Event {
    pub fn is_lab(&self) -> bool {
        matches!(self.subject_type, SubjectType::Lab)
    }
}

/// Minimal projection the validator and optimizer adapter need per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProjection {
    pub batch_id: Option<BatchId>,
    pub faculty_id: Option<FacultyId>,
    pub batch_size: Option<u32>,
    pub is_lab: bool,
}

impl From<&Event> for EventProjection {
    fn from(event: &Event) -> Self {
        Self {
            batch_id: Some(event.batch_id),
            faculty_id: Some(event.faculty_id),
            batch_size: Some(event.batch_size),
            is_lab: event.is_lab(),
        }
    }
}
