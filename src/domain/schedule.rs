use super::ids::{
    BatchId, FacultyId, OfferingId, RoomId, ScheduleEntryId, ScheduleVersionId, TimeslotId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionStatus {
    Draft,
    Published,
}

/// An immutable, named snapshot of a complete schedule. Owns its entries:
/// removing the version removes all of them (cascade delete is the
/// repository's concern, not this type's).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleVersion {
    pub id: ScheduleVersionId,
    pub name: String,
    pub status: VersionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryId,
    pub version_id: ScheduleVersionId,
    pub offering_id: OfferingId,
    pub faculty_id: FacultyId,
    pub batch_id: BatchId,
    pub room_id: RoomId,
    pub day: u8,
    pub slot: u16,
}

/// A candidate placement awaiting validation — what the solver produces
/// internally, and what an external re-optimizer must submit. Carries no
/// entry id or version id because it doesn't exist as a row yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAssignment {
    pub event_id: super::ids::EventIndex,
    pub timeslot_id: TimeslotId,
    pub room_id: RoomId,
}

/// A fully-resolved entry ready for persistence: day/slot copied from the
/// timeslot record, faculty/batch from the event, per SPEC_FULL.md §4.4.
/// Missing only the id and version_id a [`Repository`](crate::repository::Repository)
/// assigns on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleEntry {
    pub offering_id: OfferingId,
    pub faculty_id: FacultyId,
    pub batch_id: BatchId,
    pub room_id: RoomId,
    pub day: u8,
    pub slot: u16,
}
