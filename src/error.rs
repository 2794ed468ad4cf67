//! The error taxonomy from SPEC_FULL.md §7, one `thiserror` enum per
//! fallible boundary. Nothing in this crate panics or throws across a public
//! function boundary; every failure path returns one of these.

use crate::domain::{BatchId, FacultyId, OfferingId, RoomId, ScheduleVersionId, TimeslotId};
use crate::expand::ExpansionSummary;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("insufficient data: one or more required tables are empty")]
    InsufficientData,

    #[error("no events: all offerings lacked a subject, batch, or faculty ({skipped})")]
    NoEvents { skipped: ExpansionSummary },

    #[error(
        "precheck failed: {required} events exceed the {capacity} (room, timeslot) slots available"
    )]
    PrecheckFailed { required: usize, capacity: usize },

    #[error("no feasible (timeslot, room) domain for offering {offering_id}")]
    NoDomainForEvent { offering_id: OfferingId },

    #[error("no solution: solver returned status {status}")]
    NoSolution { status: String },

    #[error("persistence error: {0}")]
    Persistence(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown event_id {0}")]
    UnknownEvent(crate::domain::EventIndex),

    #[error("unknown timeslot_id {0}")]
    UnknownTimeslot(TimeslotId),

    #[error("unknown room_id {0}")]
    UnknownRoom(RoomId),

    #[error("room {room_id} double-booked at timeslot {timeslot_id}")]
    RoomDoubleBooked {
        room_id: RoomId,
        timeslot_id: TimeslotId,
    },

    #[error("faculty {faculty_id} has multiple events at timeslot {timeslot_id}")]
    FacultyClash {
        faculty_id: FacultyId,
        timeslot_id: TimeslotId,
    },

    #[error("batch {batch_id} has multiple events at timeslot {timeslot_id}")]
    BatchClash {
        batch_id: BatchId,
        timeslot_id: TimeslotId,
    },

    #[error(
        "room {room_id} capacity ({capacity}) smaller than batch size ({batch_size}) for event {event_id}"
    )]
    CapacityExceeded {
        room_id: RoomId,
        capacity: u32,
        batch_size: u32,
        event_id: crate::domain::EventIndex,
    },

    #[error("event {event_id} requires a lab but room {room_id} is not a lab")]
    LabMismatch {
        event_id: crate::domain::EventIndex,
        room_id: RoomId,
    },
}

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("source version {0} not found")]
    SourceVersionNotFound(ScheduleVersionId),

    #[error("no schedule versions exist to optimize")]
    NoVersions,

    #[error("re-optimizer failed: {0}")]
    Reoptimizer(String),

    #[error("optimization violated hard constraints: {0}")]
    Validation(#[from] ValidationError),

    #[error("optimized schedule dropped coverage for offering(s): {0:?}")]
    CoverageLost(Vec<OfferingId>),

    #[error("persistence error: {0}")]
    Persistence(String),
}
