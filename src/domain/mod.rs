//! Immutable value records for the scheduling domain, plus the opaque id
//! types that keep them from being confused with each other across module
//! boundaries.

pub mod batch;
pub mod event;
pub mod faculty;
pub mod ids;
pub mod offering;
pub mod room;
pub mod schedule;
pub mod subject;
pub mod timeslot;

pub use batch::{Batch, BatchProjection, Shift};
pub use event::{Event, EventProjection};
pub use faculty::{Faculty, FacultyAssignment, FacultyProjection};
pub use ids::{
    BatchId, EventIndex, FacultyId, OfferingId, RoomId, ScheduleEntryId, ScheduleVersionId,
    SubjectCode, TimeslotId,
};
pub use offering::Offering;
pub use room::{Room, RoomProjection, RoomType};
pub use schedule::{CandidateAssignment, NewScheduleEntry, ScheduleEntry, ScheduleVersion, VersionStatus};
pub use subject::{Subject, SubjectType};
pub use timeslot::{Timeslot, TimeslotProjection};
