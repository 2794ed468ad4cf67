//! Hard-Constraint Validator (SPEC_FULL.md §4.5) — a pure, solver-independent
//! check over a list of candidate assignments. This is the single source of
//! truth for I2–I6 on any assignment list regardless of origin, and must
//! never be bypassed before persistence.

use std::collections::{HashMap, HashSet};

use crate::domain::{
    CandidateAssignment, EventIndex, EventProjection, RoomId, RoomProjection, RoomType,
    TimeslotId, TimeslotProjection,
};
use crate::error::ValidationError;

/// Two passes over the whole assignment list, matching the ground-truth
/// original: a first pass checks existence for every assignment, then a
/// second pass checks room double-booking → faculty clash → batch clash →
/// capacity → lab compatibility. The reported reason string is part of the
/// contract, so an assignment list with multiple violations always reports
/// the same one this validator's source does, regardless of where in the
/// list the later violations fall. Lookups are borrowed, read-only
/// snapshots; this function never mutates them and allocates its own
/// transient tracking sets.
pub fn validate_assignments(
    assignments: &[CandidateAssignment],
    timeslots: &HashMap<TimeslotId, TimeslotProjection>,
    rooms: &HashMap<RoomId, RoomProjection>,
    events: &HashMap<EventIndex, EventProjection>,
) -> Result<(), ValidationError> {
    for assignment in assignments {
        if !events.contains_key(&assignment.event_id) {
            return Err(ValidationError::UnknownEvent(assignment.event_id));
        }
        if !timeslots.contains_key(&assignment.timeslot_id) {
            return Err(ValidationError::UnknownTimeslot(assignment.timeslot_id));
        }
        if !rooms.contains_key(&assignment.room_id) {
            return Err(ValidationError::UnknownRoom(assignment.room_id));
        }
    }

    let mut seen_room_ts: HashSet<(TimeslotId, RoomId)> = HashSet::new();
    let mut faculty_ts: HashMap<crate::domain::FacultyId, HashSet<TimeslotId>> = HashMap::new();
    let mut batch_ts: HashMap<crate::domain::BatchId, HashSet<TimeslotId>> = HashMap::new();

    for assignment in assignments {
        let event = &events[&assignment.event_id];
        let room = &rooms[&assignment.room_id];

        let key = (assignment.timeslot_id, assignment.room_id);
        if !seen_room_ts.insert(key) {
            return Err(ValidationError::RoomDoubleBooked {
                room_id: assignment.room_id,
                timeslot_id: assignment.timeslot_id,
            });
        }

        if let Some(faculty_id) = event.faculty_id {
            let slots = faculty_ts.entry(faculty_id).or_default();
            if !slots.insert(assignment.timeslot_id) {
                return Err(ValidationError::FacultyClash {
                    faculty_id,
                    timeslot_id: assignment.timeslot_id,
                });
            }
        }

        if let Some(batch_id) = event.batch_id {
            let slots = batch_ts.entry(batch_id).or_default();
            if !slots.insert(assignment.timeslot_id) {
                return Err(ValidationError::BatchClash {
                    batch_id,
                    timeslot_id: assignment.timeslot_id,
                });
            }
        }

        if let Some(batch_size) = event.batch_size {
            if room.capacity < batch_size {
                return Err(ValidationError::CapacityExceeded {
                    room_id: assignment.room_id,
                    capacity: room.capacity,
                    batch_size,
                    event_id: assignment.event_id,
                });
            }
        }

        if event.is_lab && room.room_type != RoomType::Lab {
            return Err(ValidationError::LabMismatch {
                event_id: assignment.event_id,
                room_id: assignment.room_id,
            });
        }
    }

    Ok(())
}
