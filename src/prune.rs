//! Domain Pruner (SPEC_FULL.md §4.2): for each event, compute the feasible
//! set of (timeslot, room) pairs.

use std::collections::HashMap;

use crate::domain::{Event, EventIndex, Room, RoomType, Timeslot, TimeslotId, RoomId};

/// `(timeslot, room)` pairs that satisfy capacity and lab/theory
/// compatibility for one event.
pub type EventDomain = Vec<(TimeslotId, RoomId)>;

/// Compute the feasible domain for every event. The returned map is dense
/// over `events`'s indices; an event with an empty `Vec` has no feasible
/// placement at all.
pub fn prune_domains(
    events: &[Event],
    timeslots: &[Timeslot],
    rooms: &[Room],
) -> HashMap<EventIndex, EventDomain> {
    let mut domains = HashMap::with_capacity(events.len());

    for event in events {
        let domain: EventDomain = timeslots
            .iter()
            .flat_map(|timeslot| rooms.iter().map(move |room| (timeslot, room)))
            .filter(|(_, room)| room.capacity >= event.batch_size)
            .filter(|(_, room)| !event.is_lab() || room.room_type == RoomType::Lab)
            .map(|(timeslot, room)| (timeslot.id, room.id))
            .collect();

        domains.insert(event.index, domain);
    }

    domains
}

/// Find the first event (in index order) whose domain is empty, if any.
pub fn first_empty_domain(
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
) -> Option<&Event> {
    events
        .iter()
        .find(|event| domains.get(&event.index).is_none_or(Vec::is_empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BatchId, FacultyId, SubjectType};
    use chrono::NaiveTime;

    fn room(id: u64, capacity: u32, room_type: RoomType) -> Room {
        Room {
            id: RoomId(id),
            code: format!("R{id}"),
            capacity,
            room_type,
            location: None,
        }
    }

    fn timeslot(id: u64, day: u8, slot: u16) -> Timeslot {
        Timeslot {
            id: TimeslotId(id),
            day,
            slot,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    fn event(idx: usize, batch_size: u32, subject_type: SubjectType) -> Event {
        Event {
            index: EventIndex(idx),
            offering_id: crate::domain::OfferingId(1),
            batch_id: BatchId(1),
            faculty_id: FacultyId(1),
            subject_type,
            batch_size,
        }
    }

    #[test]
    fn lab_event_only_admits_lab_rooms() {
        let rooms = vec![
            room(1, 40, RoomType::Lab),
            room(2, 40, RoomType::Theory),
        ];
        let timeslots = vec![timeslot(1, 0, 1)];
        let events = vec![event(0, 25, SubjectType::Lab)];

        let domains = prune_domains(&events, &timeslots, &rooms);

        let domain = &domains[&EventIndex(0)];
        assert_eq!(domain, &vec![(TimeslotId(1), RoomId(1))]);
    }

    #[test]
    fn capacity_below_batch_size_excludes_room() {
        let rooms = vec![room(1, 20, RoomType::Theory)];
        let timeslots = vec![timeslot(1, 0, 1)];
        let events = vec![event(0, 30, SubjectType::Theory)];

        let domains = prune_domains(&events, &timeslots, &rooms);

        assert!(domains[&EventIndex(0)].is_empty());
        assert!(first_empty_domain(&events, &domains).is_some());
    }

    #[test]
    fn theory_event_admits_any_room_type_with_capacity() {
        let rooms = vec![room(1, 30, RoomType::Lab), room(2, 30, RoomType::Theory)];
        let timeslots = vec![timeslot(1, 0, 1)];
        let events = vec![event(0, 25, SubjectType::Theory)];

        let domains = prune_domains(&events, &timeslots, &rooms);

        assert_eq!(domains[&EventIndex(0)].len(), 2);
    }
}
