//! CP-SAT Model Builder (SPEC_FULL.md §4.3): boolean decision variables, hard
//! constraints C1–C4, and the seat-waste-minimizing objective.

use std::collections::HashMap;

use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};

use crate::domain::{BatchId, Event, EventIndex, FacultyId, Room, RoomId, TimeslotId};
use crate::prune::EventDomain;

/// The built model plus the decision variable lookup, so the solver driver
/// can read values back out after solving without rebuilding any indices.
pub struct ScheduleModel {
    pub builder: CpModelBuilder,
    pub vars: HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
}

/// Build the CP-SAT model: one boolean per surviving (event, timeslot, room)
/// triple, constraints C1–C4, and the waste-minimizing objective.
pub fn build_model(
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    rooms_by_id: &HashMap<RoomId, Room>,
) -> ScheduleModel {
    let mut builder = CpModelBuilder::default();
    let mut vars: HashMap<(EventIndex, TimeslotId, RoomId), BoolVar> = HashMap::new();

    for event in events {
        for &(timeslot_id, room_id) in &domains[&event.index] {
            vars.insert((event.index, timeslot_id, room_id), builder.new_bool_var());
        }
    }

    add_assignment_constraints(&mut builder, events, domains, &vars);
    add_room_constraints(&mut builder, events, domains, &vars);
    add_batch_constraints(&mut builder, events, domains, &vars);
    add_faculty_constraints(&mut builder, events, domains, &vars);
    add_objective(&mut builder, events, domains, &vars, rooms_by_id);

    ScheduleModel { builder, vars }
}

/// C1: each event is assigned to exactly one (timeslot, room).
fn add_assignment_constraints(
    builder: &mut CpModelBuilder,
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    vars: &HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
) {
    for event in events {
        let mut sum = LinearExpr::from(0);
        for &(timeslot_id, room_id) in &domains[&event.index] {
            sum = sum + LinearExpr::from(vars[&(event.index, timeslot_id, room_id)].clone());
        }
        builder.add_eq(sum, LinearExpr::from(1));
    }
}

/// C2: no two events occupy the same (timeslot, room).
fn add_room_constraints(
    builder: &mut CpModelBuilder,
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    vars: &HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
) {
    let mut by_room_timeslot: HashMap<(TimeslotId, RoomId), Vec<BoolVar>> = HashMap::new();
    for event in events {
        for &(timeslot_id, room_id) in &domains[&event.index] {
            by_room_timeslot
                .entry((timeslot_id, room_id))
                .or_default()
                .push(vars[&(event.index, timeslot_id, room_id)].clone());
        }
    }

    for group in by_room_timeslot.values() {
        let mut sum = LinearExpr::from(0);
        for var in group {
            sum = sum + LinearExpr::from(var.clone());
        }
        builder.add_le(sum, LinearExpr::from(1));
    }
}

/// C3: no batch attends two events in the same timeslot.
fn add_batch_constraints(
    builder: &mut CpModelBuilder,
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    vars: &HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
) {
    let mut by_batch_timeslot: HashMap<(BatchId, TimeslotId), Vec<BoolVar>> = HashMap::new();
    for event in events {
        for &(timeslot_id, room_id) in &domains[&event.index] {
            by_batch_timeslot
                .entry((event.batch_id, timeslot_id))
                .or_default()
                .push(vars[&(event.index, timeslot_id, room_id)].clone());
        }
    }

    for group in by_batch_timeslot.values() {
        let mut sum = LinearExpr::from(0);
        for var in group {
            sum = sum + LinearExpr::from(var.clone());
        }
        builder.add_le(sum, LinearExpr::from(1));
    }
}

/// C4: no faculty teaches two events in the same timeslot.
fn add_faculty_constraints(
    builder: &mut CpModelBuilder,
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    vars: &HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
) {
    let mut by_faculty_timeslot: HashMap<(FacultyId, TimeslotId), Vec<BoolVar>> = HashMap::new();
    for event in events {
        for &(timeslot_id, room_id) in &domains[&event.index] {
            by_faculty_timeslot
                .entry((event.faculty_id, timeslot_id))
                .or_default()
                .push(vars[&(event.index, timeslot_id, room_id)].clone());
        }
    }

    for group in by_faculty_timeslot.values() {
        let mut sum = LinearExpr::from(0);
        for var in group {
            sum = sum + LinearExpr::from(var.clone());
        }
        builder.add_le(sum, LinearExpr::from(1));
    }
}

/// Minimize total seat waste: `Σ max(0, capacity - batch_size) · x[e,t,r]`.
/// Terms with zero waste are omitted; if none remain, no objective is
/// posted and any feasible assignment is acceptable.
fn add_objective(
    builder: &mut CpModelBuilder,
    events: &[Event],
    domains: &HashMap<EventIndex, EventDomain>,
    vars: &HashMap<(EventIndex, TimeslotId, RoomId), BoolVar>,
    rooms_by_id: &HashMap<RoomId, Room>,
) {
    let weighted_terms: Vec<(i64, BoolVar)> = events
        .iter()
        .flat_map(|event| {
            domains[&event.index].iter().filter_map(move |&(timeslot_id, room_id)| {
                let waste = rooms_by_id[&room_id]
                    .capacity
                    .saturating_sub(event.batch_size);
                if waste == 0 {
                    return None;
                }
                Some((waste as i64, vars[&(event.index, timeslot_id, room_id)].clone()))
            })
        })
        .collect();

    if !weighted_terms.is_empty() {
        let objective: LinearExpr = weighted_terms.into_iter().collect();
        builder.minimize(objective);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacultyId, OfferingId, RoomType, SubjectType};
    use crate::prune::prune_domains;
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

    fn timeslot(id: u64) -> crate::domain::Timeslot {
        crate::domain::Timeslot {
            id: TimeslotId(id),
            day: 0,
            slot: id as u16,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn every_surviving_pair_gets_exactly_one_variable() {
        let rooms = vec![room(1, 30, RoomType::Theory)];
        let timeslots = vec![timeslot(1), timeslot(2)];
        let events = vec![Event {
            index: EventIndex(0),
            offering_id: OfferingId(1),
            batch_id: BatchId(1),
            faculty_id: FacultyId(1),
            subject_type: SubjectType::Theory,
            batch_size: 25,
        }];

        let domains = prune_domains(&events, &timeslots, &rooms);
        let rooms_by_id: HashMap<_, _> = rooms.iter().map(|r| (r.id, r.clone())).collect();
        let model = build_model(&events, &domains, &rooms_by_id);

        assert_eq!(model.vars.len(), 2);
    }
}
