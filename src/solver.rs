//! Solver Driver (SPEC_FULL.md §4.4): invokes CP-SAT with a time limit and
//! worker parallelism, classifies the result, and extracts assignments.

use std::collections::HashMap;
use std::time::Instant;

use cp_sat::proto::{CpSolverStatus, SatParameters};
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::domain::{CandidateAssignment, Event, EventIndex, NewScheduleEntry, Timeslot, TimeslotId};
use crate::model::ScheduleModel;

/// Only `OPTIMAL` and `FEASIBLE` are accepted. Any other status — including
/// a timeout with no incumbent — is a failure.
pub fn solve(
    mut model: ScheduleModel,
    events: &[Event],
    config: SolverConfig,
) -> Result<(Vec<CandidateAssignment>, String), String> {
    let mut params = SatParameters::default();
    params.max_time_in_seconds = Some(config.time_limit_seconds as f64);
    params.num_search_workers = Some(config.workers as i32);

    let started = Instant::now();
    let response = model.builder.solve_with_parameters(&params);
    let elapsed = started.elapsed();

    let status = response.status();
    debug!(?status, var_count = model.vars.len(), "cp-sat solve finished");

    match status {
        CpSolverStatus::Optimal | CpSolverStatus::Feasible => {
            info!(
                event_count = events.len(),
                var_count = model.vars.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "solve accepted"
            );
            Ok((extract_assignments(&model, &response), format!("{status:?}")))
        }
        other => Err(format!("{other:?}")),
    }
}

fn extract_assignments(
    model: &ScheduleModel,
    response: &cp_sat::proto::CpSolverResponse,
) -> Vec<CandidateAssignment> {
    let mut assignments = Vec::new();
    for (&(event_id, timeslot_id, room_id), var) in &model.vars {
        if var.solution_value(response) {
            assignments.push(CandidateAssignment {
                event_id,
                timeslot_id,
                room_id,
            });
        }
    }
    assignments
}

/// Reject up front if the number of required events exceeds the number of
/// (room, timeslot) slots available, before any model is built.
pub fn precheck_capacity(event_count: usize, room_count: usize, timeslot_count: usize) -> bool {
    event_count <= room_count.saturating_mul(timeslot_count)
}

/// Turn accepted assignments into persistable entries: day/slot copied from
/// the timeslot record, faculty/batch/offering from the event.
pub fn materialize_entries(
    events: &[Event],
    timeslots: &HashMap<TimeslotId, Timeslot>,
    assignments: &[CandidateAssignment],
) -> Vec<NewScheduleEntry> {
    let events_by_index: HashMap<EventIndex, &Event> =
        events.iter().map(|e| (e.index, e)).collect();

    assignments
        .iter()
        .filter_map(|assignment| {
            let event = events_by_index.get(&assignment.event_id)?;
            let timeslot = timeslots.get(&assignment.timeslot_id)?;
            Some(NewScheduleEntry {
                offering_id: event.offering_id,
                faculty_id: event.faculty_id,
                batch_id: event.batch_id,
                room_id: assignment.room_id,
                day: timeslot.day,
                slot: timeslot.slot,
            })
        })
        .collect()
}
