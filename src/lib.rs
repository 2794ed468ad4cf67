//! University timetable scheduler core: expands offerings into events,
//! prunes infeasible placements, builds and solves a CP-SAT model, and
//! guards any write — solver-produced or externally re-optimized — behind
//! the same hard-constraint validator.
//!
//! The three public entry points are [`generate_schedule`],
//! [`validate_assignments`], and [`apply_external_optimization`].

pub mod config;
pub mod domain;
pub mod error;
pub mod expand;
pub mod model;
pub mod optimize;
pub mod prune;
pub mod repository;
pub mod solver;
pub mod validate;

use std::collections::HashMap;

use tracing::{info, instrument, warn};

pub use config::SolverConfig;
pub use domain::{CandidateAssignment, EventIndex, RoomId, ScheduleEntry, ScheduleVersionId, TimeslotId};
pub use error::{GenerateError, OptimizeError, ValidationError};
pub use optimize::{apply_external_optimization, IdentityReoptimizer, OptimizationContext, ReOptimizer};
pub use repository::{InMemoryRepository, Repository};
pub use validate::validate_assignments;

/// Cap on [`GenerateSuccess::sample_entries`], per SPEC_FULL.md §6: full
/// results live in the repository, the return value only samples them.
const SAMPLE_ENTRIES_LIMIT: usize = 20;

/// What [`generate_schedule`] hands back on success: the id of the newly
/// written version, its total entry count, a bounded sample of the entries
/// themselves, and the CP-SAT status string that produced them.
#[derive(Debug, Clone)]
pub struct GenerateSuccess {
    pub version_id: ScheduleVersionId,
    pub entries_count: usize,
    pub sample_entries: Vec<ScheduleEntry>,
    pub solver_status: String,
}

/// Run the full generation pipeline: expand → prune → precheck → build →
/// solve → sanity-validate → materialize → persist.
///
/// `version_name` defaults to a timestamp-free placeholder (`"generated"`)
/// when `None`; callers that need a specific name should pass one.
#[instrument(skip(repo, config), fields(version_name))]
pub fn generate_schedule(
    repo: &mut dyn Repository,
    version_name: Option<&str>,
    config: SolverConfig,
) -> Result<GenerateSuccess, GenerateError> {
    let rooms = repo.rooms();
    let timeslots = repo.timeslots();
    let offerings = repo.offerings();
    let subjects = repo.subjects();
    let batches = repo.batches();
    let faculty_assignments = repo.faculty_assignments();

    if rooms.is_empty() || timeslots.is_empty() || offerings.is_empty() {
        return Err(GenerateError::InsufficientData);
    }

    let (events, summary) =
        expand::expand_events(&offerings, &subjects, &batches, &faculty_assignments);

    if events.is_empty() {
        return Err(GenerateError::NoEvents { skipped: summary });
    }
    if summary.total_skipped() > 0 {
        warn!(%summary, "some offerings were skipped during expansion");
    }

    let capacity = rooms.len().saturating_mul(timeslots.len());
    if !solver::precheck_capacity(events.len(), rooms.len(), timeslots.len()) {
        return Err(GenerateError::PrecheckFailed {
            required: events.len(),
            capacity,
        });
    }

    let domains = prune::prune_domains(&events, &timeslots, &rooms);
    if let Some(event) = prune::first_empty_domain(&events, &domains) {
        return Err(GenerateError::NoDomainForEvent {
            offering_id: event.offering_id,
        });
    }

    let rooms_by_id: HashMap<RoomId, domain::Room> =
        rooms.iter().map(|r| (r.id, r.clone())).collect();
    let model = model::build_model(&events, &domains, &rooms_by_id);
    let var_count = model.vars.len();

    let (assignments, solver_status) = solver::solve(model, &events, config)
        .map_err(|status| GenerateError::NoSolution { status })?;

    sanity_check(&assignments, &events, &timeslots, &rooms)?;

    let timeslots_by_id: HashMap<TimeslotId, domain::Timeslot> =
        timeslots.iter().map(|t| (t.id, t.clone())).collect();
    let new_entries = solver::materialize_entries(&events, &timeslots_by_id, &assignments);

    let name = version_name.unwrap_or("generated");
    let version_id = repo
        .create_version_with_entries(name, &new_entries)
        .map_err(GenerateError::Persistence)?;

    let entries = repo.version_entries(version_id);
    let sample_entries = entries.iter().take(SAMPLE_ENTRIES_LIMIT).copied().collect();

    info!(
        %version_id,
        entries_count = entries.len(),
        var_count,
        "schedule generated"
    );

    Ok(GenerateSuccess {
        version_id,
        entries_count: entries.len(),
        sample_entries,
        solver_status,
    })
}

/// Re-run the validator over the solver's own output before it is
/// persisted (SPEC_FULL.md §4.4): the solver's constraints should make
/// this vacuously true, but the validator is the single source of truth
/// for I2–I6, not the model encoding.
fn sanity_check(
    assignments: &[CandidateAssignment],
    events: &[domain::Event],
    timeslots: &[domain::Timeslot],
    rooms: &[domain::Room],
) -> Result<(), GenerateError> {
    let events_by_index: HashMap<EventIndex, domain::EventProjection> =
        events.iter().map(|e| (e.index, e.into())).collect();
    let timeslots_by_id: HashMap<TimeslotId, domain::TimeslotProjection> =
        timeslots.iter().map(|t| (t.id, t.into())).collect();
    let rooms_by_id: HashMap<RoomId, domain::RoomProjection> =
        rooms.iter().map(|r| (r.id, r.into())).collect();

    validate_assignments(assignments, &timeslots_by_id, &rooms_by_id, &events_by_index)
        .map_err(|err| GenerateError::NoSolution {
            status: format!("solver output failed sanity validation: {err}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Batch, BatchId, Faculty, FacultyAssignment, FacultyId, Offering, OfferingId,
        Room, RoomType, Shift, Subject, SubjectCode, SubjectType, Timeslot};
    use chrono::NaiveTime;

    fn seeded_repo() -> InMemoryRepository {
        let mut repo = InMemoryRepository::default();
        repo.rooms.push(Room {
            id: RoomId(1),
            code: "R1".into(),
            capacity: 30,
            room_type: RoomType::Theory,
            location: None,
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(1),
            day: 0,
            slot: 1,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(2),
            day: 0,
            slot: 2,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        });
        repo.subjects.push(Subject {
            code: SubjectCode("CS101".into()),
            title: "Intro".into(),
            subject_type: SubjectType::Theory,
            classes_per_week: 1,
            duration_slots: 1,
        });
        repo.batches.push(Batch {
            id: BatchId(1),
            name: "B1".into(),
            semester: 1,
            size: 25,
            shift: Shift::Day,
        });
        repo.offerings.push(Offering {
            id: OfferingId(1),
            subject_code: SubjectCode("CS101".into()),
            batch_id: BatchId(1),
            semester: 1,
            elective: false,
        });
        repo.faculty.push(Faculty {
            id: FacultyId(1),
            name: "Prof".into(),
        });
        repo.faculty_assignments.push(FacultyAssignment {
            id: 1,
            offering_id: OfferingId(1),
            faculty_id: FacultyId(1),
        });
        repo
    }

    #[test]
    fn generates_a_tiny_feasible_schedule() {
        let mut repo = seeded_repo();
        let result =
            generate_schedule(&mut repo, Some("v1"), SolverConfig::default()).unwrap();
        assert_eq!(result.entries_count, 1);
        assert_eq!(result.sample_entries.len(), 1);
    }

    #[test]
    fn tiny_feasible_schedule_fills_two_distinct_timeslots_in_one_room() {
        // spec.md §8 scenario 1: 1 theory room (cap 30), 2 timeslots, 1 batch
        // (size 25), 1 theory subject cpw=2, 1 faculty assigned.
        let mut repo = seeded_repo();
        repo.subjects[0].classes_per_week = 2;

        let result = generate_schedule(&mut repo, Some("v1"), SolverConfig::default()).unwrap();
        assert_eq!(result.entries_count, 2);

        let entries = repo.version_entries(result.version_id);
        assert!(entries.iter().all(|e| e.room_id == RoomId(1)));
        let slots: std::collections::HashSet<u16> = entries.iter().map(|e| e.slot).collect();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn rejects_empty_repository() {
        let mut repo = InMemoryRepository::default();
        let result = generate_schedule(&mut repo, None, SolverConfig::default());
        assert!(matches!(result, Err(GenerateError::InsufficientData)));
    }

    #[test]
    fn rejects_when_no_room_can_hold_the_batch() {
        let mut repo = seeded_repo();
        repo.rooms[0].capacity = 5;
        let result = generate_schedule(&mut repo, None, SolverConfig::default());
        assert!(matches!(
            result,
            Err(GenerateError::NoDomainForEvent { offering_id }) if offering_id == OfferingId(1)
        ));
    }

    #[test]
    fn rejects_when_events_outnumber_room_timeslot_capacity() {
        let mut repo = seeded_repo();
        for i in 2..=100u64 {
            repo.offerings.push(Offering {
                id: OfferingId(i),
                subject_code: SubjectCode("CS101".into()),
                batch_id: BatchId(1),
                semester: 1,
                elective: false,
            });
            repo.faculty_assignments.push(FacultyAssignment {
                id: i,
                offering_id: OfferingId(i),
                faculty_id: FacultyId(1),
            });
        }
        // 100 single-class offerings, 1 room x 2 timeslots = 2 slots.
        let result = generate_schedule(&mut repo, None, SolverConfig::default());
        assert!(matches!(result, Err(GenerateError::PrecheckFailed { .. })));
    }

    #[test]
    fn lab_subject_is_always_placed_in_the_lab_room() {
        let mut repo = InMemoryRepository::default();
        repo.rooms.push(Room {
            id: RoomId(1),
            code: "LAB".into(),
            capacity: 40,
            room_type: RoomType::Lab,
            location: None,
        });
        repo.rooms.push(Room {
            id: RoomId(2),
            code: "THEORY".into(),
            capacity: 40,
            room_type: RoomType::Theory,
            location: None,
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(1),
            day: 0,
            slot: 1,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(2),
            day: 0,
            slot: 2,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        });
        repo.subjects.push(Subject {
            code: SubjectCode("CS202L".into()),
            title: "Lab".into(),
            subject_type: SubjectType::Lab,
            classes_per_week: 1,
            duration_slots: 1,
        });
        repo.batches.push(Batch {
            id: BatchId(1),
            name: "B1".into(),
            semester: 1,
            size: 25,
            shift: Shift::Day,
        });
        repo.offerings.push(Offering {
            id: OfferingId(1),
            subject_code: SubjectCode("CS202L".into()),
            batch_id: BatchId(1),
            semester: 1,
            elective: false,
        });
        repo.faculty.push(Faculty {
            id: FacultyId(1),
            name: "Prof".into(),
        });
        repo.faculty_assignments.push(FacultyAssignment {
            id: 1,
            offering_id: OfferingId(1),
            faculty_id: FacultyId(1),
        });

        let result = generate_schedule(&mut repo, None, SolverConfig::default()).unwrap();
        assert_eq!(result.entries_count, 1);
        assert_eq!(result.sample_entries[0].room_id, RoomId(1));
    }

    #[test]
    fn shared_faculty_makes_four_required_events_infeasible() {
        // Two batches each needing 2 classes/week from the same faculty, but
        // only 2 timeslots exist: the faculty can't teach 4 events across 2
        // slots, so generation must fail (either at pruning or at solve).
        let mut repo = InMemoryRepository::default();
        repo.rooms.push(Room {
            id: RoomId(1),
            code: "R1".into(),
            capacity: 30,
            room_type: RoomType::Theory,
            location: None,
        });
        repo.rooms.push(Room {
            id: RoomId(2),
            code: "R2".into(),
            capacity: 30,
            room_type: RoomType::Theory,
            location: None,
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(1),
            day: 0,
            slot: 1,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        });
        repo.timeslots.push(Timeslot {
            id: TimeslotId(2),
            day: 0,
            slot: 2,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        });
        repo.subjects.push(Subject {
            code: SubjectCode("CS101".into()),
            title: "Intro".into(),
            subject_type: SubjectType::Theory,
            classes_per_week: 2,
            duration_slots: 1,
        });
        repo.batches.push(Batch {
            id: BatchId(1),
            name: "B1".into(),
            semester: 1,
            size: 20,
            shift: Shift::Day,
        });
        repo.batches.push(Batch {
            id: BatchId(2),
            name: "B2".into(),
            semester: 1,
            size: 20,
            shift: Shift::Day,
        });
        repo.offerings.push(Offering {
            id: OfferingId(1),
            subject_code: SubjectCode("CS101".into()),
            batch_id: BatchId(1),
            semester: 1,
            elective: false,
        });
        repo.offerings.push(Offering {
            id: OfferingId(2),
            subject_code: SubjectCode("CS101".into()),
            batch_id: BatchId(2),
            semester: 1,
            elective: false,
        });
        repo.faculty.push(Faculty {
            id: FacultyId(1),
            name: "Shared".into(),
        });
        repo.faculty_assignments.push(FacultyAssignment {
            id: 1,
            offering_id: OfferingId(1),
            faculty_id: FacultyId(1),
        });
        repo.faculty_assignments.push(FacultyAssignment {
            id: 2,
            offering_id: OfferingId(2),
            faculty_id: FacultyId(1),
        });

        let result = generate_schedule(&mut repo, None, SolverConfig::default());
        assert!(matches!(
            result,
            Err(GenerateError::NoSolution { .. }) | Err(GenerateError::NoDomainForEvent { .. })
        ));
    }

    #[test]
    fn failed_generation_leaves_no_version_behind() {
        let mut repo = InMemoryRepository::default();
        let result = generate_schedule(&mut repo, None, SolverConfig::default());
        assert!(result.is_err());
        assert!(repo.versions().is_empty());
    }
}
