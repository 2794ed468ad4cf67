//! Optimizer Integration Adapter (SPEC_FULL.md §4.7): assembles lookup
//! tables from a prior version, feeds them and a goals list to an opaque
//! re-optimizer, and routes its output through the Validator before any
//! write.

use std::collections::HashMap;

use tracing::info;

use crate::domain::{
    BatchId, BatchProjection, CandidateAssignment, EventIndex, EventProjection, FacultyId,
    FacultyProjection, NewScheduleEntry, OfferingId, RoomProjection, ScheduleVersionId,
    SubjectType, TimeslotId, TimeslotProjection,
};
use crate::error::OptimizeError;
use crate::repository::Repository;
use crate::validate::validate_assignments;

/// Everything the re-optimizer needs to propose a new schedule: the current
/// entries of the source version, plus read-only lookup snapshots — one per
/// entity the adapter reconstructs (SPEC_FULL.md §4.7: `events_lookup`,
/// `timeslots_lookup`, `rooms_lookup`, `faculties_lookup`, `batches_lookup`).
pub struct OptimizationContext {
    pub current_entries: Vec<CandidateAssignment>,
    pub events: HashMap<EventIndex, EventProjection>,
    pub timeslots: HashMap<TimeslotId, TimeslotProjection>,
    pub rooms: HashMap<crate::domain::RoomId, RoomProjection>,
    pub faculties: HashMap<FacultyId, FacultyProjection>,
    pub batches: HashMap<BatchId, BatchProjection>,
    pub goals: Vec<String>,
}

/// An opaque producer of candidate schedules (e.g. an LLM-backed
/// re-optimizer). Its output is never trusted — it always passes through
/// [`validate_assignments`] before persistence.
pub trait ReOptimizer {
    fn propose(&self, ctx: &OptimizationContext) -> Result<Vec<CandidateAssignment>, String>;
}

/// Returns the input unchanged. Demonstrates the [`ReOptimizer`] contract
/// and is useful for exercising the adapter/validator wiring in tests; not a
/// stand-in for a real optimizer.
pub struct IdentityReoptimizer;

impl ReOptimizer for IdentityReoptimizer {
    fn propose(&self, ctx: &OptimizationContext) -> Result<Vec<CandidateAssignment>, String> {
        Ok(ctx.current_entries.clone())
    }
}

/// One source-version entry, carrying everything needed to rebuild an
/// `EventIndex` projection and, on success, a persistable entry again.
struct ResolvedEntry {
    event_id: EventIndex,
    offering_id: OfferingId,
    faculty_id: FacultyId,
    batch_id: BatchId,
    timeslot_id: TimeslotId,
    room_id: crate::domain::RoomId,
}

/// Read the target source version (explicit id, else the most recent),
/// reconstruct lookups, forward them plus `goals` to `optimizer`, validate
/// its output, and — on success — persist a new version derived from the
/// source's name.
pub fn apply_external_optimization(
    repo: &mut dyn Repository,
    optimizer: &dyn ReOptimizer,
    source_version_id: Option<ScheduleVersionId>,
    goals: Vec<String>,
) -> Result<ScheduleVersionId, OptimizeError> {
    let source_version = match source_version_id {
        Some(id) => repo
            .versions()
            .into_iter()
            .find(|v| v.id == id)
            .ok_or(OptimizeError::SourceVersionNotFound(id))?,
        None => repo.latest_version().ok_or(OptimizeError::NoVersions)?,
    };

    let source_entries = repo.version_entries(source_version.id);

    let timeslots_by_id: HashMap<TimeslotId, crate::domain::Timeslot> =
        repo.timeslots().into_iter().map(|t| (t.id, t)).collect();
    let timeslots_by_day_slot: HashMap<(u8, u16), TimeslotId> = timeslots_by_id
        .values()
        .map(|t| ((t.day, t.slot), t.id))
        .collect();
    let timeslots: HashMap<TimeslotId, TimeslotProjection> =
        timeslots_by_id.values().map(|t| (t.id, t.into())).collect();
    let rooms: HashMap<_, RoomProjection> =
        repo.rooms().iter().map(|r| (r.id, r.into())).collect();
    let batches_by_id = repo.batches();
    let batches: HashMap<BatchId, BatchProjection> =
        batches_by_id.values().map(|b| (b.id, b.into())).collect();
    let faculties: HashMap<FacultyId, FacultyProjection> =
        repo.faculty().values().map(|f| (f.id, f.into())).collect();
    let offerings_by_id: HashMap<OfferingId, crate::domain::Offering> =
        repo.offerings().into_iter().map(|o| (o.id, o)).collect();
    let subjects = repo.subjects();

    let resolved: Vec<ResolvedEntry> = source_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ResolvedEntry {
            event_id: EventIndex(i),
            offering_id: entry.offering_id,
            faculty_id: entry.faculty_id,
            batch_id: entry.batch_id,
            timeslot_id: timeslots_by_day_slot[&(entry.day, entry.slot)],
            room_id: entry.room_id,
        })
        .collect();

    let mut events = HashMap::with_capacity(resolved.len());
    let mut current_entries = Vec::with_capacity(resolved.len());
    for entry in &resolved {
        let is_lab = offerings_by_id
            .get(&entry.offering_id)
            .and_then(|o| subjects.get(&o.subject_code))
            .map(|s| matches!(s.subject_type, SubjectType::Lab))
            .unwrap_or(false);
        events.insert(
            entry.event_id,
            EventProjection {
                batch_id: Some(entry.batch_id),
                faculty_id: Some(entry.faculty_id),
                batch_size: batches_by_id.get(&entry.batch_id).map(|b| b.size),
                is_lab,
            },
        );
        current_entries.push(CandidateAssignment {
            event_id: entry.event_id,
            timeslot_id: entry.timeslot_id,
            room_id: entry.room_id,
        });
    }

    let ctx = OptimizationContext {
        current_entries,
        events: events.clone(),
        timeslots: timeslots.clone(),
        rooms: rooms.clone(),
        faculties,
        batches,
        goals,
    };

    let proposed = optimizer
        .propose(&ctx)
        .map_err(OptimizeError::Reoptimizer)?;

    validate_assignments(&proposed, &timeslots, &rooms, &events)?;

    // I1 is the validator's explicit non-check (SPEC_FULL.md §9); the adapter
    // performs its own coverage assertion before persisting.
    let mut expected_coverage: HashMap<OfferingId, usize> = HashMap::new();
    for entry in &resolved {
        *expected_coverage.entry(entry.offering_id).or_default() += 1;
    }
    let mut actual_coverage: HashMap<OfferingId, usize> = HashMap::new();
    let resolved_by_event: HashMap<EventIndex, &ResolvedEntry> =
        resolved.iter().map(|e| (e.event_id, e)).collect();
    for assignment in &proposed {
        if let Some(entry) = resolved_by_event.get(&assignment.event_id) {
            *actual_coverage.entry(entry.offering_id).or_default() += 1;
        }
    }
    let lost: Vec<OfferingId> = expected_coverage
        .iter()
        .filter(|(offering_id, &expected)| actual_coverage.get(offering_id).copied().unwrap_or(0) != expected)
        .map(|(offering_id, _)| *offering_id)
        .collect();
    if !lost.is_empty() {
        return Err(OptimizeError::CoverageLost(lost));
    }

    let new_entries: Vec<NewScheduleEntry> = proposed
        .iter()
        .filter_map(|assignment| {
            let entry = resolved_by_event.get(&assignment.event_id)?;
            let timeslot = timeslots_by_id.get(&assignment.timeslot_id)?;
            Some(NewScheduleEntry {
                offering_id: entry.offering_id,
                faculty_id: entry.faculty_id,
                batch_id: entry.batch_id,
                room_id: assignment.room_id,
                day: timeslot.day,
                slot: timeslot.slot,
            })
        })
        .collect();

    let new_name = format!("{}-optimized", source_version.name);
    info!(source = %source_version.id, entries = new_entries.len(), "writing optimized version");
    repo.create_version_with_entries(&new_name, &new_entries)
        .map_err(OptimizeError::Persistence)
}
