//! The one trait the core consumes for persistence. A concrete `Repository`
//! is out of scope here (SPEC_FULL.md §1): this crate defines the contract
//! and a small in-memory implementation used by its own tests.
//!
//! Implementers are expected to maintain the indexes named in the original
//! spec (by version_id; by (batch_id, day, slot); by (faculty_id, day,
//! slot)) — that's a storage-layer concern, not something this trait can
//! enforce.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    Batch, BatchId, Faculty, FacultyAssignment, FacultyId, NewScheduleEntry, Offering, Room,
    ScheduleEntry, ScheduleEntryId, ScheduleVersion, ScheduleVersionId, Subject, SubjectCode,
    Timeslot, VersionStatus,
};

pub trait Repository {
    fn rooms(&self) -> Vec<Room>;
    /// Ordered by (day, slot), per SPEC_FULL.md §6.
    fn timeslots(&self) -> Vec<Timeslot>;
    fn offerings(&self) -> Vec<Offering>;
    fn subjects(&self) -> HashMap<SubjectCode, Subject>;
    fn batches(&self) -> HashMap<BatchId, Batch>;
    /// Ordered by id ascending, per SPEC_FULL.md §5 (the expander depends on
    /// this ordering to pick the first faculty assignment per offering).
    fn faculty_assignments(&self) -> Vec<FacultyAssignment>;
    fn faculty(&self) -> HashMap<FacultyId, Faculty>;

    /// Create one [`ScheduleVersion`] and its [`ScheduleEntry`] rows in a
    /// single transaction. Partial versions must never be observable.
    fn create_version_with_entries(
        &mut self,
        name: &str,
        entries: &[NewScheduleEntry],
    ) -> Result<ScheduleVersionId, String>;

    fn versions(&self) -> Vec<ScheduleVersion>;
    fn latest_version(&self) -> Option<ScheduleVersion>;
    fn version_entries(&self, version_id: ScheduleVersionId) -> Vec<ScheduleEntry>;
}

/// An in-memory [`Repository`] used by this crate's own tests and the demo
/// CLI. Not meant as a reference persistence layer.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    pub rooms: Vec<Room>,
    pub timeslots: Vec<Timeslot>,
    pub offerings: Vec<Offering>,
    pub subjects: Vec<Subject>,
    pub batches: Vec<Batch>,
    pub faculty_assignments: Vec<FacultyAssignment>,
    pub faculty: Vec<Faculty>,
    versions: Vec<ScheduleVersion>,
    entries: Vec<ScheduleEntry>,
    next_entry_id: u64,
}

impl Repository for InMemoryRepository {
    fn rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    fn timeslots(&self) -> Vec<Timeslot> {
        let mut ts = self.timeslots.clone();
        ts.sort_by_key(|t| (t.day, t.slot));
        ts
    }

    fn offerings(&self) -> Vec<Offering> {
        let mut offerings = self.offerings.clone();
        offerings.sort_by_key(|o| o.id.0);
        offerings
    }

    fn subjects(&self) -> HashMap<SubjectCode, Subject> {
        self.subjects
            .iter()
            .map(|s| (s.code.clone(), s.clone()))
            .collect()
    }

    fn batches(&self) -> HashMap<BatchId, Batch> {
        self.batches.iter().map(|b| (b.id, b.clone())).collect()
    }

    fn faculty_assignments(&self) -> Vec<FacultyAssignment> {
        let mut assignments = self.faculty_assignments.clone();
        assignments.sort_by_key(|a| a.id);
        assignments
    }

    fn faculty(&self) -> HashMap<FacultyId, Faculty> {
        self.faculty.iter().map(|f| (f.id, f.clone())).collect()
    }

    fn create_version_with_entries(
        &mut self,
        name: &str,
        entries: &[NewScheduleEntry],
    ) -> Result<ScheduleVersionId, String> {
        let version_id = ScheduleVersionId(Uuid::new_v4());
        let version = ScheduleVersion {
            id: version_id,
            name: name.to_string(),
            status: VersionStatus::Draft,
            created_at: Utc::now(),
        };

        let rows: Vec<ScheduleEntry> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| ScheduleEntry {
                id: ScheduleEntryId(self.next_entry_id + i as u64),
                version_id,
                offering_id: entry.offering_id,
                faculty_id: entry.faculty_id,
                batch_id: entry.batch_id,
                room_id: entry.room_id,
                day: entry.day,
                slot: entry.slot,
            })
            .collect();
        self.next_entry_id += rows.len() as u64;

        self.versions.push(version);
        self.entries.extend(rows);
        Ok(version_id)
    }

    fn versions(&self) -> Vec<ScheduleVersion> {
        self.versions.clone()
    }

    fn latest_version(&self) -> Option<ScheduleVersion> {
        self.versions.iter().max_by_key(|v| v.created_at).cloned()
    }

    fn version_entries(&self, version_id: ScheduleVersionId) -> Vec<ScheduleEntry> {
        self.entries
            .iter()
            .copied()
            .filter(|e| e.version_id == version_id)
            .collect()
    }
}
