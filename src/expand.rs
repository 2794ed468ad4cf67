//! Event Expander (SPEC_FULL.md §4.1): turns offerings into the flat list of
//! [`Event`]s the solver actually schedules.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::domain::{
    Batch, BatchId, Event, EventIndex, FacultyAssignment, Offering, Subject, SubjectCode,
    SubjectType,
};

/// Counts of offerings the expander dropped, broken down by reason. Silent
/// skips are policy (SPEC_FULL.md §9) but must stay observable, so this is
/// threaded back to the caller rather than swallowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionSummary {
    pub missing_subject: usize,
    pub missing_batch: usize,
    pub missing_faculty: usize,
}

impl ExpansionSummary {
    pub fn total_skipped(&self) -> usize {
        self.missing_subject + self.missing_batch + self.missing_faculty
    }
}

impl fmt::Display for ExpansionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} missing subject, {} missing batch, {} missing faculty",
            self.missing_subject, self.missing_batch, self.missing_faculty
        )
    }
}

/// Expand offerings into events. `faculty_assignments` must be in
/// id-ascending order already (the repository is expected to hand back
/// stably-ordered rows); the first match per offering wins.
pub fn expand_events(
    offerings: &[Offering],
    subjects_by_code: &HashMap<SubjectCode, Subject>,
    batches_by_id: &HashMap<BatchId, Batch>,
    faculty_assignments: &[FacultyAssignment],
) -> (Vec<Event>, ExpansionSummary) {
    let mut events = Vec::new();
    let mut summary = ExpansionSummary::default();

    for offering in offerings {
        let Some(subject) = subjects_by_code.get(&offering.subject_code) else {
            warn!(offering_id = %offering.id, "offering references unknown subject; skipping");
            summary.missing_subject += 1;
            continue;
        };
        let Some(batch) = batches_by_id.get(&offering.batch_id) else {
            warn!(offering_id = %offering.id, "offering references unknown batch; skipping");
            summary.missing_batch += 1;
            continue;
        };

        let faculty_id = faculty_assignments
            .iter()
            .filter(|assignment| assignment.offering_id == offering.id)
            .min_by_key(|assignment| assignment.id)
            .map(|assignment| assignment.faculty_id);

        let Some(faculty_id) = faculty_id else {
            warn!(offering_id = %offering.id, "offering has no faculty assigned; skipping");
            summary.missing_faculty += 1;
            continue;
        };

        let subject_type = subject.subject_type;
        let batch_size = batch.size;

        for _ in 0..subject.classes_per_week {
            events.push(Event {
                index: EventIndex(events.len()),
                offering_id: offering.id,
                batch_id: batch.id,
                faculty_id,
                subject_type,
                batch_size,
            });
        }
    }

    debug!(
        event_count = events.len(),
        skipped = summary.total_skipped(),
        "expanded events"
    );

    (events, summary)
}
