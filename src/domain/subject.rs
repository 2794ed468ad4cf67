use super::ids::SubjectCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    Theory,
    Lab,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: SubjectCode,
    pub title: String,
    pub subject_type: SubjectType,
    pub classes_per_week: u32,
    /// Carried for schema fidelity with the source; not honored by the
    /// solver. Every event occupies exactly one timeslot regardless of this
    /// value (see SPEC_FULL.md §9, "duration_slots").
    pub duration_slots: u32,
}
