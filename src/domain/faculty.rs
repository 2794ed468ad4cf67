use super::ids::{FacultyId, OfferingId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
}

/// A single (offering, faculty) pairing. The core honors at most one faculty
/// per offering: the first match in id-ascending order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyAssignment {
    pub id: u64,
    pub offering_id: OfferingId,
    pub faculty_id: FacultyId,
}

/// Minimal projection of a [`Faculty`] used at lookup boundaries (the
/// optimizer adapter) that never need the full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyProjection {
    pub name: String,
}

impl From<&Faculty> for FacultyProjection {
    fn from(faculty: &Faculty) -> Self {
        Self {
            name: faculty.name.clone(),
        }
    }
}
