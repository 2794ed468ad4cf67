use super::ids::{BatchId, OfferingId, SubjectCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub id: OfferingId,
    pub subject_code: SubjectCode,
    pub batch_id: BatchId,
    pub semester: u32,
    pub elective: bool,
}
