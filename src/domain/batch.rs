use super::ids::BatchId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    Day,
    Evening,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
    pub semester: u32,
    pub size: u32,
    pub shift: Shift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProjection {
    pub size: u32,
}

impl From<&Batch> for BatchProjection {
    fn from(batch: &Batch) -> Self {
        Self { size: batch.size }
    }
}
