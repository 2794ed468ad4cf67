use super::ids::TimeslotId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A (day, slot) pair with concrete start/end times. `(day, slot)` is unique
/// within a repository snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    pub day: u8,
    pub slot: u16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotProjection {
    pub day: u8,
    pub slot: u16,
}

impl From<&Timeslot> for TimeslotProjection {
    fn from(ts: &Timeslot) -> Self {
        Self {
            day: ts.day,
            slot: ts.slot,
        }
    }
}
