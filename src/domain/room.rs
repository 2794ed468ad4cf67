use super::ids::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Theory,
    Lab,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub code: String,
    pub capacity: u32,
    pub room_type: RoomType,
    pub location: Option<String>,
}

/// Minimal read-only projection of a [`Room`] used at lookup boundaries
/// (the validator, the optimizer adapter) that never need the full record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomProjection {
    pub capacity: u32,
    pub room_type: RoomType,
}

impl From<&Room> for RoomProjection {
    fn from(room: &Room) -> Self {
        Self {
            capacity: room.capacity,
            room_type: room.room_type,
        }
    }
}
