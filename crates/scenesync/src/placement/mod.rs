//! Inbound and outbound placement message types.
//!
//! The wire shape mirrors the placement topic: a batch is an ordered list
//! of object entries, each carrying the identity string and the new pose.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::geometry::Quaternion;

/// One batch of object placements, as delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementBatch {
    pub objects: Vec<ObjectPlacement>,
}

/// A single placed object instance within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectPlacement {
    /// Identity used to resolve the update rule for this object.
    pub name: String,
    pub new_pose: Pose,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

/// World-plane coordinates. The z component is carried for wire
/// compatibility; the height written to the project comes from the
/// per-object offset in the update table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Read-only snapshot entry answering a placement query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub name: String,
    pub position: Vec<f64>,
    pub attitude: Vec<f64>,
}

impl PlacedObject {
    /// Extracts a snapshot record from a body item mapping. Returns `None`
    /// when the mapping does not carry the expected fields.
    pub fn from_item(item: &Value) -> Option<Self> {
        let name = item.get("name")?.as_str()?.to_string();
        let data = item.get("data")?;
        let position = number_list(data.get("rootPosition")?)?;
        let attitude = number_list(data.get("rootAttitude")?)?;
        Some(Self {
            name,
            position,
            attitude,
        })
    }
}

fn number_list(value: &Value) -> Option<Vec<f64>> {
    value.as_sequence()?.iter().map(Value::as_f64).collect()
}
