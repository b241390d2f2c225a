//! Response definitions
//!
//! Decoded replies from the robot.

use serde::Serialize;

/// Three-axis reading from the IMU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl From<(i16, i16, i16)> for Vector3 {
    fn from((x, y, z): (i16, i16, i16)) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3> for (i16, i16, i16) {
    fn from(v: Vector3) -> Self {
        (v.x, v.y, v.z)
    }
}

/// Proximity sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Proximity {
    /// Left or right sensor
    Side(u8),

    /// Front sensor pair, in the order the robot sends them
    Front { left: u8, right: u8 },
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Identification line, terminator stripped
    Identity(String),

    /// Encoder count or battery level
    Int16(i16),

    /// Left and right encoder counts
    Int16Pair(i16, i16),

    /// IMU axes
    Int16Triple(Vector3),

    Proximity(Proximity),
}

/// Every sensor the robot exposes, read in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorSnapshot {
    pub encoders: (i16, i16),
    pub proximity_left: u8,
    pub proximity_front: (u8, u8),
    pub proximity_right: u8,
    pub gyro: Vector3,
    pub magnetic: Vector3,
    pub acceleration: Vector3,
    pub battery: i16,
}
