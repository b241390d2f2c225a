//! Command definitions
//!
//! Represents instructions sent to the robot. Parameters are validated when a
//! command is built, so every `Command` value is encodable.

use std::fmt;

use crate::error::{Result, ZumoError};

/// Single-digit parameter (speed level, buzz count, LED state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const ZERO: Level = Level(0);
    pub const ONE: Level = Level(1);
    pub const MAX: Level = Level(9);

    /// Speed used by the drive commands when the caller has no preference
    pub const DEFAULT_SPEED: Level = Level(2);

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX.0 {
            return Err(ZumoError::contract(format!(
                "level {} out of range 0..=9",
                value
            )));
        }
        Ok(Level(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// ASCII digit sent on the wire
    pub fn as_ascii(self) -> u8 {
        b'0' + self.0
    }
}

impl TryFrom<u8> for Level {
    type Error = ZumoError;

    fn try_from(value: u8) -> Result<Self> {
        Level::new(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wheel selector for encoder reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_ascii(self) -> u8 {
        match self {
            Side::Left => b'L',
            Side::Right => b'R',
        }
    }
}

impl TryFrom<char> for Side {
    type Error = ZumoError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'L' => Ok(Side::Left),
            'R' => Ok(Side::Right),
            other => Err(ZumoError::contract(format!(
                "invalid side {:?}, expected 'L' or 'R'",
                other
            ))),
        }
    }
}

/// Sensor selector for proximity reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Front,
    Right,
}

impl Direction {
    pub fn as_ascii(self) -> u8 {
        match self {
            Direction::Left => b'L',
            Direction::Front => b'F',
            Direction::Right => b'R',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = ZumoError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'L' => Ok(Direction::Left),
            'F' => Ok(Direction::Front),
            'R' => Ok(Direction::Right),
            other => Err(ZumoError::contract(format!(
                "invalid direction {:?}, expected 'L', 'F' or 'R'",
                other
            ))),
        }
    }
}

/// What the robot sends back after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// Fire-and-forget command
    None,

    /// Terminated text line
    Line,

    /// One big-endian i16
    Int16,

    /// Three big-endian i16 (x, y, z)
    Int16Triple,

    /// One unsigned byte
    Byte,

    /// Two unsigned bytes, read one at a time
    BytePair,
}

impl ReplyShape {
    /// Fixed reply width in bytes, `None` for line replies
    pub fn width(self) -> Option<usize> {
        match self {
            ReplyShape::None => Some(0),
            ReplyShape::Line => None,
            ReplyShape::Int16 => Some(2),
            ReplyShape::Int16Triple => Some(6),
            ReplyShape::Byte => Some(1),
            ReplyShape::BytePair => Some(2),
        }
    }
}

/// A robot command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request the identification line
    Identify,

    Forward(Level),
    Backward(Level),
    TurnLeft(Level),
    TurnRight(Level),

    /// Raw differential wheel speeds
    SetSpeeds { left: i16, right: i16 },

    /// Sound the buzzer n times
    Buzz(Level),

    LedYellow(Level),
    LedGreen(Level),

    ReadEncoder(Side),
    ReadProximity(Direction),
    ReadCompassAcceleration,
    ReadCompassMagnetic,
    ReadGyro,
    ReadBattery,
}

impl Command {
    /// Stop has no opcode of its own
    pub fn stop() -> Self {
        Command::Forward(Level::ZERO)
    }

    pub fn forward(speed: u8) -> Result<Self> {
        Ok(Command::Forward(Level::new(speed)?))
    }

    pub fn backward(speed: u8) -> Result<Self> {
        Ok(Command::Backward(Level::new(speed)?))
    }

    pub fn turn_left(speed: u8) -> Result<Self> {
        Ok(Command::TurnLeft(Level::new(speed)?))
    }

    pub fn turn_right(speed: u8) -> Result<Self> {
        Ok(Command::TurnRight(Level::new(speed)?))
    }

    pub fn buzz(count: u8) -> Result<Self> {
        Ok(Command::Buzz(Level::new(count)?))
    }

    pub fn led_yellow(value: u8) -> Result<Self> {
        Ok(Command::LedYellow(Level::new(value)?))
    }

    pub fn led_green(value: u8) -> Result<Self> {
        Ok(Command::LedGreen(Level::new(value)?))
    }

    pub fn read_encoder(side: char) -> Result<Self> {
        Ok(Command::ReadEncoder(Side::try_from(side)?))
    }

    pub fn read_proximity(direction: char) -> Result<Self> {
        Ok(Command::ReadProximity(Direction::try_from(direction)?))
    }

    /// Opcode header bytes
    pub fn opcode(&self) -> &'static [u8] {
        match self {
            Command::Identify => b"ID",
            Command::Forward(_) => b"F",
            Command::Backward(_) => b"B",
            Command::TurnLeft(_) => b"L",
            Command::TurnRight(_) => b"R",
            Command::SetSpeeds { .. } => b"SS",
            Command::Buzz(_) => b"N",
            Command::LedYellow(_) => b"Y",
            Command::LedGreen(_) => b"Z",
            Command::ReadEncoder(_) => b"E",
            Command::ReadProximity(_) => b"P",
            Command::ReadCompassAcceleration => b"CA",
            Command::ReadCompassMagnetic => b"CM",
            Command::ReadGyro => b"GY",
            Command::ReadBattery => b"BA",
        }
    }

    /// Reply the firmware sends for this command
    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Command::Identify => ReplyShape::Line,
            Command::ReadEncoder(_) | Command::ReadBattery => ReplyShape::Int16,
            Command::ReadProximity(Direction::Front) => ReplyShape::BytePair,
            Command::ReadProximity(_) => ReplyShape::Byte,
            Command::ReadCompassAcceleration
            | Command::ReadCompassMagnetic
            | Command::ReadGyro => ReplyShape::Int16Triple,
            _ => ReplyShape::None,
        }
    }

    pub fn is_query(&self) -> bool {
        self.reply_shape() != ReplyShape::None
    }
}
