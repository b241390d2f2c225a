//! Tele-operation mapping
//!
//! Turns arrow-key state and discrete key presses into robot commands. This
//! module is pure: reading an input device and sending the commands is left
//! to the caller.
//!
//! ## Mapping
//! - Up / Down: add / subtract the speed setting on both wheels (Up wins)
//! - Left / Right: counter-rotate the wheels (Left wins)
//! - Speed setting: levels 0..=4, times 100, starting at 200
//! - Wheel speeds are only sent when they change

use crate::protocol::{Command, Level};

/// Arrow keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Discrete key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Number key; only 0..=4 select a speed
    SpeedLevel(u8),
    ToggleYellow,
    ToggleGreen,
    Buzz,
}

/// Keyboard drive state
#[derive(Debug, Clone)]
pub struct Teleop {
    speed: i16,
    wheels: (i16, i16),
    yellow: bool,
    green: bool,
}

impl Default for Teleop {
    fn default() -> Self {
        Self::new()
    }
}

impl Teleop {
    pub const MAX_SPEED_LEVEL: u8 = 4;
    pub const SPEED_STEP: i16 = 100;
    pub const INITIAL_SPEED: i16 = 200;

    pub fn new() -> Self {
        Self {
            speed: Self::INITIAL_SPEED,
            wheels: (0, 0),
            yellow: false,
            green: false,
        }
    }

    /// Current speed setting
    pub fn speed(&self) -> i16 {
        self.speed
    }

    /// Wheel speeds last sent
    pub fn wheels(&self) -> (i16, i16) {
        self.wheels
    }

    /// Wheel speeds for the held keys at the current speed setting
    pub fn wheel_speeds(&self, keys: DriveKeys) -> (i16, i16) {
        let (mut left, mut right) = (0i16, 0i16);

        if keys.up {
            left += self.speed;
            right += self.speed;
        } else if keys.down {
            left -= self.speed;
            right -= self.speed;
        }

        if keys.left {
            left -= self.speed;
            right += self.speed;
        } else if keys.right {
            left += self.speed;
            right -= self.speed;
        }

        (left, right)
    }

    /// Feed the held keys; returns a `SetSpeeds` when the wheels must change
    pub fn update(&mut self, keys: DriveKeys) -> Option<Command> {
        let wheels = self.wheel_speeds(keys);
        if wheels == self.wheels {
            return None;
        }
        self.wheels = wheels;
        Some(Command::SetSpeeds {
            left: wheels.0,
            right: wheels.1,
        })
    }

    /// Handle a key press; returns the command to send, if any
    pub fn handle(&mut self, event: KeyEvent) -> Option<Command> {
        match event {
            KeyEvent::SpeedLevel(level) if level <= Self::MAX_SPEED_LEVEL => {
                self.speed = i16::from(level) * Self::SPEED_STEP;
                None
            }
            KeyEvent::SpeedLevel(level) => {
                tracing::debug!("Ignoring speed level {}", level);
                None
            }
            KeyEvent::ToggleYellow => {
                self.yellow = !self.yellow;
                Some(Command::LedYellow(led_level(self.yellow)))
            }
            KeyEvent::ToggleGreen => {
                self.green = !self.green;
                Some(Command::LedGreen(led_level(self.green)))
            }
            KeyEvent::Buzz => Some(Command::Buzz(Level::ONE)),
        }
    }
}

fn led_level(on: bool) -> Level {
    if on {
        Level::ONE
    } else {
        Level::ZERO
    }
}
