//! Robot
//!
//! Typed command interface over an identified [`Connection`]. A `Robot`
//! can only be obtained through [`Connection::robot`], so every method here
//! runs against a link that has passed the handshake.
//!
//! Parameters are validated before anything is written: an out-of-range
//! speed or an unknown selector never reaches the wire.

use std::io;

use crate::error::{Result, ZumoError};
use crate::protocol::{Command, Proximity, Response, SensorSnapshot, Vector3};
use crate::transport::Transport;

use super::Connection;

/// Command interface of an identified robot
pub struct Robot<'a, T: Transport> {
    conn: &'a mut Connection<T>,
}

impl<'a, T: Transport> Robot<'a, T> {
    pub(super) fn new(conn: &'a mut Connection<T>) -> Self {
        Self { conn }
    }

    pub fn identity(&self) -> &str {
        self.conn.identity().unwrap_or_default()
    }

    /// Send any command and return its decoded reply, if it has one
    pub fn execute(&mut self, command: &Command) -> Result<Option<Response>> {
        self.conn.exchange(command)
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.conn.exchange(&command).map(|_| ())
    }

    fn query(&mut self, command: Command) -> Result<Response> {
        self.conn
            .exchange(&command)?
            .ok_or_else(|| mismatch(&command))
    }

    // =========================================================================
    // Drive
    // =========================================================================

    pub fn forward(&mut self, speed: u8) -> Result<()> {
        self.send(Command::forward(speed)?)
    }

    pub fn backward(&mut self, speed: u8) -> Result<()> {
        self.send(Command::backward(speed)?)
    }

    pub fn turn_left(&mut self, speed: u8) -> Result<()> {
        self.send(Command::turn_left(speed)?)
    }

    pub fn turn_right(&mut self, speed: u8) -> Result<()> {
        self.send(Command::turn_right(speed)?)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.send(Command::stop())
    }

    /// Set raw wheel speeds over the full i16 range
    pub fn set_speeds(&mut self, left: i16, right: i16) -> Result<()> {
        self.send(Command::SetSpeeds { left, right })
    }

    // =========================================================================
    // Buzzer and LEDs
    // =========================================================================

    pub fn buzz(&mut self, count: u8) -> Result<()> {
        self.send(Command::buzz(count)?)
    }

    pub fn led_yellow(&mut self, value: u8) -> Result<()> {
        self.send(Command::led_yellow(value)?)
    }

    pub fn led_green(&mut self, value: u8) -> Result<()> {
        self.send(Command::led_green(value)?)
    }

    // =========================================================================
    // Sensors
    // =========================================================================

    /// Encoder count for side `'L'` or `'R'`
    pub fn encoder(&mut self, side: char) -> Result<i16> {
        let command = Command::read_encoder(side)?;
        match self.query(command)? {
            Response::Int16(value) => Ok(value),
            _ => Err(mismatch(&command)),
        }
    }

    /// Left then right encoder counts
    pub fn encoders(&mut self) -> Result<(i16, i16)> {
        Ok((self.encoder('L')?, self.encoder('R')?))
    }

    /// Proximity reading for direction `'L'`, `'F'` or `'R'`
    pub fn proximity(&mut self, direction: char) -> Result<Proximity> {
        let command = Command::read_proximity(direction)?;
        match self.query(command)? {
            Response::Proximity(reading) => Ok(reading),
            _ => Err(mismatch(&command)),
        }
    }

    pub fn compass_acceleration(&mut self) -> Result<Vector3> {
        self.vector(Command::ReadCompassAcceleration)
    }

    pub fn compass_magnetic(&mut self) -> Result<Vector3> {
        self.vector(Command::ReadCompassMagnetic)
    }

    pub fn gyro(&mut self) -> Result<Vector3> {
        self.vector(Command::ReadGyro)
    }

    /// Battery level as reported by the firmware (millivolts)
    pub fn battery(&mut self) -> Result<i16> {
        match self.query(Command::ReadBattery)? {
            Response::Int16(value) => Ok(value),
            _ => Err(mismatch(&Command::ReadBattery)),
        }
    }

    fn vector(&mut self, command: Command) -> Result<Vector3> {
        match self.query(command)? {
            Response::Int16Triple(v) => Ok(v),
            _ => Err(mismatch(&command)),
        }
    }

    /// Read every sensor once
    pub fn snapshot(&mut self) -> Result<SensorSnapshot> {
        let encoders = self.encoders()?;
        let proximity_left = self.side_proximity('L')?;
        let proximity_front = match self.proximity('F')? {
            Proximity::Front { left, right } => (left, right),
            Proximity::Side(_) => return Err(mismatch(&Command::read_proximity('F')?)),
        };
        let proximity_right = self.side_proximity('R')?;

        Ok(SensorSnapshot {
            encoders,
            proximity_left,
            proximity_front,
            proximity_right,
            gyro: self.gyro()?,
            magnetic: self.compass_magnetic()?,
            acceleration: self.compass_acceleration()?,
            battery: self.battery()?,
        })
    }

    fn side_proximity(&mut self, direction: char) -> Result<u8> {
        match self.proximity(direction)? {
            Proximity::Side(value) => Ok(value),
            Proximity::Front { .. } => Err(mismatch(&Command::read_proximity(direction)?)),
        }
    }
}

fn mismatch(command: &Command) -> ZumoError {
    ZumoError::Communication(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("reply does not match {:?}", command),
    ))
}
