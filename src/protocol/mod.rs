//! Protocol Module
//!
//! Defines the serial wire protocol spoken by the robot firmware.
//!
//! ## Command Format
//! ```text
//! ┌──────────────┬─────────────────────────────┐
//! │ Opcode (1-2) │  Parameter (0, 1 or 4)      │
//! └──────────────┴─────────────────────────────┘
//! ```
//!
//! ### Commands
//! - `ID`        identify         → text line starting with `Zumo`
//! - `F` `B` `L` `R` + digit       drive at speed 0..9
//! - `SS` + i16 + i16              raw wheel speeds
//! - `N` `Y` `Z` + digit           buzzer, yellow LED, green LED
//! - `E` + L/R                     encoder      → i16
//! - `P` + L/F/R                   proximity    → u8 (u8, u8 for F)
//! - `CA` `CM` `GY`                accel/mag/gyro → 3 x i16
//! - `BA`                          battery      → i16
//!
//! There are no sequence numbers: every query must be answered before the
//! next command is written.

mod command;
mod response;
mod codec;

pub use command::{Command, Direction, Level, ReplyShape, Side};
pub use response::{Proximity, Response, SensorSnapshot, Vector3};
pub use codec::{
    decode_identity, decode_int16, decode_int16_triple, encode_command, read_response,
    round_trip, trim_line, write_command, MAX_COMMAND_SIZE,
};
