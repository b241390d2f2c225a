//! Protocol codec
//!
//! Encoding and decoding functions for the serial wire protocol.
//!
//! ## Wire Format
//!
//! ### Command Format
//! ```text
//! ┌──────────────┬─────────────────────────────┐
//! │ Opcode (1-2) │  Parameter (0, 1 or 4)      │
//! └──────────────┴─────────────────────────────┘
//! ```
//!
//! ### Parameters by Command Type
//! - F/B/L/R/N/Y/Z: one ASCII digit
//! - E:             side char (`L`/`R`)
//! - P:             direction char (`L`/`F`/`R`)
//! - SS:            int16be(left) + int16be(right)
//! - ID/CA/CM/GY/BA: none
//!
//! ### Reply Format
//! Replies carry no header or length: the opcode alone decides how many bytes
//! follow. All integers are big-endian two's-complement.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Command, Proximity, ReplyShape, Response, Vector3};
use crate::config::LinkConfig;
use crate::error::{Result, ZumoError};
use crate::transport::Transport;

/// Longest encoded command: "SS" + 2 x i16
pub const MAX_COMMAND_SIZE: usize = 6;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command) -> Bytes {
    let mut message = BytesMut::with_capacity(MAX_COMMAND_SIZE);
    message.put_slice(command.opcode());

    match *command {
        Command::Forward(level)
        | Command::Backward(level)
        | Command::TurnLeft(level)
        | Command::TurnRight(level)
        | Command::Buzz(level)
        | Command::LedYellow(level)
        | Command::LedGreen(level) => message.put_u8(level.as_ascii()),
        Command::SetSpeeds { left, right } => {
            message.put_i16(left);
            message.put_i16(right);
        }
        Command::ReadEncoder(side) => message.put_u8(side.as_ascii()),
        Command::ReadProximity(direction) => message.put_u8(direction.as_ascii()),
        Command::Identify
        | Command::ReadCompassAcceleration
        | Command::ReadCompassMagnetic
        | Command::ReadGyro
        | Command::ReadBattery => {}
    }

    message.freeze()
}

// =============================================================================
// Reply Decoding
// =============================================================================

fn short_reply(what: &str, expected: usize, got: usize) -> ZumoError {
    ZumoError::Communication(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("{}: expected {} bytes, got {}", what, expected, got),
    ))
}

/// Decode a single big-endian i16 reply
pub fn decode_int16(bytes: &[u8]) -> Result<i16> {
    if bytes.len() != 2 {
        return Err(short_reply("int16 reply", 2, bytes.len()));
    }
    let mut buf = bytes;
    Ok(buf.get_i16())
}

/// Decode an (x, y, z) reply of three big-endian i16
pub fn decode_int16_triple(bytes: &[u8]) -> Result<Vector3> {
    if bytes.len() != 6 {
        return Err(short_reply("int16 triple reply", 6, bytes.len()));
    }
    let mut buf = bytes;
    Ok(Vector3 {
        x: buf.get_i16(),
        y: buf.get_i16(),
        z: buf.get_i16(),
    })
}

/// Strip trailing ASCII whitespace (the terminator and any `\r`) from a line
pub fn trim_line(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &line[..end]
}

/// Check an identify reply against the expected marker
///
/// Comparison is byte-wise on the raw reply; the stored identity is the
/// trimmed line as (lossy) UTF-8.
pub fn decode_identity(line: &[u8], marker: &[u8]) -> Result<String> {
    let line = trim_line(line);
    let text = String::from_utf8_lossy(line).into_owned();

    if !line.starts_with(marker) {
        return Err(ZumoError::UnexpectedIdentity { payload: text });
    }
    Ok(text)
}

// =============================================================================
// Transport I/O helpers
// =============================================================================

/// Write a command to the transport
pub fn write_command<T: Transport + ?Sized>(transport: &mut T, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    tracing::trace!("-> {:02x?}", bytes.as_ref());
    transport.write_all(&bytes)?;
    Ok(())
}

/// Read the reply a command implies
///
/// Blocks until the full reply arrives or the transport fails. Returns
/// `None` for commands without a reply.
pub fn read_response<T: Transport + ?Sized>(
    transport: &mut T,
    command: &Command,
    config: &LinkConfig,
) -> Result<Option<Response>> {
    let response = match command.reply_shape() {
        ReplyShape::None => return Ok(None),
        ReplyShape::Line => {
            let line = transport.read_line(config.line_terminator, config.max_line_len)?;
            tracing::trace!("<- {:02x?}", line);
            Response::Identity(String::from_utf8_lossy(trim_line(&line)).into_owned())
        }
        ReplyShape::Int16 => {
            let mut buf = [0u8; 2];
            transport.read_exact(&mut buf)?;
            tracing::trace!("<- {:02x?}", buf);
            Response::Int16(decode_int16(&buf)?)
        }
        ReplyShape::Int16Triple => {
            let mut buf = [0u8; 6];
            transport.read_exact(&mut buf)?;
            tracing::trace!("<- {:02x?}", buf);
            Response::Int16Triple(decode_int16_triple(&buf)?)
        }
        ReplyShape::Byte => {
            let mut buf = [0u8; 1];
            transport.read_exact(&mut buf)?;
            tracing::trace!("<- {:02x?}", buf);
            Response::Proximity(Proximity::Side(buf[0]))
        }
        ReplyShape::BytePair => {
            // Two sensors, two separate single-byte reads
            let mut left = [0u8; 1];
            transport.read_exact(&mut left)?;
            let mut right = [0u8; 1];
            transport.read_exact(&mut right)?;
            tracing::trace!("<- {:02x?} {:02x?}", left, right);
            Response::Proximity(Proximity::Front {
                left: left[0],
                right: right[0],
            })
        }
    };

    Ok(Some(response))
}

/// Write a command and read its reply as one unit
pub fn round_trip<T: Transport + ?Sized>(
    transport: &mut T,
    command: &Command,
    config: &LinkConfig,
) -> Result<Option<Response>> {
    write_command(transport, command)?;
    read_response(transport, command, config)
}
