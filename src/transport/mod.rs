//! Transport Module
//!
//! Byte-stream plumbing underneath the protocol.
//!
//! ## Contract
//! - Writes are blocking and ordered
//! - Reads block until the requested bytes (or a full line) arrive, or the
//!   configured read timeout expires
//! - Dropping a transport closes it
//!
//! Transports move bytes only; they know nothing about opcodes.

mod serial;
mod stream;

use std::io;

pub use serial::{open_serial, SerialTransport};
pub use stream::StreamTransport;

/// An open, ordered, reliable byte stream
pub trait Transport {
    /// Write all bytes and flush them to the device
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read up to and including `terminator`, returning the line without it
    ///
    /// Fails if `max_len` bytes arrive without a terminator.
    fn read_line(&mut self, terminator: u8, max_len: usize) -> io::Result<Vec<u8>>;

    /// Fill `buf` completely
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn read_line(&mut self, terminator: u8, max_len: usize) -> io::Result<Vec<u8>> {
        (**self).read_line(terminator, max_len)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_exact(buf)
    }
}
