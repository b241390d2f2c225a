//! Stream Transport
//!
//! Adapts any `Read + Write` byte stream (serial port, socket, in-memory
//! buffer) to the [`Transport`] contract.

use std::io::{self, BufRead, BufReader, Read, Write};

use super::Transport;

/// Buffered transport over a byte stream
pub struct StreamTransport<S: Read + Write> {
    /// Stream, buffered on the read side (writes go straight through)
    inner: BufReader<S>,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufReader::new(stream),
        }
    }

    pub fn get_ref(&self) -> &S {
        self.inner.get_ref()
    }

    /// Unwrap the stream, discarding any buffered unread bytes
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.inner.get_mut();
        stream.write_all(bytes)?;
        stream.flush()
    }

    fn read_line(&mut self, terminator: u8, max_len: usize) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        (&mut self.inner)
            .take(max_len as u64)
            .read_until(terminator, &mut line)?;

        match line.last() {
            Some(&last) if last == terminator => {
                line.pop();
                Ok(line)
            }
            _ if line.len() >= max_len => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("no line terminator within {} bytes", max_len),
            )),
            _ => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream ended after {} bytes of an unterminated line", line.len()),
            )),
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }
}
