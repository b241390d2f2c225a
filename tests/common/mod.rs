//! Scripted in-memory serial port for tests
//!
//! Reads are served from a fixed byte script; once it runs out every read
//! fails with `TimedOut`, the way a serial port with a read timeout does.
//! Writes are recorded, and dropping the port is observable.

#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use zumolink::transport::StreamTransport;
use zumolink::{Connection, LinkConfig};

pub struct ScriptedPort {
    script: Vec<u8>,
    pos: usize,
    written: Arc<Mutex<Vec<u8>>>,
    dropped: Arc<AtomicBool>,
}

/// Test-side view of a `ScriptedPort`
#[derive(Clone)]
pub struct PortProbe {
    written: Arc<Mutex<Vec<u8>>>,
    dropped: Arc<AtomicBool>,
}

impl PortProbe {
    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }

    pub fn clear(&self) {
        self.written.lock().clear();
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl ScriptedPort {
    pub fn new(script: &[u8]) -> (Self, PortProbe) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let dropped = Arc::new(AtomicBool::new(false));
        let port = Self {
            script: script.to_vec(),
            pos: 0,
            written: Arc::clone(&written),
            dropped: Arc::clone(&dropped),
        };
        (port, PortProbe { written, dropped })
    }
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.script.len() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        }
        // One byte at a time, like a slow serial line
        buf[0] = self.script[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ScriptedPort {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

pub type ScriptedTransport = StreamTransport<ScriptedPort>;

pub fn test_config() -> LinkConfig {
    LinkConfig::builder("/dev/ttyTEST0")
        .read_timeout_ms(100)
        .build()
        .unwrap()
}

/// Opened (not yet identified) connection over a scripted port
pub fn opened(script: &[u8]) -> (Connection<ScriptedTransport>, PortProbe) {
    let (port, probe) = ScriptedPort::new(script);
    let conn = Connection::with_transport(test_config(), StreamTransport::new(port));
    (conn, probe)
}

/// Identified connection; `replies` follow the handshake line
pub fn identified(replies: &[u8]) -> (Connection<ScriptedTransport>, PortProbe) {
    let mut script = b"Zumo32U4\n".to_vec();
    script.extend_from_slice(replies);
    let (mut conn, probe) = opened(&script);
    conn.identify().unwrap();
    probe.clear();
    (conn, probe)
}
