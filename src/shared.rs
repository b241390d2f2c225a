//! Shared Connection
//!
//! Lets several threads drive one robot. The wire format has no correlation
//! ids, so the lock is held for a caller's whole closure: round-trips from
//! different callers never interleave.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::link::{Connection, LinkStatus, Robot};
use crate::transport::Transport;

/// Cloneable handle to a mutex-guarded connection
pub struct SharedConnection<T: Transport> {
    inner: Arc<Mutex<Connection<T>>>,
}

impl<T: Transport> SharedConnection<T> {
    pub fn new(conn: Connection<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the robot with exclusive access to the link
    pub fn with_robot<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Robot<'_, T>) -> Result<R>,
    {
        let mut conn = self.inner.lock();
        let mut robot = conn.robot()?;
        f(&mut robot)
    }

    /// Run `f` against the connection itself (lifecycle calls)
    pub fn with_connection<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Connection<T>) -> R,
    {
        let mut conn = self.inner.lock();
        f(&mut conn)
    }

    pub fn status(&self) -> LinkStatus {
        self.inner.lock().status()
    }

    pub fn close(&self) {
        self.inner.lock().close();
    }
}

impl<T: Transport> Clone for SharedConnection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
