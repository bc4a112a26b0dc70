//! Admission control for connection tasks.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::{Error, Result};

/// Counting gate in front of connection tasks.
///
/// The unbounded limiter admits everything immediately, which is the
/// server's default. A bounded limiter makes the accept loop wait until a
/// running connection finishes.
#[derive(Debug, Clone)]
pub struct ConnectionLimiter {
    slots: Option<Arc<Semaphore>>,
    limit: Option<usize>,
}

/// Held by a connection task for as long as it runs.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: Option<OwnedSemaphorePermit>,
}

impl ConnectionLimiter {
    pub fn unbounded() -> Self {
        Self {
            slots: None,
            limit: None,
        }
    }

    /// Admits at most `max_connections` at once.
    ///
    /// Fails when the limit is zero or larger than
    /// [`Semaphore::MAX_PERMITS`].
    pub fn bounded(max_connections: usize) -> Result<Self> {
        if max_connections == 0 || max_connections > Semaphore::MAX_PERMITS {
            return Err(Error::Config(format!(
                "connection limit must be between 1 and {}, got {}",
                Semaphore::MAX_PERMITS,
                max_connections
            )));
        }

        Ok(Self {
            slots: Some(Arc::new(Semaphore::new(max_connections))),
            limit: Some(max_connections),
        })
    }

    pub fn from_config(max_connections: Option<usize>) -> Result<Self> {
        match max_connections {
            Some(max) => Self::bounded(max),
            None => Ok(Self::unbounded()),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of free slots, or `None` when unbounded.
    pub fn available(&self) -> Option<usize> {
        self.slots.as_ref().map(|s| s.available_permits())
    }

    /// Waits for a free slot.
    pub async fn acquire(&self) -> ConnectionPermit {
        let permit = match &self.slots {
            // The semaphore is never closed, so acquiring only fails if that
            // changes; fall back to admitting the connection.
            Some(slots) => slots.clone().acquire_owned().await.ok(),
            None => None,
        };
        ConnectionPermit { _permit: permit }
    }
}

impl Default for ConnectionLimiter {
    fn default() -> Self {
        Self::unbounded()
    }
}
