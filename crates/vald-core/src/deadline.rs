//! Time budget for a single search.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Entries scanned between clock reads.
pub const CHECK_INTERVAL: usize = 64;

/// A point in time after which a scan gives up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    at: Option<Instant>,
    timeout: Duration,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self::default()
    }

    /// Expires `timeout` from now; `None` never expires.
    pub fn after(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(timeout) => Self {
                at: Instant::now().checked_add(timeout),
                timeout,
            },
            None => Self::none(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_expired() {
            return Err(Error::DeadlineExceeded(format!(
                "search did not finish within {:?}",
                self.timeout
            )));
        }
        Ok(())
    }

    /// [`Deadline::check`] on every `CHECK_INTERVAL`-th step of a scan.
    pub fn check_at(&self, step: usize) -> Result<()> {
        if step % CHECK_INTERVAL == 0 {
            self.check()
        } else {
            Ok(())
        }
    }
}
