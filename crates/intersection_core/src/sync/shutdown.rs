//! # Shutdown Signal
//!
//! Cooperative stop flag for background loops.
//!
//! The loop calls [`ShutdownSignal::wait_timeout`] in place of a plain sleep,
//! so a stop request is observed within one wait slice instead of whenever
//! the sleep happens to end.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Inner {
    triggered: AtomicBool,
    mutex: Mutex<()>,
    condvar: Condvar,
}

/// Cloneable handle to a shared stop flag.
///
/// All clones observe the same flag. Triggering is permanent.
#[derive(Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    /// Creates an untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                triggered: AtomicBool::new(false),
                mutex: Mutex::new(()),
                condvar: Condvar::new(),
            }),
        }
    }

    /// Requests shutdown and wakes every thread parked in `wait_timeout`.
    ///
    /// Calling this more than once has no further effect.
    pub fn trigger(&self) {
        // Store under the mutex so a waiter cannot miss the notification
        // between its flag check and its park.
        let guard = self.inner.mutex.lock();
        self.inner.triggered.store(true, Ordering::Release);
        drop(guard);
        self.inner.condvar.notify_all();
    }

    /// Returns true once [`trigger`](Self::trigger) has been called.
    #[inline]
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::Acquire)
    }

    /// Sleeps for at most `timeout`, returning early if triggered.
    ///
    /// Returns true if the signal is triggered on return.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.is_triggered() {
            return true;
        }
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            let mut guard = self.inner.mutex.lock();
            while !self.is_triggered() {
                self.inner.condvar.wait(&mut guard);
            }
            return true;
        };

        let mut guard = self.inner.mutex.lock();
        while !self.is_triggered() {
            if self.inner.condvar.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
        self.is_triggered()
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownSignal")
            .field("triggered", &self.is_triggered())
            .finish()
    }
}
