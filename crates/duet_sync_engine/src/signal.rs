//! Interruptible waits for the polling thread.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// One-shot stop flag that wakes sleepers immediately.
pub(crate) struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        Self {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    /// Sets the flag and wakes every waiter.
    pub(crate) fn signal(&self) {
        *self.stopped.lock() = true;
        self.wake.notify_all();
    }

    pub(crate) fn is_signalled(&self) -> bool {
        *self.stopped.lock()
    }

    /// Sleeps up to `timeout`. Returns true if the flag is set.
    pub(crate) fn wait_for(&self, timeout: Duration) -> bool {
        let mut stopped = self.stopped.lock();
        match Instant::now().checked_add(timeout) {
            Some(deadline) => {
                while !*stopped {
                    if self.wake.wait_until(&mut stopped, deadline).timed_out() {
                        break;
                    }
                }
            }
            // Too far out to represent: wait for the signal only.
            None => {
                while !*stopped {
                    self.wake.wait(&mut stopped);
                }
            }
        }
        *stopped
    }
}
