//! Fixed-cadence cycle scheduler.
//!
//! Keeps sampling cycles exactly one interval apart by sleeping until the
//! next **deadline** instead of for a fixed duration, so the time spent
//! inside a cycle (DHT11 transaction, LCD writes) does not stretch the
//! period.
//!
//! ```text
//!  deadline₀        deadline₁        deadline₂
//!     │── cycle ──zz│── cycle ──zzzz│── ...
//!     └── interval ─┘
//! ```
//!
//! If a cycle overruns its deadline, the next cycle starts at once and the
//! grid re-anchors there; there is no burst of catch-up cycles, so the
//! DHT11 is never polled faster than its minimum interval.
//!
//! On the device the wait blocks the only task; on an async port the same
//! deadline arithmetic would drive a timer instead.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::Clock;

pub struct CycleScheduler {
    interval_ms: u64,
    /// Start time of the next cycle (ms since boot).
    next_deadline_ms: u64,
    /// Cycles that finished after their deadline.
    overruns: u32,
}

impl CycleScheduler {
    /// First cycle is due `interval_ms` after `now_ms`.
    pub fn new(interval_ms: u32, now_ms: u64) -> Self {
        Self {
            interval_ms: u64::from(interval_ms),
            next_deadline_ms: now_ms + u64::from(interval_ms),
            overruns: 0,
        }
    }

    /// Milliseconds left until the next deadline at `now_ms` (0 if overdue).
    fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.next_deadline_ms.saturating_sub(now_ms)
    }

    /// Block until the next cycle is due, then schedule the one after.
    ///
    /// Returns the time actually slept (ms).
    pub fn wait_next(&mut self, clock: &impl Clock, delay: &mut impl DelayNs) -> u64 {
        let now = clock.now_ms();

        if now > self.next_deadline_ms {
            self.overruns = self.overruns.saturating_add(1);
            warn!(
                "cycle overran by {} ms ({} overruns so far); re-anchoring schedule",
                now - self.next_deadline_ms,
                self.overruns
            );
            // The last poll was already more than one interval ago.
            self.next_deadline_ms = now + self.interval_ms;
            return 0;
        }

        let remaining = self.remaining_ms(now);
        self.sleep(delay, remaining);
        self.next_deadline_ms += self.interval_ms;
        remaining
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    fn sleep(&self, delay: &mut impl DelayNs, mut ms: u64) {
        // DelayNs takes u32; chunk anything longer.
        while ms > 0 {
            let chunk = ms.min(u64::from(u32::MAX));
            delay.delay_ms(chunk as u32);
            ms -= chunk;
        }
    }
}
