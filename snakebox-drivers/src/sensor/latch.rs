//! Interrupt-to-loop edge latch
//!
//! An edge handler records the new level; the loop takes it once. Both
//! sides only touch atomics, so the latch can live in a `static`.

use portable_atomic::{AtomicBool, Ordering};
use snakebox_core::traits::{Ambient, LightSensor};

/// Latched light-sensor level with a pending-event flag
pub struct EdgeLatch {
    /// Sensor output high (dark)
    high: AtomicBool,
    /// An edge arrived since the last take
    pending: AtomicBool,
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            high: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    /// Record the level seen by the edge handler
    pub fn record(&self, high: bool) {
        self.high.store(high, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
    }

    /// Take the latched level if an edge arrived since the last call
    pub fn take(&self) -> Option<bool> {
        if self.pending.swap(false, Ordering::Acquire) {
            Some(self.high.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// Current level without clearing the pending flag
    pub fn level(&self) -> bool {
        self.high.load(Ordering::Relaxed)
    }
}

/// The sensor output goes high in the dark
fn ambient(high: bool) -> Ambient {
    if high {
        Ambient::Dark
    } else {
        Ambient::Bright
    }
}

impl LightSensor for &EdgeLatch {
    fn take_transition(&mut self) -> Option<Ambient> {
        self.take().map(ambient)
    }
}
