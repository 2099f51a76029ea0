//! Deadline tracking on a wrapping millisecond clock

/// Milliseconds from `since` to `now`, correct across `u32` wraparound
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// A periodic or one-shot next-due timestamp
///
/// Stores when it was last armed and its period; due once `period_ms` has
/// elapsed since then. A disarmed deadline is never due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    armed_at_ms: u32,
    period_ms: u32,
    armed: bool,
}

impl Deadline {
    /// Create a disarmed deadline
    pub const fn new(period_ms: u32) -> Self {
        Self {
            armed_at_ms: 0,
            period_ms,
            armed: false,
        }
    }

    /// Arm (or re-arm) the deadline starting at `now_ms`
    pub fn arm(&mut self, now_ms: u32) {
        self.armed_at_ms = now_ms;
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Check if the deadline has passed
    pub fn is_due(&self, now_ms: u32) -> bool {
        self.armed && elapsed_ms(now_ms, self.armed_at_ms) >= self.period_ms
    }

    /// Check if an armed deadline is still pending
    ///
    /// Used for lockouts: active from arming until the period elapses.
    pub fn is_pending(&self, now_ms: u32) -> bool {
        self.armed && !self.is_due(now_ms)
    }

    /// If due, re-arm at `now_ms` and return true
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.arm(now_ms);
            true
        } else {
            false
        }
    }

    /// Time since the deadline was last armed
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.armed_at_ms)
    }

    /// Time until due; zero if due or disarmed
    pub fn remaining(&self, now_ms: u32) -> u32 {
        if self.armed {
            self.period_ms.saturating_sub(self.elapsed(now_ms))
        } else {
            0
        }
    }

    pub fn armed_at(&self) -> u32 {
        self.armed_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_due() {
        let d = Deadline::new(100);
        assert!(!d.is_due(0));
        assert!(!d.is_due(u32::MAX));
        assert!(!d.is_pending(0));
    }

    #[test]
    fn test_due_after_period() {
        let mut d = Deadline::new(200);
        d.arm(1000);
        assert!(!d.is_due(1199));
        assert!(d.is_due(1200));
        assert_eq!(d.remaining(1150), 50);
        assert_eq!(d.remaining(1300), 0);
    }

    #[test]
    fn test_poll_rearms() {
        let mut d = Deadline::new(200);
        d.arm(0);
        assert!(!d.poll(100));
        assert!(d.poll(210));
        assert_eq!(d.armed_at(), 210);
        assert!(!d.poll(300));
        assert!(d.poll(410));
    }

    #[test]
    fn test_wraparound() {
        let mut d = Deadline::new(100);
        d.arm(u32::MAX - 50);
        assert!(!d.is_due(u32::MAX));
        assert!(!d.is_due(48));
        assert!(d.is_due(49));
        assert_eq!(elapsed_ms(10, u32::MAX - 9), 20);
    }

    #[test]
    fn test_lockout_window() {
        let mut lockout = Deadline::new(250);
        assert!(!lockout.is_pending(0));
        lockout.arm(1000);
        assert!(lockout.is_pending(1000));
        assert!(lockout.is_pending(1249));
        assert!(!lockout.is_pending(1250));
    }
}
