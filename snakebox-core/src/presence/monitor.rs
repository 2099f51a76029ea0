//! Idle tracking for display sleep

use crate::scheduler::elapsed_ms;

/// Default idle time before the display sleeps
pub const IDLE_THRESHOLD_MS: u32 = 10_000;

/// What the display should do after a presence update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresenceAction {
    /// Nothing changed
    None,
    /// Motion seen while asleep
    Wake,
    /// Idle threshold reached
    Sleep,
}

/// Tracks the last motion time and the display sleep flag
#[derive(Debug, Clone)]
pub struct PresenceMonitor {
    /// Idle time before sleeping
    idle_threshold_ms: u32,
    /// Monotonic time of the last motion sample
    last_motion_ms: u32,
    /// Display currently asleep
    sleeping: bool,
}

impl Default for PresenceMonitor {
    fn default() -> Self {
        Self::new(IDLE_THRESHOLD_MS, 0)
    }
}

impl PresenceMonitor {
    /// Create a monitor that treats `now_ms` as the last motion time
    pub fn new(idle_threshold_ms: u32, now_ms: u32) -> Self {
        Self {
            idle_threshold_ms,
            last_motion_ms: now_ms,
            sleeping: false,
        }
    }

    /// Feed one motion sample
    ///
    /// # Arguments
    /// - `present`: motion sensor reports someone nearby
    /// - `now_ms`: current monotonic time
    pub fn update(&mut self, present: bool, now_ms: u32) -> PresenceAction {
        if present {
            self.last_motion_ms = now_ms;
            if self.sleeping {
                self.sleeping = false;
                return PresenceAction::Wake;
            }
            return PresenceAction::None;
        }

        if !self.sleeping && self.idle_ms(now_ms) >= self.idle_threshold_ms {
            self.sleeping = true;
            return PresenceAction::Sleep;
        }

        PresenceAction::None
    }

    /// Check if the display is asleep
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Time since motion was last seen
    pub fn idle_ms(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.last_motion_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleeps_after_threshold() {
        let mut monitor = PresenceMonitor::new(10_000, 0);
        assert_eq!(monitor.update(false, 9_999), PresenceAction::None);
        assert_eq!(monitor.update(false, 10_000), PresenceAction::Sleep);
        assert!(monitor.is_sleeping());

        // Only one transition
        assert_eq!(monitor.update(false, 20_000), PresenceAction::None);
    }

    #[test]
    fn test_motion_wakes() {
        let mut monitor = PresenceMonitor::new(10_000, 0);
        monitor.update(false, 10_000);
        assert_eq!(monitor.update(true, 12_000), PresenceAction::Wake);
        assert!(!monitor.is_sleeping());
        assert_eq!(monitor.idle_ms(12_000), 0);
    }

    #[test]
    fn test_motion_postpones_sleep() {
        let mut monitor = PresenceMonitor::new(10_000, 0);
        assert_eq!(monitor.update(true, 8_000), PresenceAction::None);
        assert_eq!(monitor.update(false, 17_999), PresenceAction::None);
        assert_eq!(monitor.update(false, 18_000), PresenceAction::Sleep);
    }

    #[test]
    fn test_idle_across_wraparound() {
        let mut monitor = PresenceMonitor::new(100, u32::MAX - 10);
        assert_eq!(monitor.update(false, 50), PresenceAction::None);
        assert_eq!(monitor.update(false, 89), PresenceAction::Sleep);
    }
}
