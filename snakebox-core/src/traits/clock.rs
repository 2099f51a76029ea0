//! Monotonic and wall clock traits

use snakebox_protocol::RtcTime;

/// Errors reading or writing the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// A bus line could not be driven or read
    Bus,
    /// The clock returned values that do not decode
    InvalidData,
}

/// Trait for the free-running millisecond counter
pub trait MonotonicClock {
    /// Milliseconds since boot, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;
}

/// Trait for the calendar clock used to timestamp sessions
pub trait WallClock {
    fn read_time(&mut self) -> Result<RtcTime, ClockError>;
}
