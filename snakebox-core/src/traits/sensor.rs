//! Motion and ambient light sensor traits

/// Ambient light level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ambient {
    Dark,
    Bright,
}

/// Trait for a presence (motion) sensor
pub trait MotionSensor {
    /// Check if motion is currently detected
    fn is_present(&mut self) -> bool;
}

/// Trait for an edge-latched ambient light sensor
///
/// The sensor is sampled from interrupt context; the loop only sees the
/// latched result.
pub trait LightSensor {
    /// Take the latest level if it changed since the last call
    ///
    /// Clears the pending flag, so each edge is reported once.
    fn take_transition(&mut self) -> Option<Ambient>;
}
