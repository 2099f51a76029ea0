//! Passive infrared motion sensor
//!
//! The module drives its output high while it sees movement.

use embedded_hal::digital::InputPin;
use snakebox_core::traits::MotionSensor;

/// PIR sensor on an active-high input
pub struct PirSensor<P> {
    pin: P,
}

impl<P: InputPin> PirSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> MotionSensor for PirSensor<P> {
    fn is_present(&mut self) -> bool {
        // A failed read counts as nobody there
        self.pin.is_high().unwrap_or(false)
    }
}
