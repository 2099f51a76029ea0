//! Four-button direction pad
//!
//! Buttons pull their line to ground when pressed. When several are held
//! at once the first in Up, Down, Left, Right order wins.

use embedded_hal::digital::InputPin;
use snakebox_core::traits::{InputSample, InputSource};

/// Direction pad on four active-low inputs
pub struct ButtonPad<U, D, L, R> {
    up: U,
    down: D,
    left: L,
    right: R,
}

impl<U, D, L, R> ButtonPad<U, D, L, R>
where
    U: InputPin,
    D: InputPin,
    L: InputPin,
    R: InputPin,
{
    pub fn new(up: U, down: D, left: L, right: R) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    pub fn release(self) -> (U, D, L, R) {
        (self.up, self.down, self.left, self.right)
    }
}

/// Active-low read; a failed read counts as released
fn pressed<P: InputPin>(pin: &mut P) -> bool {
    pin.is_low().unwrap_or(false)
}

impl<U, D, L, R> InputSource for ButtonPad<U, D, L, R>
where
    U: InputPin,
    D: InputPin,
    L: InputPin,
    R: InputPin,
{
    fn sample(&mut self) -> InputSample {
        if pressed(&mut self.up) {
            InputSample::Up
        } else if pressed(&mut self.down) {
            InputSample::Down
        } else if pressed(&mut self.left) {
            InputSample::Left
        } else if pressed(&mut self.right) {
            InputSample::Right
        } else {
            InputSample::None
        }
    }
}
