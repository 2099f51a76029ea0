//! Directional input trait

use crate::game::Direction;

/// One sample of the directional controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSample {
    /// No control pressed
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl InputSample {
    /// Direction requested by this sample, if any
    pub fn direction(self) -> Option<Direction> {
        match self {
            InputSample::None => None,
            InputSample::Up => Some(Direction::Up),
            InputSample::Down => Some(Direction::Down),
            InputSample::Left => Some(Direction::Left),
            InputSample::Right => Some(Direction::Right),
        }
    }

    pub fn is_neutral(self) -> bool {
        self == InputSample::None
    }
}

impl From<Direction> for InputSample {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => InputSample::Up,
            Direction::Down => InputSample::Down,
            Direction::Left => InputSample::Left,
            Direction::Right => InputSample::Right,
        }
    }
}

/// Trait for directional controls
///
/// Implementations resolve simultaneous presses to a single sample.
pub trait InputSource {
    /// Read the controls now
    fn sample(&mut self) -> InputSample;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_mapping() {
        assert_eq!(InputSample::None.direction(), None);
        for d in Direction::ALL {
            assert_eq!(InputSample::from(d).direction(), Some(d));
        }
        assert!(InputSample::None.is_neutral());
        assert!(!InputSample::Left.is_neutral());
    }
}
