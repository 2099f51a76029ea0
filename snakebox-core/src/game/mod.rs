//! Snake game engine
//!
//! A deterministic, fixed-capacity engine: one call to `update` advances the
//! snake by one cell. Board size and maximum length are const generics so
//! tests can run on small boards; the console uses [`SnakeGame`].

pub mod board;
pub mod engine;
pub mod grid;
pub mod rng;

pub use board::{Direction, Point};
pub use engine::{
    Collision, Engine, SnakeGame, StepOutcome, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_LENGTH,
    MAX_SNAKE_LEN,
};
pub use grid::{Cell, Grid};
pub use rng::{RandomSource, XorShift32};
