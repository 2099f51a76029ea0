//! Hardware abstraction traits
//!
//! These traits define the interface between the orchestration loop and
//! the board's collaborators. The firmware implements them over real
//! drivers; tests implement them with plain structs.

pub mod clock;
pub mod display;
pub mod input;
pub mod sensor;
pub mod sound;
pub mod storage;
pub mod transport;

pub use clock::{ClockError, MonotonicClock, WallClock};
pub use display::RenderSurface;
pub use input::{InputSample, InputSource};
pub use sensor::{Ambient, LightSensor, MotionSensor};
pub use sound::ToneSink;
pub use storage::ScratchStore;
pub use transport::Transport;

/// Everything the orchestration loop needs from a board
pub trait Hardware:
    InputSource
    + MotionSensor
    + LightSensor
    + RenderSurface
    + MonotonicClock
    + Transport
    + WallClock
    + ScratchStore
    + ToneSink
{
}

impl<T> Hardware for T where
    T: InputSource
        + MotionSensor
        + LightSensor
        + RenderSurface
        + MonotonicClock
        + Transport
        + WallClock
        + ScratchStore
        + ToneSink
{
}
