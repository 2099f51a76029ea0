//! Embassy async tasks
//!
//! The tick task runs the game loop; the other two service the light
//! sensor edge and the buzzer.

pub mod light;
pub mod tick;
pub mod tone;

pub use light::light_task;
pub use tick::tick_task;
pub use tone::tone_task;
