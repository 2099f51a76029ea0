//! Orchestration loop
//!
//! [`Controller`] owns the engine and all loop state. The firmware calls
//! [`Controller::tick`] on a fixed cadence; each call runs to completion
//! without blocking and reports what happened.

pub mod controller;
pub mod report;
pub mod tones;

pub use controller::Controller;
pub use report::{FrameKind, LoopEvent, TickReport, MAX_TICK_EVENTS};
pub use tones::Tone;
