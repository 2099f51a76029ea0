//! Loop configuration
//!
//! Timing and policy knobs for the orchestration loop. The firmware fills
//! these from constants generated at build time.

pub mod types;

pub use types::*;
