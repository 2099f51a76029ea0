//! Next-due scheduling
//!
//! Periodic activities in the loop (engine steps, heartbeats, input lockout)
//! are tracked as deadlines against a wrapping millisecond clock instead of
//! busy waits.

pub mod deadline;

pub use deadline::{elapsed_ms, Deadline};
