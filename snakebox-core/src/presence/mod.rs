//! Presence monitoring
//!
//! Puts the display to sleep when nobody has been seen for a while and wakes
//! it as soon as motion returns.

pub mod monitor;

pub use monitor::{PresenceAction, PresenceMonitor};
