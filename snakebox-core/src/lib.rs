//! Board-agnostic core logic for the Snakebox game console
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Game engine (movement, collision, growth, scoring) and grid projection
//! - Mode state machine (waiting / playing)
//! - Next-due deadlines replacing busy-wait pacing and debounce
//! - Presence monitoring (idle display sleep)
//! - Collaborator traits (input, sensors, display, clock, transport, sound)
//! - Loop configuration and the persisted best-score record
//! - The cooperative orchestration loop tying it all together

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod game;
pub mod presence;
pub mod records;
pub mod runtime;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use snakebox_protocol::RtcTime;
