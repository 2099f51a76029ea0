//! Snakebox serial telemetry protocol
//!
//! This crate defines the text protocol the console uses to report finished
//! games over its serial (Bluetooth SPP) link, plus the wall-clock timestamp
//! type that the reports carry.
//!
//! # Protocol Overview
//!
//! All messages are single ASCII lines terminated by CRLF:
//! ```text
//! RPL|2025-01-20 12:30:00|00125|015\r\n     score report
//! HEARTBEAT\r\n                             liveness while a game runs
//! ```
//!
//! The console only ever transmits. The receiving side (a phone app or a
//! host tool) uses [`LineAssembler`] and [`TelemetryFrame::parse`].

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod time;

pub use frame::{
    FrameError, LineAssembler, ScoreReport, TelemetryFrame, FRAME_TERMINATOR, HEARTBEAT_TAG,
    MAX_LINE_LEN, SCORE_REPORT_TAG,
};
pub use time::{RtcTime, SECONDS_PER_DAY};
