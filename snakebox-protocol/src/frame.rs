//! Telemetry frame encoding and decoding.
//!
//! Frame formats:
//! - Score report: `RPL|20YY-MM-DD HH:MM:SS|SSSSS|NNN\r\n`
//!   - elapsed session time in whole seconds, zero-padded to 5 digits
//!   - score, zero-padded to at least 3 digits
//! - Heartbeat: `HEARTBEAT\r\n`

use core::fmt::Write;

use heapless::{String, Vec};

use crate::time::RtcTime;

/// Line terminator for every frame
pub const FRAME_TERMINATOR: &str = "\r\n";

/// Leading tag of a score report
pub const SCORE_REPORT_TAG: &str = "RPL";

/// Complete heartbeat line body
pub const HEARTBEAT_TAG: &str = "HEARTBEAT";

/// Maximum line length including the terminator
pub const MAX_LINE_LEN: usize = 64;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Encoded line does not fit the output buffer
    BufferTooSmall,
    /// Line does not start with a known tag
    UnknownTag,
    /// Wrong number of `|`-separated fields
    FieldCount,
    /// Timestamp field is not `YYYY-MM-DD HH:MM:SS`
    InvalidTimestamp,
    /// Numeric field contains non-digits or overflows
    InvalidNumber,
}

/// End-of-game report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreReport {
    /// Wall-clock time the game ended
    pub finished_at: RtcTime,
    /// Session length in whole seconds
    pub elapsed_s: u32,
    /// Final score (foods eaten)
    pub score: u16,
}

/// Outbound telemetry frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryFrame {
    /// A game ended
    ScoreReport(ScoreReport),
    /// Periodic liveness signal while a game is running
    Heartbeat,
}

impl TelemetryFrame {
    /// Encode this frame as a CRLF-terminated line
    pub fn encode(&self) -> Result<String<MAX_LINE_LEN>, FrameError> {
        let mut line = String::new();
        let written = match self {
            TelemetryFrame::ScoreReport(report) => write!(
                line,
                "{}|{}|{:05}|{:03}{}",
                SCORE_REPORT_TAG,
                report.finished_at,
                report.elapsed_s,
                report.score,
                FRAME_TERMINATOR
            ),
            TelemetryFrame::Heartbeat => write!(line, "{}{}", HEARTBEAT_TAG, FRAME_TERMINATOR),
        };
        written.map_err(|_| FrameError::BufferTooSmall)?;
        Ok(line)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let line = self.encode()?;
        let bytes = line.as_bytes();
        if buffer.len() < bytes.len() {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Parse one line, with or without its CRLF terminator
    pub fn parse(line: &str) -> Result<Self, FrameError> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line == HEARTBEAT_TAG {
            return Ok(TelemetryFrame::Heartbeat);
        }

        let mut fields = line.split('|');
        if fields.next() != Some(SCORE_REPORT_TAG) {
            return Err(FrameError::UnknownTag);
        }

        let (Some(timestamp), Some(elapsed), Some(score), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(FrameError::FieldCount);
        };

        let finished_at = RtcTime::parse(timestamp).ok_or(FrameError::InvalidTimestamp)?;
        let elapsed_s = parse_digits(elapsed)?;
        let score = u16::try_from(parse_digits(score)?).map_err(|_| FrameError::InvalidNumber)?;

        Ok(TelemetryFrame::ScoreReport(ScoreReport {
            finished_at,
            elapsed_s,
            score,
        }))
    }
}

fn parse_digits(field: &str) -> Result<u32, FrameError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FrameError::InvalidNumber);
    }
    field.parse().map_err(|_| FrameError::InvalidNumber)
}

/// Collects incoming bytes into CRLF-terminated lines
///
/// Lines longer than [`MAX_LINE_LEN`] are discarded up to the next
/// terminator so a corrupted stream resynchronizes on the next frame.
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte
    ///
    /// Returns `Some(frame)` when a line completes. Completed lines that do
    /// not parse are reported as `Some(Err(_))`.
    pub fn feed(&mut self, byte: u8) -> Option<Result<TelemetryFrame, FrameError>> {
        if byte == b'\n' {
            let complete = !self.overflowed && self.buffer.last() == Some(&b'\r');
            let result = if complete {
                let body = &self.buffer[..self.buffer.len() - 1];
                Some(
                    core::str::from_utf8(body)
                        .map_err(|_| FrameError::UnknownTag)
                        .and_then(TelemetryFrame::parse),
                )
            } else {
                None
            };
            self.reset();
            return result;
        }

        if self.overflowed {
            return None;
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.overflowed = true;
        }
        None
    }

    /// Feed multiple bytes
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Result<TelemetryFrame, FrameError>> {
        for &byte in bytes {
            if let Some(result) = self.feed(byte) {
                return Some(result);
            }
        }
        None
    }
}
