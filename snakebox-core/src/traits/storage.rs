//! Battery-backed scratch memory trait

use super::clock::ClockError;

/// Trait for small battery-backed memory (the RTC's scratch RAM)
///
/// Requests past the end of the region are clamped, never rejected.
pub trait ScratchStore {
    /// Read into `buf` starting at `offset`; returns bytes read
    fn read_scratch(&mut self, offset: u8, buf: &mut [u8]) -> Result<usize, ClockError>;

    /// Write `bytes` starting at `offset`; returns bytes written
    fn write_scratch(&mut self, offset: u8, bytes: &[u8]) -> Result<usize, ClockError>;
}
