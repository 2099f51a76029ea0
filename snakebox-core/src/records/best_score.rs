//! Best score record stored in scratch memory
//!
//! Layout: one magic byte followed by the postcard-encoded [`BestScore`].

use serde::{Deserialize, Serialize};
use snakebox_protocol::RtcTime;

use crate::traits::{ClockError, ScratchStore};

/// Marks scratch memory as holding a record
pub const RECORD_MAGIC: u8 = 0xB5;

/// Scratch offset of the record
pub const RECORD_OFFSET: u8 = 0;

/// Upper bound on the encoded record including the magic byte
const RECORD_BUF_LEN: usize = 16;

/// Highest score seen and when it was set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BestScore {
    pub score: u16,
    pub recorded_at: RtcTime,
}

/// Errors loading or storing the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Scratch memory access failed
    Storage(ClockError),
    /// Record does not fit the buffer
    Encode,
    /// Scratch accepted fewer bytes than the record needs
    Truncated,
}

impl From<ClockError> for RecordError {
    fn from(e: ClockError) -> Self {
        RecordError::Storage(e)
    }
}

impl BestScore {
    pub const fn new(score: u16, recorded_at: RtcTime) -> Self {
        Self { score, recorded_at }
    }

    /// Check if `score` beats this record
    pub fn is_beaten_by(&self, score: u16) -> bool {
        score > self.score
    }

    /// Encode as `[magic, postcard...]` into `buf`
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], RecordError> {
        let (magic, rest) = buf.split_first_mut().ok_or(RecordError::Encode)?;
        *magic = RECORD_MAGIC;
        let body_len = postcard::to_slice(self, rest)
            .map_err(|_| RecordError::Encode)?
            .len();
        Ok(&buf[..1 + body_len])
    }

    /// Decode a record; `None` if the magic byte is missing or the body is bad
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        match bytes.split_first() {
            Some((&RECORD_MAGIC, body)) => postcard::from_bytes(body).ok(),
            _ => None,
        }
    }

    /// Read the record from scratch memory
    ///
    /// A blank or corrupt region reads as `Ok(None)`.
    pub fn load<S: ScratchStore + ?Sized>(store: &mut S) -> Result<Option<Self>, RecordError> {
        let mut buf = [0u8; RECORD_BUF_LEN];
        let read = store.read_scratch(RECORD_OFFSET, &mut buf)?;
        Ok(Self::decode(&buf[..read]))
    }

    /// Write the record to scratch memory
    pub fn store<S: ScratchStore + ?Sized>(&self, store: &mut S) -> Result<(), RecordError> {
        let mut buf = [0u8; RECORD_BUF_LEN];
        let bytes = self.encode(&mut buf)?;
        let written = store.write_scratch(RECORD_OFFSET, bytes)?;
        if written < bytes.len() {
            return Err(RecordError::Truncated);
        }
        Ok(())
    }
}
