//! Persisted records
//!
//! The best score survives power loss in the RTC's battery-backed scratch
//! memory.

pub mod best_score;

pub use best_score::{BestScore, RecordError, RECORD_MAGIC, RECORD_OFFSET};
