//! Buzzer tone scheduling

pub mod tone_queue;

pub use tone_queue::{ToneOutput, ToneQueue, TONE_QUEUE_LEN};
