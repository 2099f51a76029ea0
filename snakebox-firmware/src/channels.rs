//! State shared between Embassy tasks
//!
//! The tick loop owns everything else; only the light latch and the tone
//! queue are touched from other tasks.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use snakebox_drivers::sensor::EdgeLatch;
use snakebox_drivers::sound::ToneQueue;

/// Light sensor level, recorded by the light task
pub static LIGHT_LATCH: EdgeLatch = EdgeLatch::new();

/// Tones queued by the loop, played by the tone task
pub static TONE_QUEUE: Mutex<CriticalSectionRawMutex, RefCell<ToneQueue>> =
    Mutex::new(RefCell::new(ToneQueue::new()));
