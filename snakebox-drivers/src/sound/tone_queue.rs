//! Fixed-size tone queue driven by a 1 ms tick
//!
//! The loop queues tones without waiting; a 1 ms task plays them back to
//! back on the buzzer output.

use heapless::Deque;
use snakebox_core::runtime::Tone;
use snakebox_core::traits::ToneSink;

/// Default queue depth
pub const TONE_QUEUE_LEN: usize = 8;

/// Trait for the buzzer output (typically a PWM channel)
pub trait ToneOutput {
    /// Start a square wave at `freq_hz`
    fn start(&mut self, freq_hz: u16);

    /// Silence the output
    fn stop(&mut self);
}

/// Queue of pending tones plus the one playing
#[derive(Debug)]
pub struct ToneQueue<const N: usize = TONE_QUEUE_LEN> {
    pending: Deque<Tone, N>,
    /// Milliseconds left on the current tone
    remaining_ms: u32,
    dropped: u32,
}

impl<const N: usize> Default for ToneQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ToneQueue<N> {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
            remaining_ms: 0,
            dropped: 0,
        }
    }

    /// Queue a tone; dropped if the queue is full
    ///
    /// Zero-length tones have nothing to play and are skipped.
    pub fn push(&mut self, tone: Tone) -> bool {
        if tone.duration_ms == 0 {
            return true;
        }
        if self.pending.push_back(tone).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    /// Advance playback by 1 ms
    pub fn tick_1ms<O: ToneOutput>(&mut self, output: &mut O) {
        if self.remaining_ms > 0 {
            self.remaining_ms -= 1;
            if self.remaining_ms == 0 {
                output.stop();
            }
        }

        if self.remaining_ms == 0 {
            if let Some(tone) = self.pending.pop_front() {
                if tone.freq_hz == 0 {
                    output.stop();
                } else {
                    output.start(tone.freq_hz);
                }
                self.remaining_ms = tone.duration_ms as u32;
            }
        }
    }

    /// Check if nothing is playing or queued
    pub fn is_idle(&self) -> bool {
        self.remaining_ms == 0 && self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Tones discarded because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> ToneSink for ToneQueue<N> {
    fn play(&mut self, freq_hz: u16, duration_ms: u16) {
        self.push(Tone::new(freq_hz, duration_ms));
    }
}
