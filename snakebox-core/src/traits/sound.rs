//! Tone output trait

/// Trait for queueing tones
pub trait ToneSink {
    /// Queue a tone; returns immediately
    ///
    /// A frequency of 0 is a rest.
    fn play(&mut self, freq_hz: u16, duration_ms: u16);
}
