//! Sound cues

use crate::traits::ToneSink;

/// One queued tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Frequency in Hz; 0 is a rest
    pub freq_hz: u16,
    pub duration_ms: u16,
}

impl Tone {
    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }
}

/// Rising pair when a game starts
pub const START: &[Tone] = &[Tone::new(660, 60), Tone::new(880, 90)];

/// Short blip per food
pub const EAT: &[Tone] = &[Tone::new(1320, 40)];

/// Falling jingle on game over
pub const GAME_OVER: &[Tone] = &[
    Tone::new(784, 120),
    Tone::new(659, 120),
    Tone::new(523, 120),
    Tone::new(0, 60),
    Tone::new(392, 300),
];

/// Queue a cue on `sink`
pub fn play<S: ToneSink + ?Sized>(sink: &mut S, cue: &[Tone]) {
    for tone in cue {
        sink.play(tone.freq_hz, tone.duration_ms);
    }
}
