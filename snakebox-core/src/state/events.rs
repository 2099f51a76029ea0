//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Input sample changed from the baseline recorded when waiting began
    InputChanged,
    /// Game ended and the score was reported
    GameOverReported,
    /// Game ended while the display slept; the report was suppressed
    GameOverSuppressed,
}
