//! Mode definitions and transitions

use super::events::Event;

/// Console modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Attract screen; engine paused until the input changes
    #[default]
    Waiting,
    /// Game running; engine steps on its deadline
    Playing,
}

impl Mode {
    /// Check if the engine should step in this mode
    pub fn is_playing(&self) -> bool {
        matches!(self, Mode::Playing)
    }

    /// Check if heartbeats are due in this mode
    pub fn sends_heartbeat(&self) -> bool {
        self.is_playing()
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            (Waiting, InputChanged) => Playing,
            (Playing, GameOverReported) => Waiting,
            // Nobody is watching; keep playing on a fresh board
            (Playing, GameOverSuppressed) => Playing,

            // Default: stay in current mode
            _ => self,
        }
    }
}
