//! Per-tick event reports

use heapless::Vec;

use crate::game::{Collision, StepOutcome};
use crate::records::RecordError;
use crate::state::Mode;
use crate::traits::{Ambient, ClockError};

/// Upper bound on events recorded in one tick
pub const MAX_TICK_EVENTS: usize = 16;

/// Which frame went out on the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    ScoreReport,
    Heartbeat,
}

/// Something the loop did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// Mode changed
    ModeChanged(Mode),
    /// Engine advanced one step
    Stepped(StepOutcome),
    /// A game ended; `reported` is false when the report was suppressed
    GameOver {
        score: u16,
        collision: Collision,
        reported: bool,
    },
    /// A frame was handed to the transport
    FrameSent(FrameKind),
    /// Display went to sleep
    DisplaySleep,
    /// Display woke up
    DisplayWake,
    /// Ambient light level changed
    AmbientChanged(Ambient),
    /// A new best score was recorded
    NewBest(u16),
    /// The wall clock could not be read
    ClockFault(ClockError),
    /// The best score record could not be stored
    RecordFault(RecordError),
}

/// Events from one tick, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    now_ms: u32,
    events: Vec<LoopEvent, MAX_TICK_EVENTS>,
}

impl TickReport {
    pub fn new(now_ms: u32) -> Self {
        Self {
            now_ms,
            events: Vec::new(),
        }
    }

    /// Record an event; extra events past capacity are dropped
    pub fn push(&mut self, event: LoopEvent) {
        let _ = self.events.push(event);
    }

    /// Monotonic time the tick ran at
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    pub fn events(&self) -> &[LoopEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event: &LoopEvent) -> bool {
        self.events.contains(event)
    }

    /// Number of frames of `kind` sent this tick
    pub fn frames_sent(&self, kind: FrameKind) -> usize {
        self.events
            .iter()
            .filter(|e| **e == LoopEvent::FrameSent(kind))
            .count()
    }
}
