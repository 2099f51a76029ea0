//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::presence::monitor::IDLE_THRESHOLD_MS;

/// Loop pacing interval
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 10;

/// Engine step interval (game speed)
pub const DEFAULT_STEP_INTERVAL_MS: u32 = 200;

/// Heartbeat period while playing
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u32 = 5_000;

/// Input lockout after an accepted direction
pub const DEFAULT_DEBOUNCE_MS: u32 = 250;

/// What to do when a game ends while the display is asleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AsleepGameOverPolicy {
    /// Reset the board silently and keep playing
    #[default]
    Suppress,
    /// Report as usual and return to waiting
    Report,
}

/// Orchestration loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopConfig {
    /// Loop pacing in ms (used by the firmware ticker)
    pub tick_interval_ms: u32,
    /// Time between engine steps in ms
    pub step_interval_ms: u32,
    /// Idle time before the display sleeps in ms
    pub idle_threshold_ms: u32,
    /// Heartbeat period in ms
    pub heartbeat_interval_ms: u32,
    /// Input lockout after an accepted direction in ms
    pub debounce_ms: u32,
    /// Game-over handling while the display sleeps
    pub asleep_game_over: AsleepGameOverPolicy,
    /// Play start, eat, and game-over tones
    pub sound_enabled: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            idle_threshold_ms: IDLE_THRESHOLD_MS,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            asleep_game_over: AsleepGameOverPolicy::Suppress,
            sound_enabled: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An interval that must be positive is zero
    ZeroInterval,
    /// Step interval shorter than the loop tick
    StepFasterThanTick,
}

impl LoopConfig {
    /// Check that the intervals are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0
            || self.step_interval_ms == 0
            || self.heartbeat_interval_ms == 0
            || self.idle_threshold_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.step_interval_ms < self.tick_interval_ms {
            return Err(ConfigError::StepFasterThanTick);
        }
        Ok(())
    }
}
