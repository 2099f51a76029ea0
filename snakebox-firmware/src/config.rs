//! Board configuration compiled in from snakebox.toml

use snakebox_core::config::{AsleepGameOverPolicy, LoopConfig};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
}

pub use generated::{BAUDRATE, CONSOLE_BAUDRATE};

/// Loop configuration from the embedded settings
pub fn loop_config() -> LoopConfig {
    LoopConfig {
        tick_interval_ms: generated::TICK_INTERVAL_MS,
        step_interval_ms: generated::STEP_INTERVAL_MS,
        idle_threshold_ms: generated::IDLE_THRESHOLD_MS,
        heartbeat_interval_ms: generated::HEARTBEAT_INTERVAL_MS,
        debounce_ms: generated::DEBOUNCE_MS,
        asleep_game_over: if generated::REPORT_WHILE_ASLEEP {
            AsleepGameOverPolicy::Report
        } else {
            AsleepGameOverPolicy::Suppress
        },
        sound_enabled: generated::SOUND_ENABLED,
    }
}
