//! Build script for snakebox-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates snakebox.toml at compile time
//! - Generates `board_config.rs` with the validated settings

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_constants(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Settings extracted from snakebox.toml
struct BoardSettings {
    step_interval_ms: i64,
    debounce_ms: i64,
    sound: bool,
    tick_interval_ms: i64,
    heartbeat_interval_ms: i64,
    idle_threshold_ms: i64,
    report_while_asleep: bool,
    baudrate: i64,
    console_baudrate: i64,
}

/// Validate snakebox.toml configuration at compile time
fn validate_config() -> BoardSettings {
    println!("cargo:rerun-if-changed=snakebox.toml");

    let config_path = Path::new("snakebox.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: snakebox.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a snakebox.toml configuration file.       ║\n\
            ║  Please create one in the snakebox-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read snakebox.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in snakebox.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let step_interval_ms = interval(&config, "game", "step_interval_ms", 200, &mut errors);
    let debounce_ms = interval(&config, "game", "debounce_ms", 250, &mut errors);
    let tick_interval_ms = interval(&config, "loop", "tick_interval_ms", 10, &mut errors);
    let heartbeat_interval_ms =
        interval(&config, "loop", "heartbeat_interval_ms", 5000, &mut errors);
    let idle_threshold_ms = interval(&config, "display", "idle_threshold_ms", 10_000, &mut errors);

    let sound = match lookup(&config, "game", "sound") {
        None => true,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[game] sound must be true or false".to_string());
            true
        }
    };

    let report_while_asleep = match lookup(&config, "display", "asleep_game_over") {
        None => false,
        Some(toml::Value::String(s)) if s == "suppress" => false,
        Some(toml::Value::String(s)) if s == "report" => true,
        Some(_) => {
            errors.push("[display] asleep_game_over must be 'suppress' or 'report'".to_string());
            false
        }
    };

    let baudrate = baud(&config, "baudrate", 9600, &mut errors);
    let console_baudrate = baud(&config, "console_baudrate", 115_200, &mut errors);

    if step_interval_ms < tick_interval_ms {
        errors.push("[game] step_interval_ms must be >= [loop] tick_interval_ms".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in snakebox.toml                   ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=snakebox.toml validated successfully");

    BoardSettings {
        step_interval_ms,
        debounce_ms,
        sound,
        tick_interval_ms,
        heartbeat_interval_ms,
        idle_threshold_ms,
        report_while_asleep,
        baudrate,
        console_baudrate,
    }
}

/// Look up `[section] key`
fn lookup<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

/// Read a millisecond interval; must be a positive integer
fn interval(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match lookup(config, section, key) {
        None => default,
        Some(toml::Value::Integer(ms)) if *ms > 0 && *ms <= u32::MAX as i64 => *ms,
        Some(_) => {
            errors.push(format!("[{}] {} must be a positive integer", section, key));
            default
        }
    }
}

/// Read a `[serial]` baud rate
fn baud(config: &toml::Value, key: &str, default: i64, errors: &mut Vec<String>) -> i64 {
    match lookup(config, "serial", key) {
        None => default,
        Some(toml::Value::Integer(b)) if (1200..=921_600).contains(b) => *b,
        Some(_) => {
            errors.push(format!("[serial] {} must be 1200-921600", key));
            default
        }
    }
}

/// Write the validated settings as Rust constants
fn generate_constants(settings: &BoardSettings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();

    writeln!(f, "// Generated by build.rs from snakebox.toml").unwrap();
    writeln!(f, "pub const STEP_INTERVAL_MS: u32 = {};", settings.step_interval_ms).unwrap();
    writeln!(f, "pub const DEBOUNCE_MS: u32 = {};", settings.debounce_ms).unwrap();
    writeln!(f, "pub const SOUND_ENABLED: bool = {};", settings.sound).unwrap();
    writeln!(f, "pub const TICK_INTERVAL_MS: u32 = {};", settings.tick_interval_ms).unwrap();
    writeln!(
        f,
        "pub const HEARTBEAT_INTERVAL_MS: u32 = {};",
        settings.heartbeat_interval_ms
    )
    .unwrap();
    writeln!(f, "pub const IDLE_THRESHOLD_MS: u32 = {};", settings.idle_threshold_ms).unwrap();
    writeln!(
        f,
        "pub const REPORT_WHILE_ASLEEP: bool = {};",
        settings.report_while_asleep
    )
    .unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", settings.baudrate).unwrap();
    writeln!(f, "pub const CONSOLE_BAUDRATE: u32 = {};", settings.console_baudrate).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
