//! Build script for trackport-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bridge.toml at compile time
//! - Generates the `BridgeConfig` constant compiled into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const VALID_SAMPLE_RATES: [i64; 7] = [10, 20, 40, 60, 80, 100, 200];

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // cortex-m-rt, embassy-rp boot2 and defmt linker scripts
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values extracted from bridge.toml, defaults filled in
struct Settings {
    remote: bool,
    sample_rate: Option<i64>,
    scroll_divisor: i64,
    tx_timeout_ms: i64,
    ack_timeout_ms: i64,
    self_test_timeout_ms: i64,
    report_wait_ms: i64,
    report_byte_timeout_ms: i64,
    jiggle_interval_ms: i64,
    jiggle_max: i64,
    heartbeat_interval_ms: i64,
    heartbeat_max: i64,
}

/// Validate bridge.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=bridge.toml");

    let config_path = Path::new("bridge.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bridge.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a bridge.toml configuration file.         ║\n\
            ║  Please create one in the trackport-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bridge.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in bridge.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let remote = match config.get("device").and_then(|d| d.get("mode")) {
        None => false,
        Some(toml::Value::String(mode)) if mode == "stream" => false,
        Some(toml::Value::String(mode)) if mode == "remote" => true,
        Some(other) => {
            errors.push(format!(
                "[device] mode must be \"stream\" or \"remote\", got {}",
                other
            ));
            false
        }
    };

    let sample_rate = match config.get("device").and_then(|d| d.get("sample_rate")) {
        None => None,
        Some(toml::Value::Integer(rate)) if VALID_SAMPLE_RATES.contains(rate) => Some(*rate),
        Some(other) => {
            errors.push(format!(
                "[device] sample_rate must be one of {:?}, got {}",
                VALID_SAMPLE_RATES, other
            ));
            None
        }
    };

    let settings = Settings {
        remote,
        sample_rate,
        scroll_divisor: integer(&config, "scroll", "divisor", 8, 1, 127, &mut errors),
        tx_timeout_ms: integer(&config, "timing", "tx_timeout_ms", 500, 1, 5_000, &mut errors),
        ack_timeout_ms: integer(&config, "timing", "ack_timeout_ms", 25, 1, 1_000, &mut errors),
        self_test_timeout_ms: integer(
            &config,
            "timing",
            "self_test_timeout_ms",
            500,
            1,
            5_000,
            &mut errors,
        ),
        report_wait_ms: integer(&config, "timing", "report_wait_ms", 10, 0, 1_000, &mut errors),
        report_byte_timeout_ms: integer(
            &config,
            "timing",
            "report_byte_timeout_ms",
            20,
            1,
            1_000,
            &mut errors,
        ),
        jiggle_interval_ms: integer(
            &config,
            "jiggle",
            "interval_ms",
            30_000,
            1_000,
            u32::MAX as i64,
            &mut errors,
        ),
        jiggle_max: integer(&config, "jiggle", "max", 20, 0, 255, &mut errors),
        heartbeat_interval_ms: integer(
            &config,
            "heartbeat",
            "interval_ms",
            30_000,
            1_000,
            u32::MAX as i64,
            &mut errors,
        ),
        heartbeat_max: integer(&config, "heartbeat", "max", 60, 0, 65_535, &mut errors),
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid bridge.toml                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&errors.join("\n"))
        );
    }

    println!("cargo:warning=bridge.toml validated successfully");
    settings
}

/// Read an optional integer, checking its range
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(toml::Value::Integer(value)) if (min..=max).contains(value) => *value,
        Some(toml::Value::Integer(value)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}, got {}",
                section, key, min, max, value
            ));
            default
        }
        Some(other) => {
            errors.push(format!(
                "[{}] {} must be an integer, got {}",
                section, key, other
            ));
            default
        }
    }
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

/// Write the validated settings as a `BridgeConfig` constant
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mode = if settings.remote { "Remote" } else { "Stream" };
    let sample_rate = match settings.sample_rate {
        Some(rate) => format!("Some({})", rate),
        None => "None".to_string(),
    };

    let source = format!(
        "/// Configuration generated from bridge.toml\n\
        pub const BRIDGE_CONFIG: trackport_core::BridgeConfig = trackport_core::BridgeConfig {{\n\
        \x20   mode: trackport_core::ReportMode::{},\n\
        \x20   sample_rate: {},\n\
        \x20   scroll_divisor: {},\n\
        \x20   tx_timeout_ms: {},\n\
        \x20   ack_timeout_ms: {},\n\
        \x20   self_test_timeout_ms: {},\n\
        \x20   report_wait_ms: {},\n\
        \x20   report_byte_timeout_ms: {},\n\
        \x20   jiggle_interval_ms: {},\n\
        \x20   jiggle_max: {},\n\
        \x20   heartbeat_interval_ms: {},\n\
        \x20   heartbeat_max: {},\n\
        }};\n",
        mode,
        sample_rate,
        settings.scroll_divisor,
        settings.tx_timeout_ms,
        settings.ack_timeout_ms,
        settings.self_test_timeout_ms,
        settings.report_wait_ms,
        settings.report_byte_timeout_ms,
        settings.jiggle_interval_ms,
        settings.jiggle_max,
        settings.heartbeat_interval_ms,
        settings.heartbeat_max,
    );

    let mut f = File::create(out_dir.join("bridge_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
