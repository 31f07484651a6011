//! Build script for healing-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates healing.toml and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use healing_core::MotorConfig;
use serde::Deserialize;

/// Highest board id the command protocol can address
const MAX_BOARD_ID: u8 = 9;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HealingToml {
    #[serde(default)]
    board: BoardSection,
    #[serde(default)]
    serial: SerialSection,
    #[serde(default)]
    sensor: SensorSection,
    #[serde(default)]
    motor: MotorConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardSection {
    id: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SerialSection {
    baud: u32,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self { baud: 115_200 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SensorSection {
    stable_samples: u8,
    active_low: bool,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            stable_samples: 5,
            active_low: true,
        }
    }
}

fn main() {
    setup_linker();
    let config = load_config();
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate healing.toml
fn load_config() -> HealingToml {
    println!("cargo:rerun-if-changed=healing.toml");

    let config_path = Path::new("healing.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read healing.toml", &[e.to_string()]),
    };

    let config: HealingToml = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid healing.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let errors = validate(&config);
    if !errors.is_empty() {
        fail("Invalid configuration in healing.toml", &errors);
    }

    println!("cargo:warning=healing.toml validated successfully");
    config
}

fn validate(config: &HealingToml) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(id) = config.board.id {
        if id > MAX_BOARD_ID {
            errors.push(format!("[board] id must be 0-{}", MAX_BOARD_ID));
        }
    }

    if config.serial.baud == 0 {
        errors.push("[serial] baud must be non-zero".to_string());
    }

    if config.sensor.stable_samples == 0 {
        errors.push("[sensor] stable_samples must be at least 1".to_string());
    }

    if let Err(e) = config.motor.validate() {
        errors.push(format!("[motor] {:?}", e));
    }

    errors
}

/// Write the validated values as Rust constants
fn generate_config(config: &HealingToml) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("healing_config.rs")).unwrap();

    let board_id = match config.board.id {
        Some(id) => format!("Some({})", id),
        None => "None".to_string(),
    };
    let m = &config.motor;

    writeln!(f, "// Generated from healing.toml by build.rs").unwrap();
    writeln!(f, "pub const BOARD_ID: Option<u8> = {};", board_id).unwrap();
    writeln!(f, "pub const SERIAL_BAUD: u32 = {};", config.serial.baud).unwrap();
    writeln!(
        f,
        "pub const HALL_CONFIG: HallConfig = HallConfig {{ stable_samples: {}, active_low: {} }};",
        config.sensor.stable_samples, config.sensor.active_low
    )
    .unwrap();
    writeln!(f, "pub const MOTOR_CONFIG: MotorConfig = MotorConfig {{").unwrap();
    writeln!(f, "    startup_fudge: {},", m.startup_fudge).unwrap();
    writeln!(f, "    calibrate_steps: {},", m.calibrate_steps).unwrap();
    writeln!(f, "    calibration_spins: {},", m.calibration_spins).unwrap();
    writeln!(f, "    normal_speed: {},", m.normal_speed).unwrap();
    writeln!(f, "    normal_acceleration: {},", m.normal_acceleration).unwrap();
    writeln!(f, "    calibrate_speed: {},", m.calibrate_speed).unwrap();
    writeln!(f, "    calibrate_acceleration: {},", m.calibrate_acceleration).unwrap();
    writeln!(
        f,
        "    home_offset: SettingRange::new({}, {}, {}),",
        m.home_offset.min, m.home_offset.max, m.home_offset.default
    )
    .unwrap();
    writeln!(
        f,
        "    full_spin: SettingRange::new({}, {}, {}),",
        m.full_spin.min, m.full_spin.max, m.full_spin.default
    )
    .unwrap();
    writeln!(f, "    controls_indicator: false,").unwrap();
    writeln!(f, "}};").unwrap();
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
