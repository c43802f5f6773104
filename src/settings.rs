use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::config as consts;
use crate::jones::JonesVector;
use crate::train::{Element, OpticalTrain};

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
sweep_points = 8
precision = 3

[input]
kind = "linear"
angle = 30.0

[[elements]]
type = "polarizer"
angle = 0.0

[[elements]]
type = "quarter_wave"
fast_axis = 45.0
"#;

    #[test]
    fn parse_toml() {
        let settings = Settings::from_toml_str(SAMPLE).unwrap();
        assert_eq!(settings.sweep_points, 8);
        assert_eq!(settings.precision, 3);
        assert_eq!(settings.input, InputState::Linear { angle: 30.0 });
        assert_eq!(settings.elements.len(), 2);
        assert_eq!(settings.elements[1], Element::QuarterWave { fast_axis: 45.0 });
        assert_eq!(settings.output, None);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let settings = Settings::from_toml_str("[input]\nkind = \"right_circular\"\n").unwrap();
        assert_eq!(settings.sweep_points, default_sweep_points());
        assert_eq!(settings.precision, consts::DEFAULT_PRECISION);
        assert!(settings.elements.is_empty());
        assert!(settings
            .input
            .jones()
            .approx_eq(&JonesVector::right_circular()));
    }

    #[test]
    fn rejects_zero_points() {
        let toml = "sweep_points = 0\n[input]\nkind = \"linear\"\nangle = 0.0\n";
        assert!(Settings::from_toml_str(toml).is_err());
    }

    #[test]
    fn rejects_bad_attenuator() {
        let toml = "[input]\nkind = \"linear\"\nangle = 0.0\n[[elements]]\ntype = \"attenuator\"\ntransmission = 1.5\n";
        assert!(Settings::from_toml_str(toml).is_err());
    }

    #[test]
    fn custom_input_state() {
        let input = InputState::Custom {
            ex: [1.0, 0.0],
            ey: [0.0, -1.0],
        };
        let jones = input.jones();
        assert_eq!(jones.ey, Complex::new(0.0, -1.0));
    }

    #[test]
    fn cli_overrides() {
        let mut settings = Settings::from_toml_str(SAMPLE).unwrap();
        let args = CliArgs::parse_from(["polarcore", "-n", "90", "--input-angle", "45"]);
        apply_cli_overrides(&mut settings, &args);
        assert_eq!(settings.sweep_points, 90);
        assert_eq!(settings.input, InputState::Linear { angle: 45.0 });
        assert_eq!(settings.precision, 3);
    }

    #[test]
    fn default_config_file_loads() {
        let settings = load_default_config().unwrap();
        assert!(settings.sweep_points > 0);
    }
}

/// Polarization state entering the train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputState {
    /// Linear polarization, `angle` in degrees from x.
    Linear { angle: f64 },
    RightCircular,
    LeftCircular,
    /// Explicit `[re, im]` amplitudes.
    Custom { ex: [f64; 2], ey: [f64; 2] },
}

impl InputState {
    pub fn jones(&self) -> JonesVector {
        match self {
            InputState::Linear { angle } => JonesVector::linear(angle.to_radians()),
            InputState::RightCircular => JonesVector::right_circular(),
            InputState::LeftCircular => JonesVector::left_circular(),
            InputState::Custom { ex, ey } => {
                JonesVector::new(Complex::from_array(*ex), Complex::from_array(*ey))
            }
        }
    }
}

/// Runtime configuration for the `polarcore` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputState,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default = "default_sweep_points")]
    pub sweep_points: usize,
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub output: Option<String>,
}

fn default_sweep_points() -> usize {
    36
}

fn default_precision() -> usize {
    consts::DEFAULT_PRECISION
}

impl Settings {
    /// Parses and validates an in-memory TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(s).context("failed to parse settings")?;
        validate_config(&settings)?;
        Ok(settings)
    }

    pub fn train(&self) -> OpticalTrain {
        OpticalTrain::new(self.elements.clone())
    }
}

/// Loads `config/default.toml` from the project root, without environment or CLI overrides.
pub fn load_default_config() -> Result<Settings> {
    let default_config_file = retrieve_project_root()?.join("config/default.toml");
    let settings = read_config(&default_config_file, false)?;
    validate_config(&settings)?;
    Ok(settings)
}

/// Loads settings from file, `POLARCORE_*` environment variables, and the command line.
pub fn load_config() -> Result<Settings> {
    load_config_with(CliArgs::parse())
}

pub fn load_config_with(args: CliArgs) -> Result<Settings> {
    let config_file = match &args.config {
        Some(path) => path.clone(),
        None => {
            let root = retrieve_project_root()?;
            let local_config = root.join("config/local.toml");
            if local_config.exists() {
                local_config
            } else {
                root.join("config/default.toml")
            }
        }
    };
    info!("Using configuration: {:?}", config_file);

    let mut settings = read_config(&config_file, true)?;
    apply_cli_overrides(&mut settings, &args);
    validate_config(&settings)?;

    debug!("{:#?}", settings);

    Ok(settings)
}

fn read_config(path: &Path, with_env: bool) -> Result<Settings> {
    let mut builder = Config::builder().add_source(File::from(path.to_path_buf()).required(true));
    if with_env {
        builder = builder.add_source(Environment::with_prefix("polarcore").try_parsing(true));
    }
    let config = builder
        .build()
        .with_context(|| format!("error loading configuration from {:?}", path))?;
    config
        .try_deserialize()
        .with_context(|| format!("error deserializing configuration from {:?}", path))
}

fn apply_cli_overrides(settings: &mut Settings, args: &CliArgs) {
    if let Some(points) = args.points {
        settings.sweep_points = points;
    }
    if let Some(precision) = args.precision {
        settings.precision = precision;
    }
    if let Some(output) = &args.output {
        settings.output = Some(output.clone());
    }
    if let Some(angle) = args.input_angle {
        settings.input = InputState::Linear { angle };
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the POLARCORE_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("POLARCORE_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("could not find project root directory"))
}

pub fn validate_config(settings: &Settings) -> Result<()> {
    ensure!(settings.sweep_points > 0, "sweep_points must be greater than 0");
    for element in &settings.elements {
        ensure!(
            element.parameters().iter().all(|p| p.is_finite()),
            "non-finite parameter in element {:?}",
            element
        );
        if let Element::Attenuator { transmission } = element {
            ensure!(
                (0.0..=1.0).contains(transmission),
                "attenuator transmission must lie in [0, 1], got {}",
                transmission
            );
        }
    }
    ensure!(
        settings.input.jones().intensity().is_finite(),
        "input state must be finite"
    );
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "polarcore - Jones calculus for polarization optics")]
pub struct CliArgs {
    /// Path to a TOML configuration file. Defaults to config/local.toml, then config/default.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of analyzer angles in the sweep, evenly spaced over [0, 180) degrees.
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Decimal places used when printing results.
    #[arg(short, long)]
    precision: Option<usize>,

    /// Output file for the sweep. A `.json` extension writes JSON, anything else a text table.
    #[arg(short, long)]
    output: Option<String>,

    /// Linear input polarization angle in degrees. Replaces the configured input state.
    #[arg(long)]
    input_angle: Option<f64>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Input: {:?}
  - Elements: {}
  - Sweep Points: {}
  - Precision: {}
  - Output: {}
  ",
            self.input,
            self.elements.len(),
            self.sweep_points,
            self.precision,
            self.output.as_deref().unwrap_or("stdout"),
        )
    }
}
