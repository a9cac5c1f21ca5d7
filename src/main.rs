use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rs_arm_trajectory::interpolation::InterpolationMethod;
use rs_arm_trajectory::planner::ShiftRequest;
use rs_arm_trajectory::resampler::resample;
use rs_arm_trajectory::rig_from_file::Rig;
use rs_arm_trajectory::samples::{KeyedSample, Value};

#[derive(Parser, Debug)]
#[command(name = "rs-arm-trajectory", version, about = "Plans arm shifts and resamples telemetry")]
struct Cli {
    /// Log filter when RUST_LOG is not set, for instance "debug" or "rs_arm_trajectory=trace"
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan the waypoints shifting the tool by a Cartesian offset
    Plan {
        /// Rig YAML; the PAROL6 calibration and default planner tuning are used without it
        #[arg(long, value_name = "FILE")]
        rig: Option<PathBuf>,
        /// Request JSON `{"q": [..6], "offset": [x, y, z]}`, stdin when omitted
        #[arg(value_name = "REQUEST")]
        request: Option<PathBuf>,
    },
    /// Interpolate keyframes at target timestamps
    Resample {
        /// linear, step-hold or constant-acceleration
        #[arg(long, default_value = "linear")]
        policy: InterpolationMethod,
        /// Input JSON `{"targets": [..], "keyframes": [{"timestamp": t, "value": v}, ..]}`,
        /// stdin when omitted
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct ResampleInput {
    targets: Vec<f64>,
    keyframes: Vec<KeyedSample>,
}

#[derive(Serialize)]
struct ResampleOutput {
    values: Vec<Value>,
    remainder: Vec<f64>,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cli.log_level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.cmd {
        Commands::Plan { rig, request } => {
            let rig = match rig {
                Some(path) => Rig::from_yaml_file(&path)
                    .with_context(|| format!("loading rig {}", path.display()))?,
                None => Rig::default(),
            };
            let request: ShiftRequest = serde_json::from_str(&read_input(request.as_deref())?)
                .context("parsing shift request")?;
            let response = rig.resolved_rate_planner().plan_request(&request)?;
            info!(waypoints = response.path.len(), arrived = response.arrived, "planned");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Resample { policy, input } => {
            let input: ResampleInput = serde_json::from_str(&read_input(input.as_deref())?)
                .context("parsing resample input")?;
            let resampled = resample(&input.targets, &input.keyframes, &policy)?;
            info!(
                resolved = resampled.values.len(),
                remaining = resampled.remainder.len(),
                %policy,
                "resampled"
            );
            let output = ResampleOutput {
                values: resampled.values,
                remainder: resampled.remainder,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
