//! strainflux — command-line front end.
//!
//! Usage:
//!   strainflux --input H-H1_GWOSC_16KHZ_R1-1126259447-32.txt
//!   strainflux --config run.toml --mass 2e30 --export
//!
//! Flags override values from `--config`; anything left unset keeps the
//! reference defaults of [`RunConfig`].

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rust_strainflux::{
    analysis::EdgePolicy,
    config::RunConfig,
    physics::NonFinitePolicy,
    pipeline::{analyze_file, render_outputs},
};
use std::path::PathBuf;

/// Entropy-flux and information-force analysis of GW strain data
#[derive(Parser, Debug)]
#[command(name = "strainflux", version)]
#[command(about = "Windowed entropy-flux and information-force analysis of strain data")]
struct Args {
    /// TOML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strain file (GWOSC .hdf5 or ASCII text)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Segment start (s)
    #[arg(long)]
    start: Option<f64>,

    /// Segment end (s)
    #[arg(long)]
    end: Option<f64>,

    /// Sliding-window length (s)
    #[arg(long)]
    window: Option<f64>,

    /// Sliding-window step (s)
    #[arg(long)]
    step: Option<f64>,

    /// Black-hole mass (kg)
    #[arg(long)]
    mass: Option<f64>,

    /// Carrier velocity (m/s)
    #[arg(long)]
    velocity: Option<f64>,

    /// Directory for figures and exports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip rendering the SVG figures
    #[arg(long)]
    no_plots: bool,

    /// Also write summary.json and windows.csv
    #[arg(long)]
    export: bool,

    /// Fail on NaN or infinite results instead of warning
    #[arg(long)]
    strict_finite: bool,

    /// Produce an empty window series when the window exceeds the segment
    #[arg(long)]
    allow_short_segment: bool,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(start) = self.start {
            config.start_time = start;
        }
        if let Some(end) = self.end {
            config.end_time = end;
        }
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(step) = self.step {
            config.step_size = step;
        }
        if let Some(mass) = self.mass {
            config.model.mass = mass;
        }
        if let Some(velocity) = self.velocity {
            config.model.velocity = velocity;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if self.no_plots {
            config.plots = false;
        }
        if self.export {
            config.export = true;
        }
        if self.strict_finite {
            config.non_finite = NonFinitePolicy::Error;
        }
        if self.allow_short_segment {
            config.edge_policy = EdgePolicy::Allow;
        }

        config.validate().context("invalid run configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config()?;
    debug!("run configuration: {config:?}");

    let outcome = analyze_file(&config)
        .with_context(|| format!("analysing {}", config.input.display()))?;
    let written = render_outputs(&outcome, &config).context("writing outputs")?;

    info!("done; {} file(s) written to {}", written.len(), config.output_dir.display());
    Ok(())
}
