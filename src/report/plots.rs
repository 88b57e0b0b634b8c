//! report::plots — SVG figures for a completed analysis.
//!
//! Purpose
//! -------
//! Render the four figures of a run with `plotters`' SVG backend:
//!
//! | file                    | x                 | y                     |
//! |-------------------------|-------------------|-----------------------|
//! | `strain.svg`            | time (s)          | strain                |
//! | `spectrum.svg`          | frequency (Hz)    | amplitude             |
//! | `entropy_flux.svg`      | window time (s)   | entropy flux (J/K/s)  |
//! | `information_force.svg` | window time (s)   | information force (N) |
//!
//! Conventions
//! -----------
//! - Figures are written, never displayed; the output directory is created
//!   if missing.
//! - An empty series is skipped with a warning instead of producing an
//!   empty chart.
use crate::report::errors::{ReportError, ReportResult};
use log::{info, warn};
use plotters::prelude::*;
use std::{
    fmt::Display,
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

const WIDE: (u32, u32) = (1000, 400);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const DARK_ORANGE: RGBColor = RGBColor(255, 140, 0);
const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);

/// One line chart to render.
#[derive(Debug, Clone)]
pub struct LinePlot<'a> {
    pub file_name: &'a str,
    pub caption: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub points: Vec<(f64, f64)>,
    /// Fixed x range; derived from the data when `None`.
    pub x_range: Option<Range<f64>>,
    pub color: RGBColor,
}

/// Inputs for the four standard figures, as parallel slices.
#[derive(Debug, Clone, Copy)]
pub struct FigureData<'a> {
    pub segment_times: &'a [f64],
    pub segment_samples: &'a [f64],
    pub frequencies: &'a [f64],
    pub amplitudes: &'a [f64],
    pub max_frequency: f64,
    pub window_times: &'a [f64],
    pub entropy_flux: &'a [f64],
    pub information_force: &'a [f64],
}

impl<'a> FigureData<'a> {
    /// The four standard line plots.
    pub fn line_plots(&self) -> [LinePlot<'a>; 4] {
        [
            LinePlot {
                file_name: "strain.svg",
                caption: "Gravitational Wave Strain vs Time",
                x_desc: "Time (s)",
                y_desc: "Strain",
                points: zip_points(self.segment_times, self.segment_samples),
                x_range: None,
                color: BLACK,
            },
            LinePlot {
                file_name: "spectrum.svg",
                caption: "Amplitude Spectrum of Strain Signal",
                x_desc: "Frequency (Hz)",
                y_desc: "Amplitude",
                points: zip_points(self.frequencies, self.amplitudes),
                x_range: Some(0.0..self.max_frequency),
                color: PURPLE,
            },
            LinePlot {
                file_name: "entropy_flux.svg",
                caption: "Entropy Flux vs Time",
                x_desc: "Time (s)",
                y_desc: "Entropy Flux (J/K/s)",
                points: zip_points(self.window_times, self.entropy_flux),
                x_range: None,
                color: DARK_ORANGE,
            },
            LinePlot {
                file_name: "information_force.svg",
                caption: "Information Force vs Time",
                x_desc: "Time (s)",
                y_desc: "Information Force (N)",
                points: zip_points(self.window_times, self.information_force),
                x_range: None,
                color: ROYAL_BLUE,
            },
        ]
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Render every non-empty standard figure into `out_dir`.
///
/// Returns the paths written, in table order.
pub fn render_figures(data: &FigureData<'_>, out_dir: &Path) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|err| ReportError::Io {
        path: out_dir.display().to_string(),
        reason: err.to_string(),
    })?;

    let mut written = Vec::new();
    for plot in data.line_plots() {
        let path = out_dir.join(plot.file_name);
        if render_line_plot(&path, &plot)? {
            written.push(path);
        }
    }
    Ok(written)
}

/// Render a single line chart to `path`.
///
/// Returns `Ok(false)` without touching the file system when `plot` has no
/// finite points.
pub fn render_line_plot(path: &Path, plot: &LinePlot<'_>) -> ReportResult<bool> {
    let points: Vec<(f64, f64)> = plot
        .points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if points.is_empty() {
        warn!("skipping {}: no finite points to plot", path.display());
        return Ok(false);
    }

    let x_range = plot.x_range.clone().unwrap_or_else(|| padded_range(points.iter().map(|p| p.0)));
    let y_range = padded_range(
        points.iter().filter(|(x, _)| x_range.contains(x) || *x == x_range.end).map(|p| p.1),
    );

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE).map_err(|err| render_error(path, err))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(plot.caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|err| render_error(path, err))?;

    chart
        .configure_mesh()
        .x_desc(plot.x_desc)
        .y_desc(plot.y_desc)
        .y_label_formatter(&|y| format!("{y:.2e}"))
        .draw()
        .map_err(|err| render_error(path, err))?;

    chart
        .draw_series(LineSeries::new(points, &plot.color))
        .map_err(|err| render_error(path, err))?;

    root.present().map_err(|err| render_error(path, err))?;
    info!("wrote {}", path.display());
    Ok(true)
}

fn render_error(path: &Path, err: impl Display) -> ReportError {
    ReportError::Render { path: path.display().to_string(), reason: err.to_string() }
}

/// `[min, max]` of `values` widened by 5%, or by 1 for a flat series.
fn padded_range<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span > 0.0 {
        let pad = 0.05 * span;
        (lo - pad)..(hi + pad)
    } else {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - pad)..(hi + pad)
    }
}
