//! strain::segment — time-window extraction from a strain series.
//!
//! Purpose
//! -------
//! Slice a [`StrainSeries`] and its derived time axis down to a requested
//! [`TimeWindow`], producing an immutable [`Segment`] for the physics and
//! windowing stages.
//!
//! Key behaviors
//! -------------
//! - Sample indices are `start_idx = ⌊start_time / dt⌋` and
//!   `end_idx = ⌊end_time / dt⌋`; the slice is half-open `[start_idx, end_idx)`.
//! - `end_idx` is clamped to the series length, matching sequence slicing
//!   semantics for windows that run past the end of the data.
//! - The time axis is `index * dt` with the origin at the first sample of the
//!   **full** series, not of the slice.
//! - A window that selects zero samples is always reported as
//!   [`StrainError::EmptySegment`], never returned as an empty segment.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`Segment`] has `len() > 0`, `samples.len() == times.len()`,
//!   and strictly increasing times with uniform spacing `dt`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover index arithmetic, time-axis origin and spacing, end
//!   clamping, and every empty/invalid window branch.
use crate::strain::{
    errors::{StrainError, StrainResult},
    series::StrainSeries,
};
use log::{debug, warn};
use ndarray::{Array1, s};
use serde::{Deserialize, Serialize};

/// `TimeWindow` — requested analysis interval in seconds.
///
/// Invariants
/// ----------
/// - Both bounds are finite and `start_time >= 0`.
/// - `start_time < end_time` is **not** enforced here; an inverted or
///   degenerate window surfaces as [`StrainError::EmptySegment`] at
///   extraction time so every path reports it the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_time: f64,
    pub end_time: f64,
}

impl TimeWindow {
    /// Construct a validated [`TimeWindow`].
    ///
    /// Errors
    /// ------
    /// - `StrainError::InvalidTimeWindow` when either bound is non-finite or
    ///   `start_time < 0`.
    pub fn new(start_time: f64, end_time: f64) -> StrainResult<TimeWindow> {
        if !start_time.is_finite() || !end_time.is_finite() || start_time < 0.0 {
            return Err(StrainError::InvalidTimeWindow { start_time, end_time });
        }
        Ok(TimeWindow { start_time, end_time })
    }

    /// Sample index pair `(⌊start/dt⌋, ⌊end/dt⌋)` before clamping.
    ///
    /// Negative end times floor to index 0.
    pub fn sample_indices(&self, dt: f64) -> (usize, usize) {
        let start_idx = (self.start_time / dt).floor() as usize;
        let end_idx = (self.end_time / dt).floor().max(0.0) as usize;
        (start_idx, end_idx)
    }
}

/// `Segment` — a contiguous slice of strain samples with aligned times.
///
/// Fields
/// ------
/// - `samples`: strain values `series[start_idx..end_idx]`.
/// - `times`: `(start_idx..end_idx) * dt`, same length as `samples`.
/// - `start_idx`: index of the first sample in the full series.
/// - `dt`: sample spacing inherited from the series.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    samples: Array1<f64>,
    times: Array1<f64>,
    start_idx: usize,
    dt: f64,
}

impl Segment {
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    pub fn start_idx(&self) -> usize {
        self.start_idx
    }

    /// Exclusive end index in the full series.
    pub fn end_idx(&self) -> usize {
        self.start_idx + self.samples.len()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `("strain[i]", value)` for every NaN/±inf sample, `i` being the index
    /// in the full series.
    pub fn non_finite_samples(&self) -> Vec<(String, f64)> {
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, value)| !value.is_finite())
            .map(|(offset, &value)| (format!("strain[{}]", self.start_idx + offset), value))
            .collect()
    }
}

/// Extract the half-open sample range covered by `window` from `series`.
///
/// Parameters
/// ----------
/// - `series`: validated strain series.
/// - `window`: requested interval in seconds from the series start.
///
/// Returns
/// -------
/// `StrainResult<Segment>`
///   A non-empty segment whose time axis starts at `start_idx * dt`.
///
/// Errors
/// ------
/// - `StrainError::InvalidTimeWindow` when the window bounds are non-finite
///   or negative (re-checked here because the fields are public).
/// - `StrainError::EmptySegment` when `end_idx <= start_idx` after clamping
///   `end_idx` to `series.len()`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_strainflux::strain::{extract_segment, StrainMeta, StrainSeries, TimeWindow};
/// let series = StrainSeries::new(array![1.0, 2.0, 3.0, 4.0], 0.5, StrainMeta::default()).unwrap();
/// let segment = extract_segment(&series, TimeWindow::new(0.5, 1.5).unwrap()).unwrap();
/// assert_eq!(segment.samples().to_vec(), vec![2.0, 3.0]);
/// assert_eq!(segment.times().to_vec(), vec![0.5, 1.0]);
/// ```
pub fn extract_segment(series: &StrainSeries, window: TimeWindow) -> StrainResult<Segment> {
    let window = TimeWindow::new(window.start_time, window.end_time)?;
    let dt = series.dt();
    let (start_idx, raw_end_idx) = window.sample_indices(dt);

    let end_idx = raw_end_idx.min(series.len());
    if end_idx < raw_end_idx {
        warn!(
            "end_time {} s lies past the series end ({} s); clamping end_idx {} -> {}",
            window.end_time,
            series.duration(),
            raw_end_idx,
            end_idx
        );
    }

    if end_idx <= start_idx {
        return Err(StrainError::EmptySegment {
            start_time: window.start_time,
            end_time: window.end_time,
            start_idx,
            end_idx,
        });
    }

    debug!("segment indices [{start_idx}, {end_idx}) at dt = {dt}");

    let samples = series.samples().slice(s![start_idx..end_idx]).to_owned();
    let times = Array1::from_iter((start_idx..end_idx).map(|i| i as f64 * dt));

    Ok(Segment { samples, times, start_idx, dt })
}

/// Convenience wrapper building the [`TimeWindow`] from raw bounds.
pub fn extract_segment_between(
    series: &StrainSeries, start_time: f64, end_time: f64,
) -> StrainResult<Segment> {
    extract_segment(series, TimeWindow::new(start_time, end_time)?)
}
