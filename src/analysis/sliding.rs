//! analysis::sliding — entropy flux and information force over sliding windows.
//!
//! Purpose
//! -------
//! Apply the physics model repeatedly over overlapping sub-windows of a
//! [`Segment`] to obtain time-indexed series of energy dissipation, entropy
//! flux and information force.
//!
//! Key behaviors
//! -------------
//! - Durations convert to sample counts by rounding:
//!   `window_len = round(window_size / dt)`, `step_len = round(step_size / dt)`.
//! - Start indices are `i = 0, S, 2S, …` while `i + W ≤ N`, so exactly
//!   [`window_count`]`(N, W, S)` windows are produced.
//! - Each window is stamped with the time of its midpoint sample
//!   `times[i + W / 2]`.
//! - The Hawking temperature is evaluated once per call and shared by every
//!   window.
//!
//! Invariants & assumptions
//! ------------------------
//! - `W ≥ 1` and `S ≥ 1`; anything that rounds to zero samples is an
//!   [`AnalysisError::InvalidWindow`].
//! - `W > N` is an [`AnalysisError::WindowExceedsSegment`] under
//!   [`EdgePolicy::Reject`] (the default) and an empty result under
//!   [`EdgePolicy::Allow`].
//! - Output is a pure function of the segment, the options and the
//!   constants; there is no randomness.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the window-count formula over a grid of (N, W, S),
//!   midpoint timestamps, per-window values against direct evaluation,
//!   both edge policies, and the rounding rules.
use crate::{
    analysis::errors::{AnalysisError, AnalysisResult},
    physics::{
        constants::{ModelParameters, PhysicalConstants},
        model,
    },
    strain::segment::Segment,
};
use log::{debug, info};
use ndarray::s;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Behavior when the window is longer than the segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Report [`AnalysisError::WindowExceedsSegment`].
    #[default]
    Reject,
    /// Produce an empty [`WindowSeriesResult`].
    Allow,
}

impl FromStr for EdgePolicy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(EdgePolicy::Reject),
            "allow" => Ok(EdgePolicy::Allow),
            other => Err(AnalysisError::InvalidEdgePolicy { name: other.to_string() }),
        }
    }
}

/// Sliding-window configuration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Window duration (s).
    pub window_size: f64,
    /// Step between window starts (s).
    pub step_size: f64,
    /// Policy for windows longer than the segment.
    #[serde(default)]
    pub edge_policy: EdgePolicy,
}

impl WindowOptions {
    pub fn new(window_size: f64, step_size: f64) -> WindowOptions {
        WindowOptions { window_size, step_size, edge_policy: EdgePolicy::default() }
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> WindowOptions {
        self.edge_policy = edge_policy;
        self
    }

    /// Convert the durations to `(window_len, step_len)` sample counts.
    ///
    /// Errors
    /// ------
    /// - `AnalysisError::InvalidWindow` if either duration is non-finite,
    ///   non-positive, or rounds to zero samples at `dt`.
    pub fn sample_counts(&self, dt: f64) -> AnalysisResult<(usize, usize)> {
        let window_len = duration_to_samples("window_size", self.window_size, dt)?;
        let step_len = duration_to_samples("step_size", self.step_size, dt)?;
        Ok((window_len, step_len))
    }
}

fn duration_to_samples(which: &'static str, seconds: f64, dt: f64) -> AnalysisResult<usize> {
    let samples = if seconds.is_finite() && seconds > 0.0 { (seconds / dt).round() as usize } else { 0 };
    if samples == 0 {
        return Err(AnalysisError::InvalidWindow { which, seconds, samples, dt });
    }
    Ok(samples)
}

/// Number of windows of `window_len` samples advanced by `step_len` that fit
/// in `n` samples: `⌊(n − W) / S⌋ + 1` when `n ≥ W`, else 0.
///
/// Zero `window_len` or `step_len` yields 0.
///
/// ```rust
/// # use rust_strainflux::analysis::window_count;
/// assert_eq!(window_count(10, 4, 3), 3);
/// assert_eq!(window_count(3, 4, 1), 0);
/// ```
pub fn window_count(n: usize, window_len: usize, step_len: usize) -> usize {
    if window_len == 0 || step_len == 0 || n < window_len {
        return 0;
    }
    (n - window_len) / step_len + 1
}

/// Time-indexed results of a sliding-window pass.
///
/// All four sequences have the same length, one entry per window, in
/// increasing time order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowSeriesResult {
    times: Vec<f64>,
    energy_dissipation: Vec<f64>,
    entropy_flux: Vec<f64>,
    information_force: Vec<f64>,
    window_len: usize,
    step_len: usize,
}

impl WindowSeriesResult {
    fn with_capacity(capacity: usize, window_len: usize, step_len: usize) -> WindowSeriesResult {
        WindowSeriesResult {
            times: Vec::with_capacity(capacity),
            energy_dissipation: Vec::with_capacity(capacity),
            entropy_flux: Vec::with_capacity(capacity),
            information_force: Vec::with_capacity(capacity),
            window_len,
            step_len,
        }
    }

    fn push(&mut self, time: f64, energy: f64, flux: f64, force: f64) {
        self.times.push(time);
        self.energy_dissipation.push(energy);
        self.entropy_flux.push(flux);
        self.information_force.push(force);
    }

    /// Representative (midpoint) time of each window.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn energy_dissipation(&self) -> &[f64] {
        &self.energy_dissipation
    }

    pub fn entropy_flux(&self) -> &[f64] {
        &self.entropy_flux
    }

    pub fn information_force(&self) -> &[f64] {
        &self.information_force
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn step_len(&self) -> usize {
        self.step_len
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(name[i], value)` for each non-finite window value, in window order.
    ///
    /// Only offending entries are named, so a clean result costs no
    /// allocation beyond the empty `Vec`.
    pub fn non_finite_quantities(&self) -> Vec<(String, f64)> {
        let columns: [(&str, &[f64]); 3] = [
            ("energy_dissipation", self.energy_dissipation()),
            ("entropy_flux", self.entropy_flux()),
            ("information_force", self.information_force()),
        ];
        let mut out = Vec::new();
        for i in 0..self.len() {
            for (name, values) in columns {
                let value = values[i];
                if !value.is_finite() {
                    out.push((format!("{name}[{i}]"), value));
                }
            }
        }
        out
    }
}

/// Run the sliding-window analysis over `segment`.
///
/// Parameters
/// ----------
/// - `segment`: non-empty segment with its time axis.
/// - `options`: window/step durations and edge policy.
/// - `constants`, `params`: physics inputs; the temperature is computed
///   once from them.
///
/// Errors
/// ------
/// - `AnalysisError::InvalidWindow` for durations rounding to zero samples.
/// - `AnalysisError::WindowExceedsSegment` when `W > N` under
///   `EdgePolicy::Reject`.
pub fn sliding_window(
    segment: &Segment, options: &WindowOptions, constants: &PhysicalConstants,
    params: &ModelParameters,
) -> AnalysisResult<WindowSeriesResult> {
    let dt = segment.dt();
    let (window_len, step_len) = options.sample_counts(dt)?;
    let n = segment.len();

    if window_len > n {
        match options.edge_policy {
            EdgePolicy::Reject => {
                return Err(AnalysisError::WindowExceedsSegment { window_len, segment_len: n });
            }
            EdgePolicy::Allow => {
                info!("window of {window_len} samples exceeds segment of {n}; no windows produced");
                return Ok(WindowSeriesResult::with_capacity(0, window_len, step_len));
            }
        }
    }

    let count = window_count(n, window_len, step_len);
    debug!("sliding window: N = {n}, W = {window_len}, S = {step_len}, windows = {count}");

    let temperature = model::hawking_temperature(constants, params.mass);
    let samples = segment.samples();
    let times = segment.times();
    let mut result = WindowSeriesResult::with_capacity(count, window_len, step_len);

    for i in (0..count).map(|k| k * step_len) {
        let window = samples.slice(s![i..i + window_len]);
        let energy = model::energy_dissipation(window, dt);
        let flux = model::entropy_flux(energy, temperature);
        let force = model::information_force(constants, params.velocity, flux, params.mass);
        result.push(times[i + window_len / 2], energy, flux, force);
    }

    info!("computed {} sliding windows ({} samples, step {})", result.len(), window_len, step_len);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strain::{StrainMeta, StrainSeries, extract_segment_between};
    use approx::assert_relative_eq;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `window_count` against a brute-force loop.
    // - Window placement, midpoint timestamps and per-window values.
    // - Edge policies and duration rounding.
    // -------------------------------------------------------------------------

    fn segment_of(n: usize, dt: f64) -> Segment {
        let samples = Array1::from_iter((0..n).map(|i| ((i as f64) * 0.7).cos() * 1e-21));
        let series = StrainSeries::new(samples, dt, StrainMeta::default()).unwrap();
        extract_segment_between(&series, 0.0, n as f64 * dt).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the closed-form count against the `i + W ≤ N` loop.
    //
    // Given
    // -----
    // - All 1 ≤ N ≤ 30, 1 ≤ W ≤ 32, 1 ≤ S ≤ 7.
    //
    // Expect
    // ------
    // - Counts agree; `⌊(N−W)/S⌋ + 1` when N ≥ W, 0 otherwise.
    fn window_count_matches_brute_force() {
        for n in 1..=30usize {
            for w in 1..=32usize {
                for step in 1..=7usize {
                    let mut brute = 0;
                    let mut i = 0;
                    while i + w <= n {
                        brute += 1;
                        i += step;
                    }
                    assert_eq!(window_count(n, w, step), brute, "n={n} w={w} s={step}");
                }
            }
        }
        assert_eq!(window_count(10, 0, 1), 0);
        assert_eq!(window_count(10, 2, 0), 0);
    }

    #[test]
    // Purpose
    // -------
    // Check window count, midpoint times and per-window values.
    //
    // Given
    // -----
    // - 20 samples at dt = 0.25, window 1.0 s (W = 4), step 0.75 s (S = 3).
    //
    // Expect
    // ------
    // - ⌊(20 − 4)/3⌋ + 1 = 6 windows starting at 0, 3, …, 15.
    // - Window k is stamped `times[3k + 2]` and its values match a direct
    //   evaluation of the model.
    fn sliding_window_places_windows_and_values() {
        let segment = segment_of(20, 0.25);
        let constants = PhysicalConstants::default();
        let params = ModelParameters::default();
        let options = WindowOptions::new(1.0, 0.75);

        let result = sliding_window(&segment, &options, &constants, &params).unwrap();

        assert_eq!(result.len(), 6);
        assert_eq!((result.window_len(), result.step_len()), (4, 3));
        let temperature = model::hawking_temperature(&constants, params.mass);
        for k in 0..6 {
            let start = 3 * k;
            assert_eq!(result.times()[k], segment.times()[start + 2]);
            let expected_e =
                model::energy_dissipation(segment.samples().slice(s![start..start + 4]), 0.25);
            let expected_phi = expected_e / temperature;
            assert_relative_eq!(result.energy_dissipation()[k], expected_e, max_relative = 1e-12);
            assert_relative_eq!(result.entropy_flux()[k], expected_phi, max_relative = 1e-12);
            assert_relative_eq!(
                result.information_force()[k],
                model::information_force(&constants, params.velocity, expected_phi, params.mass),
                max_relative = 1e-12
            );
        }
        assert!(result.times().windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the last admissible window ends exactly at the segment end.
    //
    // Given
    // -----
    // - 8 samples, W = 4, S = 2 → starts 0, 2, 4 (4 + 4 = 8 ≤ 8).
    fn sliding_window_includes_window_ending_at_segment_end() {
        let segment = segment_of(8, 0.5);
        let options = WindowOptions::new(2.0, 1.0);

        let result = sliding_window(
            &segment,
            &options,
            &PhysicalConstants::default(),
            &ModelParameters::default(),
        )
        .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.times()[2], segment.times()[6]);
    }

    #[test]
    // Purpose
    // -------
    // Exercise both edge policies for a window longer than the segment.
    //
    // Expect
    // ------
    // - `Reject` → `WindowExceedsSegment { window_len: 12, segment_len: 10 }`.
    // - `Allow`  → empty result.
    fn sliding_window_edge_policies() {
        let segment = segment_of(10, 0.5);
        let constants = PhysicalConstants::default();
        let params = ModelParameters::default();
        let options = WindowOptions::new(6.0, 0.5);

        assert_eq!(
            sliding_window(&segment, &options, &constants, &params).unwrap_err(),
            AnalysisError::WindowExceedsSegment { window_len: 12, segment_len: 10 }
        );

        let lenient = options.with_edge_policy(EdgePolicy::Allow);
        let result = sliding_window(&segment, &lenient, &constants, &params).unwrap();
        assert!(result.is_empty());
        assert!(result.non_finite_quantities().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Verify duration rounding and rejection of zero-sample windows/steps.
    fn sample_counts_round_and_reject_zero() {
        let dt = 1.0 / 16384.0;
        let reference = WindowOptions::new(0.01, 0.002);
        assert_eq!(reference.sample_counts(dt).unwrap(), (164, 33));

        for options in [
            WindowOptions::new(0.0, 0.002),
            WindowOptions::new(0.01, dt * 0.4),
            WindowOptions::new(f64::NAN, 0.002),
            WindowOptions::new(0.01, -1.0),
        ] {
            assert!(matches!(
                options.sample_counts(dt),
                Err(AnalysisError::InvalidWindow { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify edge-policy parsing.
    fn edge_policy_from_str() {
        assert_eq!("Reject".parse::<EdgePolicy>(), Ok(EdgePolicy::Reject));
        assert_eq!("allow".parse::<EdgePolicy>(), Ok(EdgePolicy::Allow));
        assert!("skip".parse::<EdgePolicy>().is_err());
    }

    #[test]
    // Purpose
    // -------
    // Only windows overlapping a NaN sample are reported as non-finite.
    //
    // Given
    // -----
    // - 12 samples at dt = 1.0 with `samples[5] = NaN`, W = 4, S = 2.
    // - Windows start at 0, 2, 4, 6, 8; those starting at 2 and 4 cover index 5.
    //
    // Expect
    // ------
    // - A clean segment has no offenders.
    // - Windows 1 and 2 each report all three quantities, nothing else.
    fn non_finite_quantities_names_only_offending_windows() {
        let constants = PhysicalConstants::default();
        let params = ModelParameters::default();
        let options = WindowOptions::new(4.0, 2.0);

        let clean = sliding_window(&segment_of(12, 1.0), &options, &constants, &params).unwrap();
        assert!(clean.non_finite_quantities().is_empty());

        let mut samples = Array1::from_iter((0..12).map(|i| (i as f64) * 1e-21));
        samples[5] = f64::NAN;
        let series = StrainSeries::new(samples, 1.0, StrainMeta::default()).unwrap();
        let segment = extract_segment_between(&series, 0.0, 12.0).unwrap();
        let result = sliding_window(&segment, &options, &constants, &params).unwrap();

        let names: Vec<String> =
            result.non_finite_quantities().into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "energy_dissipation[1]",
                "entropy_flux[1]",
                "information_force[1]",
                "energy_dissipation[2]",
                "entropy_flux[2]",
                "information_force[2]",
            ]
        );
    }
}
