//! analysis::spectrum — one-sided amplitude spectrum of a strain segment.
//!
//! Purpose
//! -------
//! Compute `|rfft(x)|` and the matching frequency grid `k / (N·dt)` for
//! `k = 0..=N/2`, then restrict it to a band (0–1000 Hz by default) for the
//! spectrum plot.
//!
//! Conventions
//! -----------
//! - The transform is unnormalized: `Y_k = Σ x_n e^{-2πikn/N}`.
//! - The FFT itself is delegated to `rustfft`.
use crate::analysis::errors::{AnalysisError, AnalysisResult};
use ndarray::ArrayView1;
use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};

/// Default upper edge of the plotted band (Hz).
pub const DEFAULT_MAX_FREQUENCY: f64 = 1000.0;

/// Parallel frequency (Hz) and amplitude sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeSpectrum {
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl AmplitudeSpectrum {
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Keep only bins with `min_frequency <= f <= max_frequency`.
    pub fn band(&self, min_frequency: f64, max_frequency: f64) -> AmplitudeSpectrum {
        let (frequencies, amplitudes) = self
            .frequencies
            .iter()
            .zip(&self.amplitudes)
            .filter(|(f, _)| **f >= min_frequency && **f <= max_frequency)
            .map(|(&f, &a)| (f, a))
            .unzip();
        AmplitudeSpectrum { frequencies, amplitudes }
    }

    /// Bin with the largest amplitude, skipping DC when other bins exist.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let skip = usize::from(self.len() > 1 && self.frequencies[0] == 0.0);
        self.frequencies
            .iter()
            .zip(&self.amplitudes)
            .skip(skip)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&f, &a)| (f, a))
    }
}

/// Frequencies of the one-sided transform of `n` samples spaced `dt`.
pub fn rfft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let span = n as f64 * dt;
    (0..=n / 2).map(|k| k as f64 / span).collect()
}

/// One-sided amplitude spectrum `|Y_k|`, `k = 0..=N/2`.
///
/// Errors
/// ------
/// - `AnalysisError::EmptyInput` when `samples` is empty.
pub fn amplitude_spectrum(samples: ArrayView1<'_, f64>, dt: f64) -> AnalysisResult<AmplitudeSpectrum> {
    let n = samples.len();
    if n == 0 {
        return Err(AnalysisError::EmptyInput);
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);

    let amplitudes = buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect();
    Ok(AmplitudeSpectrum { frequencies: rfft_frequencies(n, dt), amplitudes })
}
