//! Strain series container.
//!
//! Purpose
//! -------
//! Provide a small, validated container for a uniformly sampled strain
//! series. All loaders funnel their output through [`StrainSeries::new`] so
//! downstream code (segmentation, physics, windowing) can rely on its shape
//! and spacing.
//!
//! Invariants & assumptions
//! ------------------------
//! - `samples.len() > 0`.
//! - `dt` is finite and strictly positive.
//! - Samples may be NaN/±inf: GWOSC files mark data gaps that way. Only the
//!   samples inside an extracted segment are screened, by the pipeline.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; sample `i` sits at time `i * dt` measured from the
//!   start of the series (not from any GPS epoch).
//! - [`StrainMeta`] is descriptive only and never affects the arithmetic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejected invariant.
use crate::strain::errors::{StrainError, StrainResult};
use ndarray::Array1;

/// `StrainSeries` — validated strain samples plus their uniform spacing.
///
/// Fields
/// ------
/// - `samples`: `Array1<f64>`
///   Dimensionless strain amplitudes; non-empty, possibly with NaN gaps.
/// - `dt`: `f64`
///   Sample spacing in seconds; finite and > 0.
/// - `meta`: [`StrainMeta`]
///   Optional provenance read from the file header.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainSeries {
    samples: Array1<f64>,
    dt: f64,
    meta: StrainMeta,
}

impl StrainSeries {
    /// Construct a validated [`StrainSeries`].
    ///
    /// Errors
    /// ------
    /// - `StrainError::EmptySeries` when `samples` is empty.
    /// - `StrainError::InvalidSpacing { dt }` when `dt` is not finite or ≤ 0.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_strainflux::strain::series::{StrainMeta, StrainSeries};
    /// let series = StrainSeries::new(array![1e-21, -2e-21], 1e-4, StrainMeta::default()).unwrap();
    /// assert_eq!(series.len(), 2);
    /// ```
    pub fn new(samples: Array1<f64>, dt: f64, meta: StrainMeta) -> StrainResult<Self> {
        if samples.is_empty() {
            return Err(StrainError::EmptySeries);
        }

        if !dt.is_finite() || dt <= 0.0 {
            return Err(StrainError::InvalidSpacing { dt });
        }

        Ok(StrainSeries { samples, dt, meta })
    }

    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn meta(&self) -> &StrainMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total covered duration `len * dt` in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.dt
    }
}

/// Provenance read from a strain file header, when available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrainMeta {
    /// GPS time of the first sample.
    pub gps_start: Option<f64>,
    /// Detector / channel label (e.g. "H1").
    pub detector: Option<String>,
}

impl StrainMeta {
    pub fn new(gps_start: Option<f64>, detector: Option<String>) -> StrainMeta {
        StrainMeta { gps_start, detector }
    }
}
