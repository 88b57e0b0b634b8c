//! analysis — time-resolved and spectral views of a strain segment.
//!
//! Purpose
//! -------
//! Build the series that feed the plots: the sliding-window entropy flux
//! and information force ([`sliding`]) and the band-limited amplitude
//! spectrum ([`spectrum`]).
//!
//! Conventions
//! -----------
//! - Inputs are validated [`Segment`](crate::strain::Segment)s or sample
//!   views; failures are reported as [`AnalysisError`].
//! - Everything here is deterministic and free of I/O.

pub mod errors;
pub mod sliding;
pub mod spectrum;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{AnalysisError, AnalysisResult};
pub use self::sliding::{
    EdgePolicy, WindowOptions, WindowSeriesResult, sliding_window, window_count,
};
pub use self::spectrum::{
    AmplitudeSpectrum, DEFAULT_MAX_FREQUENCY, amplitude_spectrum, rfft_frequencies,
};
