//! strain — input side of the analysis: loading and segmenting strain data.
//!
//! Purpose
//! -------
//! Collect everything between a file on disk and a validated, time-windowed
//! [`Segment`]: the [`StrainSeries`] container, the [`StrainSource`] readers,
//! the [`extract_segment`] slicer, and the shared [`StrainError`] type.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every series handed out by this subtree is non-empty and has a finite
//!   positive spacing. Samples may contain NaN gaps; see
//!   [`Segment::non_finite_samples`].
//! - Every segment handed out by this subtree is non-empty; an empty window
//!   is always an error.
//!
//! Conventions
//! -----------
//! - Times are in seconds from the first sample of the full series.
//! - This subtree performs file I/O only inside [`loader`]; [`series`] and
//!   [`segment`] are pure.

pub mod errors;
pub mod loader;
pub mod segment;
pub mod series;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{StrainError, StrainResult};
pub use self::loader::{GwoscTextSource, LoaderOptions, StrainFormat, StrainSource, load_strain};
pub use self::segment::{Segment, TimeWindow, extract_segment, extract_segment_between};
pub use self::series::{StrainMeta, StrainSeries};

#[cfg(feature = "hdf5")]
pub use self::loader::Hdf5Source;
