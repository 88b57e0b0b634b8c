//! strain::loader — reading strain series from GWOSC data files.
//!
//! Purpose
//! -------
//! Turn a file path into a validated [`StrainSeries`]. Two on-disk layouts
//! are understood:
//!
//! - **HDF5** (`.hdf5`, `.h5`, feature `hdf5`): the strain samples live in a
//!   one-dimensional dataset (default `strain/Strain`) carrying a scalar
//!   sample-spacing attribute (default `Xspacing`).
//! - **GWOSC ASCII** (any other extension): `#`-prefixed header lines followed
//!   by one sample per line. The spacing is taken from a
//!   `# This file has N samples per second` line, an explicit
//!   `# Xspacing = dt` line, or [`LoaderOptions::fallback_dt`].
//!
//! Key behaviors
//! -------------
//! - [`StrainSource`] is the seam between the pipeline and a concrete file
//!   format; [`load_strain`] dispatches on the file extension.
//! - File handles are scoped to a single `load` call and are released on
//!   every return path, including errors.
//! - All failures are reported as data-access [`StrainError`] variants; no
//!   retries are attempted.
//!
//! Testing notes
//! -------------
//! - The text reader is covered with temporary files (header variants,
//!   fallback spacing, malformed lines, missing file).
//! - The HDF5 reader is only compiled with the `hdf5` feature and needs a
//!   native HDF5 library; without it, HDF5 paths yield
//!   `StrainError::UnsupportedFormat`.
use crate::strain::{
    errors::{StrainError, StrainResult},
    series::{StrainMeta, StrainSeries},
};
use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::Path,
};

/// Default dataset path inside GWOSC HDF5 files.
pub const DEFAULT_DATASET: &str = "strain/Strain";

/// Default sample-spacing attribute attached to the strain dataset.
pub const DEFAULT_SPACING_ATTR: &str = "Xspacing";

/// A strain file reader.
///
/// Implementations open `path`, read the samples and their spacing, close
/// the file, and return a validated series.
pub trait StrainSource {
    fn load(&self, path: &Path) -> StrainResult<StrainSeries>;
}

/// Loader settings shared by every [`StrainSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Internal dataset path for HDF5 input.
    pub dataset: String,
    /// Name of the sample-spacing attribute for HDF5 input.
    pub spacing_attr: String,
    /// Spacing to use for text input whose header does not provide one.
    pub fallback_dt: Option<f64>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            dataset: DEFAULT_DATASET.to_string(),
            spacing_attr: DEFAULT_SPACING_ATTR.to_string(),
            fallback_dt: None,
        }
    }
}

/// On-disk layout of a strain file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrainFormat {
    Hdf5,
    GwoscText,
}

impl StrainFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> StrainFormat {
        match path.extension().and_then(|ext| ext.to_str()).map(|ext| ext.to_lowercase()) {
            Some(ext) if ext == "hdf5" || ext == "h5" => StrainFormat::Hdf5,
            _ => StrainFormat::GwoscText,
        }
    }
}

/// Load a strain series from `path`, choosing the reader by extension.
///
/// Errors
/// ------
/// - Any data-access [`StrainError`] raised by the selected reader.
/// - `StrainError::UnsupportedFormat` for HDF5 input when the crate was
///   built without the `hdf5` feature.
pub fn load_strain(path: &Path, options: &LoaderOptions) -> StrainResult<StrainSeries> {
    let format = StrainFormat::from_path(path);
    debug!("loading {} as {:?}", path.display(), format);

    let series = match format {
        StrainFormat::Hdf5 => hdf5_source(path, options)?.load(path)?,
        StrainFormat::GwoscText => GwoscTextSource::new(options.fallback_dt).load(path)?,
    };

    info!(
        "loaded {} samples from {} (dt = {:e} s, {:.3} s of data)",
        series.len(),
        path.display(),
        series.dt(),
        series.duration()
    );
    Ok(series)
}

#[cfg(feature = "hdf5")]
fn hdf5_source(_path: &Path, options: &LoaderOptions) -> StrainResult<Box<dyn StrainSource>> {
    Ok(Box::new(Hdf5Source::new(&options.dataset, &options.spacing_attr)))
}

#[cfg(not(feature = "hdf5"))]
fn hdf5_source(path: &Path, _options: &LoaderOptions) -> StrainResult<Box<dyn StrainSource>> {
    Err(StrainError::UnsupportedFormat {
        path: path.display().to_string(),
        reason: "HDF5 support is not compiled in; rebuild with `--features hdf5` or pass a \
                 GWOSC ASCII text file"
            .to_string(),
    })
}

/// Reader for GWOSC ASCII strain files.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GwoscTextSource {
    fallback_dt: Option<f64>,
}

impl GwoscTextSource {
    pub fn new(fallback_dt: Option<f64>) -> GwoscTextSource {
        GwoscTextSource { fallback_dt }
    }

    /// Parse the textual contents of a strain file.
    ///
    /// `path` is only used to label errors.
    pub fn parse(&self, path: &str, contents: &str) -> StrainResult<StrainSeries> {
        let mut header = TextHeader::default();
        let mut samples = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                header.absorb(comment.trim());
                continue;
            }
            let value: f64 = trimmed.parse().map_err(|_| StrainError::MalformedData {
                path: path.to_string(),
                reason: format!("line {}: cannot parse {:?} as a float", line_no + 1, trimmed),
            })?;
            samples.push(value);
        }

        let dt = header.dt.or(self.fallback_dt).ok_or_else(|| StrainError::MissingAttribute {
            path: path.to_string(),
            attribute: "samples per second".to_string(),
        })?;

        let meta = StrainMeta::new(header.gps_start, header.detector);
        StrainSeries::new(Array1::from(samples), dt, meta)
    }
}

impl StrainSource for GwoscTextSource {
    fn load(&self, path: &Path) -> StrainResult<StrainSeries> {
        let label = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StrainError::FileNotFound { path: label.clone() },
            _ => StrainError::Io { path: label.clone(), reason: err.to_string() },
        })?;
        self.parse(&label, &contents)
    }
}

/// Facts gathered from `#` header lines.
#[derive(Debug, Default)]
struct TextHeader {
    dt: Option<f64>,
    gps_start: Option<f64>,
    detector: Option<String>,
}

impl TextHeader {
    fn absorb(&mut self, comment: &str) {
        let words: Vec<&str> = comment.split_whitespace().collect();

        // "This file has 4096 samples per second"
        if let Some(pos) = words.windows(3).position(|w| w == ["samples", "per", "second"]) {
            if let Some(rate) = pos.checked_sub(1).and_then(|i| words[i].parse::<f64>().ok()) {
                if rate > 0.0 {
                    self.dt = Some(1.0 / rate);
                }
            }
        }

        // "Xspacing = 6.103515625e-05"
        if let Some((key, value)) = comment.split_once('=') {
            if key.trim().eq_ignore_ascii_case(DEFAULT_SPACING_ATTR) {
                if let Ok(dt) = value.trim().parse::<f64>() {
                    self.dt = Some(dt);
                }
            }
        }

        // "starting GPS 1126259447 duration 32"
        if let Some(pos) = words.windows(2).position(|w| w == ["starting", "GPS"]) {
            self.gps_start = words.get(pos + 2).and_then(|v| v.parse::<f64>().ok());
        }

        // "Gravitational wave strain for H1_LOSC_4_V1 for GPS ..."
        if let Some(pos) = words.windows(2).position(|w| w == ["strain", "for"]) {
            if let Some(channel) = words.get(pos + 2) {
                let detector = channel.split('_').next().unwrap_or(channel);
                self.detector = Some(detector.to_string());
            }
        }
    }
}

/// Reader for GWOSC HDF5 strain files.
#[cfg(feature = "hdf5")]
#[derive(Debug, Clone, PartialEq)]
pub struct Hdf5Source {
    dataset: String,
    spacing_attr: String,
}

#[cfg(feature = "hdf5")]
impl Hdf5Source {
    pub fn new(dataset: &str, spacing_attr: &str) -> Hdf5Source {
        Hdf5Source { dataset: dataset.to_string(), spacing_attr: spacing_attr.to_string() }
    }
}

#[cfg(feature = "hdf5")]
impl StrainSource for Hdf5Source {
    fn load(&self, path: &Path) -> StrainResult<StrainSeries> {
        let label = path.display().to_string();
        if !path.exists() {
            return Err(StrainError::FileNotFound { path: label });
        }

        // `file` is dropped (and closed) when this scope ends.
        let file = hdf5::File::open(path)
            .map_err(|err| StrainError::Io { path: label.clone(), reason: err.to_string() })?;

        let dataset = file.dataset(&self.dataset).map_err(|_| StrainError::MissingDataset {
            path: label.clone(),
            dataset: self.dataset.clone(),
        })?;
        let shape = dataset.shape();
        if shape.len() != 1 {
            return Err(StrainError::MalformedData {
                path: label,
                reason: format!("dataset '{}' has shape {shape:?}, expected 1-D", self.dataset),
            });
        }
        let samples: Vec<f64> = dataset.read_raw::<f64>().map_err(|err| {
            StrainError::MalformedData { path: label.clone(), reason: err.to_string() }
        })?;

        let attr = dataset.attr(&self.spacing_attr).map_err(|_| StrainError::MissingAttribute {
            path: label.clone(),
            attribute: self.spacing_attr.clone(),
        })?;
        let dt: f64 = attr.read_scalar::<f64>().map_err(|err| StrainError::MalformedData {
            path: label.clone(),
            reason: format!("attribute '{}': {err}", self.spacing_attr),
        })?;

        let gps_start = file
            .dataset("meta/GPSstart")
            .and_then(|ds| ds.read_scalar::<i64>())
            .ok()
            .map(|gps| gps as f64);

        StrainSeries::new(Array1::from(samples), dt, StrainMeta::new(gps_start, None))
    }
}


#[cfg(all(test, feature = "hdf5"))]
mod hdf5_tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // `Hdf5Source` over files written with the same crate in a temp dir:
    // - GWOSC layout with `strain/Strain`, `Xspacing` and `meta/GPSstart`.
    // - Missing dataset, missing spacing attribute, 2-D strain dataset.
    // -------------------------------------------------------------------------

    const SAMPLES: [f64; 4] = [1.0e-21, -2.0e-21, 1.5e-21, 0.0];

    fn write_gwosc_layout(path: &Path, with_spacing: bool) {
        let file = hdf5::File::create(path).unwrap();
        let strain = file.create_group("strain").unwrap();
        let dataset = strain.new_dataset_builder().with_data(&SAMPLES[..]).create("Strain").unwrap();
        if with_spacing {
            dataset
                .new_attr::<f64>()
                .shape(())
                .create("Xspacing")
                .unwrap()
                .write_scalar(&(1.0 / 4096.0))
                .unwrap();
        }
        file.create_group("meta")
            .unwrap()
            .new_dataset::<i64>()
            .shape(())
            .create("GPSstart")
            .unwrap()
            .write_scalar(&1_126_259_447_i64)
            .unwrap();
    }

    #[test]
    // Purpose
    // -------
    // Read a GWOSC-layout file through `load_strain`.
    //
    // Expect
    // ------
    // - Samples in file order, `dt = 1/4096`, GPS start from `meta/GPSstart`.
    fn load_strain_reads_gwosc_hdf5() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("H-H1_GWOSC_4KHZ_R1-1126259447-32.hdf5");
        write_gwosc_layout(&path, true);

        let series = load_strain(&path, &LoaderOptions::default()).unwrap();

        assert_eq!(series.samples().to_vec(), SAMPLES.to_vec());
        assert_eq!(series.dt(), 1.0 / 4096.0);
        assert_eq!(series.meta().gps_start, Some(1_126_259_447.0));
    }

    #[test]
    // Purpose
    // -------
    // A file without the configured dataset reports `MissingDataset`.
    fn missing_dataset_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.h5");
        hdf5::File::create(&path).unwrap().create_group("strain").unwrap();

        let err = load_strain(&path, &LoaderOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            StrainError::MissingDataset { ref dataset, .. } if dataset == "strain/Strain"
        ));
    }

    #[test]
    // Purpose
    // -------
    // A strain dataset without `Xspacing` reports `MissingAttribute`.
    fn missing_spacing_attribute_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_spacing.hdf5");
        write_gwosc_layout(&path, false);

        let err = load_strain(&path, &LoaderOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            StrainError::MissingAttribute { ref attribute, .. } if attribute == "Xspacing"
        ));
    }

    #[test]
    // Purpose
    // -------
    // A 2-D strain dataset is rejected instead of being flattened.
    //
    // Given
    // -----
    // - `strain/Strain` of shape (2, 3) with a valid `Xspacing`.
    //
    // Expect
    // ------
    // - `StrainError::MalformedData` mentioning the shape.
    fn two_dimensional_dataset_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.hdf5");
        {
            let file = hdf5::File::create(&path).unwrap();
            let dataset = file
                .create_group("strain")
                .unwrap()
                .new_dataset::<f64>()
                .shape((2, 3))
                .create("Strain")
                .unwrap();
            dataset.write_raw(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0][..]).unwrap();
            dataset
                .new_attr::<f64>()
                .shape(())
                .create("Xspacing")
                .unwrap()
                .write_scalar(&0.25)
                .unwrap();
        }

        let err = load_strain(&path, &LoaderOptions::default()).unwrap_err();

        assert!(matches!(err, StrainError::MalformedData { ref reason, .. } if reason.contains("[2, 3]")));
    }
}
