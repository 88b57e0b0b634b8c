//! report::text — console summary formatting.
//!
//! Purpose
//! -------
//! Render a [`SummaryResult`] as the fixed six-line report, each value in
//! scientific notation with four digits after the decimal point and a signed,
//! at-least-two-digit exponent (`7.7249e-07`).
use crate::physics::summary::SummaryResult;
use std::io::{self, Write};

/// Report header line.
pub const SUMMARY_HEADER: &str = "=== Summary of Results ===";

/// Labels in report order, aligned with [`SummaryResult::quantities`].
pub const SUMMARY_LABELS: [&str; 6] = [
    "Energy Dissipation (J)",
    "Hawking Temperature (K)",
    "Entropy Flux (J/K/s)",
    "Information Force (N)",
    "Pressure (Pa)",
    "Energy Flow Rate (W)",
];

/// Format `value` as `d.dddde±XX` with `precision` fractional digits.
///
/// Non-finite values print as `nan`, `inf` or `-inf`.
///
/// ```rust
/// # use rust_strainflux::report::format_sci;
/// assert_eq!(format_sci(7.724865518517259e-07, 4), "7.7249e-07");
/// assert_eq!(format_sci(12345.0, 4), "1.2345e+04");
/// ```
pub fn format_sci(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

/// The full summary block, preceded by a blank line.
pub fn format_summary(summary: &SummaryResult) -> String {
    let mut out = format!("\n{SUMMARY_HEADER}\n");
    for (label, (_, value)) in SUMMARY_LABELS.iter().zip(summary.quantities()) {
        out.push_str(&format!("{label}: {}\n", format_sci(value, 4)));
    }
    out
}

/// Write [`format_summary`] to `writer`.
pub fn write_summary<W: Write>(writer: &mut W, summary: &SummaryResult) -> io::Result<()> {
    writer.write_all(format_summary(summary).as_bytes())?;
    writer.flush()
}
