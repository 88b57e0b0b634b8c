//! physics::validation — detection of non-finite computed quantities.
//!
//! Purpose
//! -------
//! Extreme inputs (e.g. tiny or huge masses) can make the formulas overflow
//! or underflow to NaN/±inf. Rather than letting such values flow silently
//! into the report, every computed quantity can be screened here and the
//! configured [`NonFinitePolicy`] applied.
//!
//! Conventions
//! -----------
//! - Quantities are identified by a short name (`"hawking_temperature"`,
//!   `"entropy_flux[12]"`) used in warnings and in
//!   [`PhysicsError::NonFiniteResult`].
//! - `Warn` is the default policy: each offender is logged with
//!   `log::warn!` and the run continues.
use crate::physics::errors::{PhysicsError, PhysicsResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when a computed quantity is NaN or ±inf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonFinitePolicy {
    /// Log a warning per offending quantity and continue.
    #[default]
    Warn,
    /// Fail with [`PhysicsError::NonFiniteResult`] on the first offender.
    Error,
    /// Accept silently.
    Ignore,
}

impl FromStr for NonFinitePolicy {
    type Err = PhysicsError;

    /// Parse a policy name (case-insensitive): `warn`, `error`, `ignore`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(NonFinitePolicy::Warn),
            "error" => Ok(NonFinitePolicy::Error),
            "ignore" => Ok(NonFinitePolicy::Ignore),
            other => Err(PhysicsError::InvalidPolicy { name: other.to_string() }),
        }
    }
}

/// Return `value` if finite, else `PhysicsError::NonFiniteResult`.
pub fn check_finite(quantity: &str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFiniteResult { quantity: quantity.to_string(), value })
    }
}

/// Collect the `(name, value)` pairs that are not finite.
pub fn non_finite_quantities<'a, I>(quantities: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    quantities
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Apply `policy` to `offenders`.
///
/// Returns the number of offenders seen. Under `Error`, the first offender
/// is returned as an error instead.
pub fn enforce_policy(policy: NonFinitePolicy, offenders: &[(String, f64)]) -> PhysicsResult<usize> {
    match policy {
        NonFinitePolicy::Ignore => Ok(offenders.len()),
        NonFinitePolicy::Warn => {
            for (quantity, value) in offenders {
                warn!("computed {quantity} is non-finite: {value}");
            }
            Ok(offenders.len())
        }
        NonFinitePolicy::Error => match offenders.first() {
            Some((quantity, value)) => {
                Err(PhysicsError::NonFiniteResult { quantity: quantity.clone(), value: *value })
            }
            None => Ok(0),
        },
    }
}
