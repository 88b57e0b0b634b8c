//! physics — constants, closed-form model formulas, and summary scalars.
//!
//! Purpose
//! -------
//! Keep the arithmetic of the analysis pure and independently testable:
//! [`constants`] holds the inputs, [`model`] the formulas, [`summary`] the
//! once-per-run evaluation, and [`validation`] the non-finite screening.
//!
//! Conventions
//! -----------
//! - No I/O; the only side effect is `log::warn!` under
//!   [`NonFinitePolicy::Warn`].
//! - Formulas are literal transforms and must not be "corrected" toward any
//!   established physical theory.

pub mod constants;
pub mod errors;
pub mod model;
pub mod summary;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::constants::{ModelParameters, PhysicalConstants};
pub use self::errors::{PhysicsError, PhysicsResult};
pub use self::model::{
    energy_dissipation, energy_flow_rate, entropy_flux, hawking_temperature, information_force,
    pressure,
};
pub use self::summary::SummaryResult;
pub use self::validation::{NonFinitePolicy, check_finite, enforce_policy, non_finite_quantities};
