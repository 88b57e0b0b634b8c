//! physics::constants — physical constants and per-run scenario inputs.
//!
//! Purpose
//! -------
//! Hold the fixed constant set {h, c, G, k_B} and the scenario inputs
//! {M, v} as immutable values passed explicitly into every formula, so
//! tests can vary them freely.
//!
//! Conventions
//! -----------
//! - SI units throughout: J·s, m/s, m³·kg⁻¹·s⁻², J/K, kg.
//! - `c` defaults to the rounded `3e8` m/s used by the reference run, not the
//!   exact SI value.
use crate::physics::errors::{PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Planck constant (J·s).
pub const PLANCK: f64 = 6.62607015e-34;
/// Speed of light (m/s), rounded.
pub const SPEED_OF_LIGHT: f64 = 3e8;
/// Gravitational constant (m³·kg⁻¹·s⁻²).
pub const GRAVITATIONAL: f64 = 6.67430e-11;
/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Default black-hole mass (kg).
pub const DEFAULT_MASS: f64 = 1e30;
/// Default information/entropy carrier velocity (m/s).
pub const DEFAULT_VELOCITY: f64 = 1e8;

/// The constant set {h, c, G, k_B}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Planck constant h.
    pub h: f64,
    /// Speed of light c.
    pub c: f64,
    /// Gravitational constant G.
    #[serde(rename = "G", alias = "g")]
    pub g: f64,
    /// Boltzmann constant k_B.
    pub k_b: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants { h: PLANCK, c: SPEED_OF_LIGHT, g: GRAVITATIONAL, k_b: BOLTZMANN }
    }
}

impl PhysicalConstants {
    /// Reject non-finite or non-positive constants.
    pub fn validate(&self) -> PhysicsResult<()> {
        positive("h", self.h)?;
        positive("c", self.c)?;
        positive("G", self.g)?;
        positive("k_B", self.k_b)?;
        Ok(())
    }

    /// Shared denominator `8π·G·M·k_B`, evaluated left to right.
    pub fn horizon_denominator(&self, mass: f64) -> f64 {
        8.0 * PI * self.g * mass * self.k_b
    }
}

/// Scenario inputs fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Black-hole mass M (kg).
    pub mass: f64,
    /// Carrier velocity v (m/s).
    pub velocity: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters { mass: DEFAULT_MASS, velocity: DEFAULT_VELOCITY }
    }
}

impl ModelParameters {
    /// Construct validated parameters.
    ///
    /// Errors
    /// ------
    /// - `PhysicsError::InvalidParameter` when `mass` or `velocity` is
    ///   non-finite or ≤ 0.
    pub fn new(mass: f64, velocity: f64) -> PhysicsResult<ModelParameters> {
        let params = ModelParameters { mass, velocity };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        positive("mass", self.mass)?;
        positive("velocity", self.velocity)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> PhysicsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter { name, value })
    }
}
