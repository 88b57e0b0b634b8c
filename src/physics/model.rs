//! physics::model — closed-form energy, temperature, entropy and force formulas.
//!
//! Purpose
//! -------
//! Implement the four stateless formulas of the model plus the two derived
//! scalars. They are defined transforms, not physically rigorous results,
//! and are evaluated exactly as written:
//!
//! - `energy_dissipation(x, dt)   = dt · Σ xᵢ²`
//! - `hawking_temperature(M)      = h·c³ / (8π·G·M·k_B)`
//! - `entropy_flux(E, T)          = E / T`
//! - `information_force(v, φ, M)  = h·c·v·φ / (8π·G·M·k_B)`
//! - `pressure(F, v)              = F / v`
//! - `energy_flow_rate(T, φ)      = T · φ`
//!
//! Invariants & assumptions
//! ------------------------
//! - `energy_dissipation` is non-negative for any finite input and `dt > 0`.
//! - With positive constants and mass the temperature is positive, so
//!   `entropy_flux` never divides by zero; overflow/underflow for extreme
//!   inputs is surfaced by [`crate::physics::validation`], not here.
//!
//! Conventions
//! -----------
//! - Constants are passed explicitly via [`PhysicalConstants`]; there is no
//!   global state.
use crate::physics::constants::PhysicalConstants;
use ndarray::ArrayView1;

/// Time-integrated squared amplitude `dt · Σ xᵢ²`.
///
/// ```rust
/// # use ndarray::array;
/// # use rust_strainflux::physics::model::energy_dissipation;
/// let e = energy_dissipation(array![1.0, -2.0].view(), 0.5);
/// assert_eq!(e, 2.5);
/// ```
pub fn energy_dissipation(samples: ArrayView1<'_, f64>, dt: f64) -> f64 {
    samples.iter().map(|x| x * x).sum::<f64>() * dt
}

/// `h·c³ / (8π·G·M·k_B)` in kelvin.
pub fn hawking_temperature(constants: &PhysicalConstants, mass: f64) -> f64 {
    (constants.h * constants.c.powi(3)) / constants.horizon_denominator(mass)
}

/// Energy-dissipation proxy divided by temperature.
pub fn entropy_flux(energy_dissipation: f64, temperature: f64) -> f64 {
    energy_dissipation / temperature
}

/// `h·c·v·φ_s / (8π·G·M·k_B)` in newtons.
pub fn information_force(
    constants: &PhysicalConstants, velocity: f64, entropy_flux: f64, mass: f64,
) -> f64 {
    let numerator = constants.h * constants.c * velocity * entropy_flux;
    numerator / constants.horizon_denominator(mass)
}

/// Information force per unit carrier velocity.
pub fn pressure(information_force: f64, velocity: f64) -> f64 {
    information_force / velocity
}

/// Temperature times entropy flux.
pub fn energy_flow_rate(temperature: f64, entropy_flux: f64) -> f64 {
    temperature * entropy_flux
}
