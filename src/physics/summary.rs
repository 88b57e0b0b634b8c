//! physics::summary — full-segment summary scalars.
//!
//! Purpose
//! -------
//! Evaluate the physics model once over an entire segment and keep the six
//! reported scalars together in [`SummaryResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `pressure == information_force / velocity` and
//!   `energy_flow_rate == hawking_temperature * entropy_flux` hold exactly:
//!   both are computed from the stored fields, never along a separate path.
use crate::{
    physics::{
        constants::{ModelParameters, PhysicalConstants},
        model,
    },
    strain::segment::Segment,
};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// The six summary scalars of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// `dt · Σ xᵢ²` over the segment (J, nominal).
    pub energy_dissipation: f64,
    /// Hawking temperature for the configured mass (K).
    pub hawking_temperature: f64,
    /// Energy dissipation / temperature (J/K/s, nominal).
    pub entropy_flux: f64,
    /// Information force (N).
    pub information_force: f64,
    /// Information force / velocity (Pa, nominal).
    pub pressure: f64,
    /// Temperature · entropy flux (W, nominal).
    pub energy_flow_rate: f64,
}

impl SummaryResult {
    /// Evaluate the summary over raw samples with spacing `dt`.
    pub fn compute(
        samples: ArrayView1<'_, f64>, dt: f64, constants: &PhysicalConstants,
        params: &ModelParameters,
    ) -> SummaryResult {
        let energy_dissipation = model::energy_dissipation(samples, dt);
        let hawking_temperature = model::hawking_temperature(constants, params.mass);
        let entropy_flux = model::entropy_flux(energy_dissipation, hawking_temperature);
        let information_force =
            model::information_force(constants, params.velocity, entropy_flux, params.mass);

        SummaryResult {
            energy_dissipation,
            hawking_temperature,
            entropy_flux,
            information_force,
            pressure: model::pressure(information_force, params.velocity),
            energy_flow_rate: model::energy_flow_rate(hawking_temperature, entropy_flux),
        }
    }

    /// Evaluate the summary over a whole [`Segment`].
    pub fn from_segment(
        segment: &Segment, constants: &PhysicalConstants, params: &ModelParameters,
    ) -> SummaryResult {
        SummaryResult::compute(segment.samples().view(), segment.dt(), constants, params)
    }

    /// `(name, value)` pairs in report order.
    pub fn quantities(&self) -> [(&'static str, f64); 6] {
        [
            ("energy_dissipation", self.energy_dissipation),
            ("hawking_temperature", self.hawking_temperature),
            ("entropy_flux", self.entropy_flux),
            ("information_force", self.information_force),
            ("pressure", self.pressure),
            ("energy_flow_rate", self.energy_flow_rate),
        ]
    }

    /// `true` when every scalar is finite.
    pub fn is_finite(&self) -> bool {
        self.quantities().iter().all(|(_, value)| value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strain::{StrainMeta, StrainSeries, extract_segment_between};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify the derived scalars equal the quotient/product of the stored
    // fields bit for bit, for several masses and velocities.
    fn derived_scalars_are_consistent() {
        let constants = PhysicalConstants::default();
        let samples = array![3e-21, -1e-21, 2e-21, 4e-22];

        for (mass, velocity) in [(1e30, 1e8), (5e31, 2.5e7), (1e24, 3e8)] {
            let params = ModelParameters::new(mass, velocity).unwrap();
            let summary = SummaryResult::compute(samples.view(), 2.5e-4, &constants, &params);

            assert_eq!(summary.pressure, summary.information_force / velocity);
            assert_eq!(
                summary.energy_flow_rate,
                summary.hawking_temperature * summary.entropy_flux
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // End-to-end reference scenario through a segment covering the whole
    // series.
    //
    // Given
    // -----
    // - x = [1e-21, -2e-21, 1.5e-21, 0, -1e-21], dt = 1e-4, window [0, 5e-4).
    //
    // Expect
    // ------
    // - The segment equals the whole series and the summary matches the
    //   precomputed literals.
    fn from_segment_matches_reference_scenario() {
        let samples = array![1e-21, -2e-21, 1.5e-21, 0.0, -1e-21];
        let series = StrainSeries::new(samples.clone(), 1e-4, StrainMeta::default()).unwrap();
        let segment = extract_segment_between(&series, 0.0, 5e-4).unwrap();
        assert_eq!(segment.samples(), &samples);

        let summary = SummaryResult::from_segment(
            &segment,
            &PhysicalConstants::default(),
            &ModelParameters::default(),
        );

        assert_relative_eq!(summary.energy_dissipation, 8.25e-46, max_relative = 1e-9);
        assert_relative_eq!(summary.hawking_temperature, 7.724865518517259e-07, max_relative = 1e-9);
        assert_relative_eq!(summary.entropy_flux, 1.0679797570875431e-39, max_relative = 1e-9);
        assert_relative_eq!(summary.information_force, 9.166666666666665e-55, max_relative = 1e-9);
        assert_relative_eq!(summary.pressure, 9.166666666666665e-63, max_relative = 1e-9);
        assert_relative_eq!(summary.energy_flow_rate, 8.25e-46, max_relative = 1e-9);
        assert!(summary.is_finite());
    }
}
