//! Moment of inertia and conservation of mechanical energy.
//!
//! # Model
//!
//! A ball rolls down a track from drop height `h`, leaves a table of height
//! `H`, and lands a horizontal distance `L` away. Energy conservation for a
//! rolling ball predicts `h / L² = k` with
//!
//! ```text
//! k_theory = 1 / (4H)
//! ```
//!
//! The experimental k averages the ratio per reading,
//!
//! ```text
//! k = mean(h / L_i²)
//! ```
//!
//! which differs from `h / mean(L)²`. Representative values of L and L² are
//! reported for display only.

use u_numflow::stats;

use crate::error::{AnalysisError, Result};
use crate::measurement::MeasurementSet;
use crate::uncertainty::RoundingMode;

use super::{
    require_non_negative, require_positive, Derivation, ExperimentKind, ExperimentModel,
};

/// Rotational energy conservation experiment.
///
/// # Examples
///
/// ```
/// use u_labanalysis::measurement::MeasurementSet;
/// use u_labanalysis::model::{ExperimentModel, RotationalEnergyConservation};
///
/// let model = RotationalEnergyConservation::new(0.5, 0.5);
/// let readings = MeasurementSet::from_sentinel_readings(&[1.0, 1.0]).unwrap();
///
/// let d = model.derive(&readings).unwrap();
/// assert!((d.experimental - 0.5).abs() < 1e-12);
/// assert!((d.theoretical - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationalEnergyConservation {
    drop_height: f64,
    reference_height: f64,
    rounding: RoundingMode,
}

impl RotationalEnergyConservation {
    /// Creates a model for drop height `h` and table height `H`, in metres.
    pub fn new(drop_height: f64, reference_height: f64) -> Self {
        Self {
            drop_height,
            reference_height,
            rounding: RoundingMode::Conservative,
        }
    }

    /// Overrides the rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Drop height `h` (m).
    pub fn drop_height(&self) -> f64 {
        self.drop_height
    }

    /// Reference height `H` (m).
    pub fn reference_height(&self) -> f64 {
        self.reference_height
    }

    /// `1 / (4H)`, or `0.0` when `H` is zero.
    ///
    /// A zero prediction is reported as degenerate by
    /// [`percent_error`](crate::error_analysis::percent_error).
    pub fn theoretical_k(&self) -> f64 {
        if self.reference_height == 0.0 {
            log::warn!("reference height H is zero, k_theory = 1/(4H) is undefined");
            return 0.0;
        }
        1.0 / (4.0 * self.reference_height)
    }
}

impl ExperimentModel for RotationalEnergyConservation {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::RotationalEnergyConservation
    }

    fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    fn validate(&self) -> Result<()> {
        require_positive("drop height h", self.drop_height)?;
        require_non_negative("reference height H", self.reference_height)
    }

    fn derive(&self, readings: &MeasurementSet) -> Result<Derivation> {
        let distance = readings.estimate(self.rounding)?;
        let distance_squared = readings.map(|l| l * l)?.estimate(self.rounding)?;

        let mut ratios = Vec::with_capacity(readings.len());
        for (index, &l) in readings.values().iter().enumerate() {
            let ratio = self.drop_height / (l * l);
            if !ratio.is_finite() {
                return Err(AnalysisError::InvalidReading { index, value: l });
            }
            ratios.push(ratio);
        }
        let experimental = stats::mean(&ratios).ok_or_else(|| {
            AnalysisError::Numerical("mean of h / L² is undefined".to_string())
        })?;

        Ok(Derivation {
            primary: distance,
            secondary: Some(distance_squared),
            experimental,
            theoretical: self.theoretical_k(),
        })
    }

    fn experimental_formula(&self) -> String {
        format!("k = mean({} / L²)", self.drop_height)
    }

    fn theoretical_formula(&self) -> String {
        format!("k = 1 / (4 × {})", self.reference_height)
    }
}
