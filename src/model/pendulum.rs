//! Simple pendulum period.
//!
//! # Model
//!
//! Each reading is the time for ten full oscillations, which averages out
//! stopwatch reaction time. The single-period values are
//! `T_i = reading_i / 10`, summarized into `T ± u` and compared with the
//! small-angle prediction
//!
//! ```text
//! T_theory = 2π √(l / g)
//! ```
//!
//! Amplitude and bob mass are recorded with the configuration but do not
//! enter the small-angle formula.

use std::f64::consts::PI;

use crate::error::Result;
use crate::measurement::MeasurementSet;
use crate::uncertainty::RoundingMode;

use super::{
    require_non_negative, require_positive, Derivation, ExperimentKind, ExperimentModel,
    STANDARD_GRAVITY,
};

/// Oscillations timed per reading.
pub const PERIODS_PER_READING: f64 = 10.0;

/// Simple pendulum experiment.
///
/// # Examples
///
/// ```
/// use u_labanalysis::measurement::MeasurementSet;
/// use u_labanalysis::model::{ExperimentModel, SimplePendulum};
///
/// let model = SimplePendulum::new(1.0, 5.0, 0.1);
/// let readings = MeasurementSet::from_sentinel_readings(&[20.0, 20.1, 19.9, 20.0, 20.0]).unwrap();
///
/// let d = model.derive(&readings).unwrap();
/// assert!((d.experimental - 2.0).abs() < 1e-9);
/// assert!((d.theoretical - 2.0061).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplePendulum {
    length: f64,
    amplitude_degrees: f64,
    bob_mass: f64,
    rounding: RoundingMode,
}

impl SimplePendulum {
    /// Creates a model for a pendulum of `length` (m) released at
    /// `amplitude_degrees` with a bob of `bob_mass` (kg).
    pub fn new(length: f64, amplitude_degrees: f64, bob_mass: f64) -> Self {
        Self {
            length,
            amplitude_degrees,
            bob_mass,
            rounding: RoundingMode::Conservative,
        }
    }

    /// Overrides the rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Pendulum length `l` (m).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Release amplitude (degrees). Not used by the small-angle formula.
    pub fn amplitude_degrees(&self) -> f64 {
        self.amplitude_degrees
    }

    /// Bob mass (kg). Not used by the small-angle formula.
    pub fn bob_mass(&self) -> f64 {
        self.bob_mass
    }

    /// `2π √(l / g)`.
    pub fn theoretical_period(&self) -> f64 {
        2.0 * PI * (self.length / STANDARD_GRAVITY).sqrt()
    }
}

impl ExperimentModel for SimplePendulum {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::SimplePendulum
    }

    fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    fn validate(&self) -> Result<()> {
        require_positive("pendulum length l", self.length)?;
        require_non_negative("amplitude", self.amplitude_degrees)?;
        require_positive("bob mass", self.bob_mass)
    }

    fn derive(&self, readings: &MeasurementSet) -> Result<Derivation> {
        let periods = readings.map(|ten| ten / PERIODS_PER_READING)?;
        let period = periods.estimate(self.rounding)?;

        Ok(Derivation {
            primary: period,
            secondary: None,
            experimental: period.value,
            theoretical: self.theoretical_period(),
        })
    }

    fn experimental_formula(&self) -> String {
        format!("T = mean(10T / {PERIODS_PER_READING})")
    }

    fn theoretical_formula(&self) -> String {
        format!("T = 2π √({} / {STANDARD_GRAVITY})", self.length)
    }
}
