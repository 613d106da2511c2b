//! Experiment derivation models.
//!
//! Each model maps a [`MeasurementSet`] and its own configuration to an
//! experimental quantity and the matching theoretical prediction.
//!
//! # Models
//!
//! - [`InclinedPlaneGravity`] — g from acceleration along an incline
//! - [`RotationalEnergyConservation`] — k = h / L² from launch distances
//! - [`SimplePendulum`] — period from ten-oscillation timings
//!
//! # Rounding
//!
//! Every model carries the [`RoundingMode`] its representative values are
//! estimated with. The inclined-plane model defaults to
//! [`RoundingMode::Plain`], the other two to [`RoundingMode::Conservative`];
//! `with_rounding` overrides either.

mod incline;
mod pendulum;
mod rotational;

pub use incline::{InclineAngle, InclinedPlaneGravity};
pub use pendulum::{SimplePendulum, PERIODS_PER_READING};
pub use rotational::RotationalEnergyConservation;

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::measurement::MeasurementSet;
use crate::uncertainty::{RepresentativeValue, RoundingMode};

/// Standard gravitational acceleration used by every theoretical formula (m/s²).
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Which experiment a model implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentKind {
    InclinedPlaneGravity,
    RotationalEnergyConservation,
    SimplePendulum,
}

impl ExperimentKind {
    /// Human-readable experiment title.
    pub fn title(self) -> &'static str {
        match self {
            Self::InclinedPlaneGravity => "gravitational acceleration on an incline",
            Self::RotationalEnergyConservation => {
                "moment of inertia and conservation of mechanical energy"
            }
            Self::SimplePendulum => "simple pendulum period",
        }
    }

    /// Symbol of the derived quantity.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::InclinedPlaneGravity => "g",
            Self::RotationalEnergyConservation => "k",
            Self::SimplePendulum => "T",
        }
    }

    /// Unit of the derived quantity.
    pub fn unit(self) -> &'static str {
        match self {
            Self::InclinedPlaneGravity => "m/s²",
            Self::RotationalEnergyConservation => "1/m",
            Self::SimplePendulum => "s",
        }
    }

    /// Symbol of the quantity summarized in [`Derivation::primary`].
    pub fn measured_symbol(self) -> &'static str {
        match self {
            Self::InclinedPlaneGravity => "a",
            Self::RotationalEnergyConservation => "L",
            Self::SimplePendulum => "T",
        }
    }

    /// Unit of the quantity summarized in [`Derivation::primary`].
    pub fn measured_unit(self) -> &'static str {
        match self {
            Self::InclinedPlaneGravity => "m/s²",
            Self::RotationalEnergyConservation => "m",
            Self::SimplePendulum => "s",
        }
    }
}

/// Output of [`ExperimentModel::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Derivation {
    /// Representative value of the quantity the model summarizes first
    /// (acceleration, distance L, or single period T).
    pub primary: RepresentativeValue,
    /// Additional summary shown alongside the primary one (L² for the
    /// rotational experiment).
    pub secondary: Option<RepresentativeValue>,
    /// Quantity derived from the measurements.
    pub experimental: f64,
    /// Quantity predicted by the closed-form formula.
    pub theoretical: f64,
}

/// A per-experiment derivation model.
///
/// Implementors hold only their own configuration. Callers run
/// [`validate`](Self::validate) before [`derive`](Self::derive);
/// [`analyze`](crate::analysis::analyze) does this for them.
pub trait ExperimentModel {
    /// Which experiment this model implements.
    fn kind(&self) -> ExperimentKind;

    /// Rounding mode used for representative values.
    fn rounding(&self) -> RoundingMode;

    /// Checks the configuration against the model's domain.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidConfiguration`] describing the first
    /// out-of-domain parameter.
    fn validate(&self) -> Result<()>;

    /// Derives the experimental and theoretical quantities.
    fn derive(&self, readings: &MeasurementSet) -> Result<Derivation>;

    /// Formula for the experimental quantity, with configuration substituted.
    fn experimental_formula(&self) -> String;

    /// Formula for the theoretical quantity, with configuration substituted.
    fn theoretical_formula(&self) -> String;
}

pub(crate) fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfiguration(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfiguration(format!(
            "{name} must be > 0, got {value}"
        )))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfiguration(format!(
            "{name} must be >= 0, got {value}"
        )))
    }
}
