//! Gravitational acceleration from a cart on an incline.
//!
//! # Model
//!
//! A frictionless cart on an incline of angle θ accelerates at
//!
//! ```text
//! a = g · sin θ   ⇒   g = a / sin θ
//! ```
//!
//! The measured accelerations are summarized into `a ± u`, and the derived g
//! is compared with [`STANDARD_GRAVITY`].

use crate::error::{AnalysisError, Result};
use crate::measurement::MeasurementSet;
use crate::uncertainty::RoundingMode;

use super::{require_finite, Derivation, ExperimentKind, ExperimentModel, STANDARD_GRAVITY};

/// Incline angles the lab track can be set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclineAngle {
    Deg10,
    Deg20,
    Deg30,
}

impl InclineAngle {
    /// Every supported angle, in ascending order.
    pub const ALL: [Self; 3] = [Self::Deg10, Self::Deg20, Self::Deg30];

    /// The angle in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Self::Deg10 => 10.0,
            Self::Deg20 => 20.0,
            Self::Deg30 => 30.0,
        }
    }

    /// Looks up a supported angle. `None` for anything outside the set.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.degrees() == degrees)
    }
}

/// Inclined-plane gravity experiment.
///
/// # Examples
///
/// ```
/// use u_labanalysis::measurement::MeasurementSet;
/// use u_labanalysis::model::{ExperimentModel, InclineAngle, InclinedPlaneGravity};
///
/// let model = InclinedPlaneGravity::with_angle(InclineAngle::Deg30);
/// let readings = MeasurementSet::from_sentinel_readings(&[4.90, 4.91, 4.89, 4.90, 4.90]).unwrap();
///
/// let d = model.derive(&readings).unwrap();
/// assert!((d.experimental - 9.80).abs() < 1e-9);
/// assert_eq!(d.theoretical, 9.81);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclinedPlaneGravity {
    angle_degrees: f64,
    rounding: RoundingMode,
}

impl InclinedPlaneGravity {
    /// Creates a model for an arbitrary incline angle in degrees.
    ///
    /// The angle is checked by [`validate`](ExperimentModel::validate), not
    /// here.
    pub fn new(angle_degrees: f64) -> Self {
        Self {
            angle_degrees,
            rounding: RoundingMode::Plain,
        }
    }

    /// Creates a model for one of the supported track angles.
    pub fn with_angle(angle: InclineAngle) -> Self {
        Self::new(angle.degrees())
    }

    /// Overrides the rounding mode.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// The incline angle in degrees.
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Whether the angle is one the track supports.
    pub fn is_supported_angle(&self) -> bool {
        InclineAngle::from_degrees(self.angle_degrees).is_some()
    }
}

impl ExperimentModel for InclinedPlaneGravity {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::InclinedPlaneGravity
    }

    fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    fn validate(&self) -> Result<()> {
        require_finite("incline angle", self.angle_degrees)?;
        if self.angle_degrees <= 0.0 || self.angle_degrees > 90.0 {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "incline angle must be in (0, 90] degrees, got {}",
                self.angle_degrees
            )));
        }
        if !self.is_supported_angle() {
            log::debug!(
                "incline angle {}° is outside the track's preset angles",
                self.angle_degrees
            );
        }
        Ok(())
    }

    fn derive(&self, readings: &MeasurementSet) -> Result<Derivation> {
        let sin_theta = self.angle_degrees.to_radians().sin();
        if sin_theta == 0.0 || !sin_theta.is_finite() {
            return Err(AnalysisError::DegenerateTheoreticalValue {
                quantity: "sin(angle)",
            });
        }

        let acceleration = readings.estimate(self.rounding)?;
        Ok(Derivation {
            primary: acceleration,
            secondary: None,
            experimental: acceleration.value / sin_theta,
            theoretical: STANDARD_GRAVITY,
        })
    }

    fn experimental_formula(&self) -> String {
        format!("g = a / sin({}°)", self.angle_degrees)
    }

    fn theoretical_formula(&self) -> String {
        format!("g = {STANDARD_GRAVITY}")
    }
}
