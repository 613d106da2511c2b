//! End-to-end analysis of one experiment run.
//!
//! A run is an immutable value: the experiment configuration plus the
//! readings column exactly as it was entered. [`analyze`] turns it into an
//! [`ExperimentResult`]:
//!
//! 1. validate the model configuration
//! 2. drop unset rows and check that at least one reading remains
//! 3. derive the experimental and theoretical quantities
//! 4. compute the percent error
//!
//! # Examples
//!
//! ```
//! use u_labanalysis::analysis::ExperimentRun;
//!
//! let run = ExperimentRun::from_json(r#"{
//!     "config": { "experiment": "simple_pendulum", "length": 1.0 },
//!     "readings": [20.0, 20.1, 19.9, 20.0, 20.0, null]
//! }"#).unwrap();
//!
//! let result = run.analyze().unwrap();
//! assert!((result.experimental - 2.0).abs() < 1e-9);
//! assert!(result.percent_error < 0.5);
//! println!("{result}");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::error_analysis::percent_error;
use crate::measurement::{entries_from_sentinel, MeasurementSet};
use crate::model::{
    ExperimentKind, ExperimentModel, InclineAngle, InclinedPlaneGravity,
    RotationalEnergyConservation, SimplePendulum,
};
use crate::uncertainty::{RepresentativeValue, RoundingMode};

/// Serializable configuration for one of the three experiments.
///
/// `rounding` overrides the experiment's default [`RoundingMode`] when set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "experiment", rename_all = "snake_case")]
pub enum ExperimentConfig {
    InclinedPlane {
        angle_degrees: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rounding: Option<RoundingMode>,
    },
    RotationalEnergy {
        drop_height: f64,
        reference_height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rounding: Option<RoundingMode>,
    },
    SimplePendulum {
        length: f64,
        #[serde(default = "default_amplitude")]
        amplitude_degrees: f64,
        #[serde(default = "default_bob_mass")]
        bob_mass: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rounding: Option<RoundingMode>,
    },
}

fn default_amplitude() -> f64 {
    5.0
}

fn default_bob_mass() -> f64 {
    0.1
}

impl ExperimentConfig {
    /// The lab form's initial values for `kind`.
    ///
    /// Incline 10°; h = H = 0.5 m; l = 1.0 m, amplitude 5°, mass 0.1 kg.
    pub fn defaults(kind: ExperimentKind) -> Self {
        match kind {
            ExperimentKind::InclinedPlaneGravity => Self::InclinedPlane {
                angle_degrees: InclineAngle::Deg10.degrees(),
                rounding: None,
            },
            ExperimentKind::RotationalEnergyConservation => Self::RotationalEnergy {
                drop_height: 0.5,
                reference_height: 0.5,
                rounding: None,
            },
            ExperimentKind::SimplePendulum => Self::SimplePendulum {
                length: 1.0,
                amplitude_degrees: default_amplitude(),
                bob_mass: default_bob_mass(),
                rounding: None,
            },
        }
    }

    /// Which experiment this configures.
    pub fn kind(&self) -> ExperimentKind {
        match self {
            Self::InclinedPlane { .. } => ExperimentKind::InclinedPlaneGravity,
            Self::RotationalEnergy { .. } => ExperimentKind::RotationalEnergyConservation,
            Self::SimplePendulum { .. } => ExperimentKind::SimplePendulum,
        }
    }

    /// Builds the model this configuration describes.
    pub fn build(&self) -> Box<dyn ExperimentModel> {
        match *self {
            Self::InclinedPlane {
                angle_degrees,
                rounding,
            } => {
                let model = InclinedPlaneGravity::new(angle_degrees);
                Box::new(match rounding {
                    Some(mode) => model.with_rounding(mode),
                    None => model,
                })
            }
            Self::RotationalEnergy {
                drop_height,
                reference_height,
                rounding,
            } => {
                let model = RotationalEnergyConservation::new(drop_height, reference_height);
                Box::new(match rounding {
                    Some(mode) => model.with_rounding(mode),
                    None => model,
                })
            }
            Self::SimplePendulum {
                length,
                amplitude_degrees,
                bob_mass,
                rounding,
            } => {
                let model = SimplePendulum::new(length, amplitude_degrees, bob_mass);
                Box::new(match rounding {
                    Some(mode) => model.with_rounding(mode),
                    None => model,
                })
            }
        }
    }
}

/// One analysis request: configuration plus the readings column as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    config: ExperimentConfig,
    readings: Vec<Option<f64>>,
}

impl ExperimentRun {
    /// Creates a run from explicit optional entries (`None` = unset row).
    pub fn new(config: ExperimentConfig, readings: Vec<Option<f64>>) -> Self {
        Self { config, readings }
    }

    /// Creates a run from a column where `0.0` means "not entered".
    pub fn from_sentinel_readings(config: ExperimentConfig, raw: &[f64]) -> Self {
        Self::new(config, entries_from_sentinel(raw))
    }

    /// Parses a run from JSON.
    ///
    /// Readings are numbers or `null`; only `null` marks an unset row, so a
    /// measured `0.0` survives a serialize/parse round trip. Columns that use
    /// the `0.0` placeholder go through
    /// [`from_sentinel_readings`](Self::from_sentinel_readings) instead.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidConfiguration`] if the JSON is malformed or
    /// names an unknown experiment.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::InvalidConfiguration(format!("JSON parse error: {e}")))
    }

    /// The experiment configuration.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// The readings column, unset rows included.
    pub fn readings(&self) -> &[Option<f64>] {
        &self.readings
    }

    /// Runs the analysis pipeline on this run.
    pub fn analyze(&self) -> Result<ExperimentResult> {
        let model = self.config.build();
        analyze(model.as_ref(), &self.readings)
    }
}

/// Everything a presentation layer needs from one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    /// Which experiment produced this result.
    pub kind: ExperimentKind,
    /// Number of readings that survived unset-filtering.
    pub readings_used: usize,
    /// Rounding mode the representative values were estimated with.
    pub rounding: RoundingMode,
    /// Representative value of the measured quantity.
    pub primary: RepresentativeValue,
    /// Secondary summary (L² for the rotational experiment).
    pub secondary: Option<RepresentativeValue>,
    /// Quantity derived from the measurements.
    pub experimental: f64,
    /// Quantity predicted by the closed-form formula.
    pub theoretical: f64,
    /// `|(theoretical - experimental) / theoretical| × 100`.
    pub percent_error: f64,
    /// Experimental formula with configuration substituted.
    pub experimental_formula: String,
    /// Theoretical formula with configuration substituted.
    pub theoretical_formula: String,
}

/// Runs the full pipeline for `model` on a readings column.
///
/// # Errors
///
/// - [`AnalysisError::InvalidConfiguration`] if `model.validate()` fails
/// - [`AnalysisError::EmptyMeasurementSet`] if every row is unset
/// - [`AnalysisError::InvalidReading`] for a non-finite reading
/// - [`AnalysisError::DegenerateTheoreticalValue`] if the prediction is zero
///
/// # Examples
///
/// ```
/// use u_labanalysis::analysis::analyze;
/// use u_labanalysis::error::AnalysisError;
/// use u_labanalysis::model::RotationalEnergyConservation;
///
/// let model = RotationalEnergyConservation::new(0.5, 0.0);
/// let err = analyze(&model, &[Some(1.4), Some(1.41)]).unwrap_err();
/// assert!(matches!(err, AnalysisError::DegenerateTheoreticalValue { .. }));
/// ```
pub fn analyze(model: &dyn ExperimentModel, entries: &[Option<f64>]) -> Result<ExperimentResult> {
    let kind = model.kind();
    model.validate().map_err(|e| {
        log::warn!("rejected {} configuration: {e}", kind.title());
        e
    })?;

    let readings = MeasurementSet::from_entries(entries)?;
    log::debug!(
        "analyzing {}: {} of {} rows set",
        kind.title(),
        readings.len(),
        entries.len()
    );

    let derivation = model.derive(&readings)?;
    let percent_error = percent_error(derivation.theoretical, derivation.experimental)?;
    log::debug!(
        "{}: experimental = {}, theoretical = {}, error = {percent_error}%",
        kind.symbol(),
        derivation.experimental,
        derivation.theoretical
    );

    Ok(ExperimentResult {
        kind,
        readings_used: readings.len(),
        rounding: model.rounding(),
        primary: derivation.primary,
        secondary: derivation.secondary,
        experimental: derivation.experimental,
        theoretical: derivation.theoretical,
        percent_error,
        experimental_formula: model.experimental_formula(),
        theoretical_formula: model.theoretical_formula(),
    })
}

/// Plain-text derivation trace.
impl fmt::Display for ExperimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.measured_symbol();
        let unit = self.kind.measured_unit();
        let derived_unit = self.kind.unit();

        writeln!(f, "{} ({} readings)", self.kind.title(), self.readings_used)?;
        writeln!(
            f,
            "  {symbol} = {:.4} ± {:.4} {unit}",
            self.primary.value, self.primary.uncertainty
        )?;
        if let Some(secondary) = &self.secondary {
            writeln!(
                f,
                "  {symbol}² = {:.4} ± {:.4} {unit}²",
                secondary.value, secondary.uncertainty
            )?;
        }
        writeln!(
            f,
            "  experimental: {} = {:.4} {derived_unit}",
            self.experimental_formula, self.experimental
        )?;
        writeln!(
            f,
            "  theoretical:  {} = {:.4} {derived_unit}",
            self.theoretical_formula, self.theoretical
        )?;
        write!(
            f,
            "  error: |({:.4} - {:.4}) / {:.4}| × 100 = {:.2} %",
            self.theoretical, self.experimental, self.theoretical, self.percent_error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ExperimentKind; 3] = [
        ExperimentKind::InclinedPlaneGravity,
        ExperimentKind::RotationalEnergyConservation,
        ExperimentKind::SimplePendulum,
    ];

    #[test]
    fn inclined_plane_end_to_end() {
        let config = ExperimentConfig::InclinedPlane {
            angle_degrees: 30.0,
            rounding: None,
        };
        let run = ExperimentRun::from_sentinel_readings(config, &[4.90, 4.91, 4.89, 4.90, 4.90]);
        let result = run.analyze().unwrap();

        assert_eq!(result.kind, ExperimentKind::InclinedPlaneGravity);
        assert_eq!(result.readings_used, 5);
        assert_eq!(result.rounding, RoundingMode::Plain);
        assert!((result.experimental - 9.80).abs() < 1e-9);
        // |9.81 - 9.80| / 9.81 × 100 ≈ 0.102 %
        assert!(
            (result.percent_error - 0.102).abs() < 1e-3,
            "error = {}",
            result.percent_error
        );
    }

    #[test]
    fn rotational_zero_reference_height_is_degenerate() {
        let config = ExperimentConfig::RotationalEnergy {
            drop_height: 0.5,
            reference_height: 0.0,
            rounding: None,
        };
        let err = ExperimentRun::from_sentinel_readings(config, &[1.4, 1.42, 0.0])
            .analyze()
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateTheoreticalValue { .. }
        ));
    }

    #[test]
    fn rotational_end_to_end() {
        // h = H = 0.5: k_theory = 0.5; L = 1.0 everywhere gives k = 0.5
        let config = ExperimentConfig::defaults(ExperimentKind::RotationalEnergyConservation);
        let result = ExperimentRun::from_sentinel_readings(config, &[1.0, 1.0, 1.0])
            .analyze()
            .unwrap();
        assert!((result.experimental - 0.5).abs() < 1e-12);
        assert!((result.theoretical - 0.5).abs() < 1e-12);
        assert!(result.percent_error.abs() < 1e-9);
        assert!(result.secondary.is_some());
        assert_eq!(result.rounding, RoundingMode::Conservative);
    }

    #[test]
    fn pendulum_end_to_end() {
        let config = ExperimentConfig::defaults(ExperimentKind::SimplePendulum);
        let result = ExperimentRun::from_sentinel_readings(config, &[20.0, 20.1, 19.9, 20.0, 20.0])
            .analyze()
            .unwrap();

        assert!((result.experimental - 2.0).abs() < 1e-9);
        assert!((result.theoretical - 2.0061).abs() < 1e-4);
        // |2.0061 - 2.00| / 2.0061 × 100 ≈ 0.30 %
        assert!(
            (result.percent_error - 0.302).abs() < 5e-3,
            "error = {}",
            result.percent_error
        );
    }

    #[test]
    fn all_sentinel_readings_are_empty_for_every_experiment() {
        for kind in ALL_KINDS {
            let run = ExperimentRun::from_sentinel_readings(ExperimentConfig::defaults(kind), &[0.0; 5]);
            assert_eq!(
                run.analyze().unwrap_err(),
                AnalysisError::EmptyMeasurementSet,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn invalid_configuration_is_reported_before_readings() {
        let config = ExperimentConfig::SimplePendulum {
            length: -1.0,
            amplitude_degrees: 5.0,
            bob_mass: 0.1,
            rounding: None,
        };
        let err = ExperimentRun::new(config, vec![None]).analyze().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_angle_rejected_as_configuration() {
        let config = ExperimentConfig::InclinedPlane {
            angle_degrees: 0.0,
            rounding: None,
        };
        let err = ExperimentRun::new(config, vec![Some(4.9)]).analyze().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration(_)));
    }

    #[test]
    fn non_finite_reading_rejected() {
        let config = ExperimentConfig::defaults(ExperimentKind::InclinedPlaneGravity);
        let err = ExperimentRun::new(config, vec![Some(1.0), Some(f64::NAN)])
            .analyze()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidReading { index: 1, .. }));
    }

    #[test]
    fn defaults_match_entry_form() {
        assert_eq!(
            ExperimentConfig::defaults(ExperimentKind::InclinedPlaneGravity),
            ExperimentConfig::InclinedPlane {
                angle_degrees: 10.0,
                rounding: None
            }
        );
        for kind in ALL_KINDS {
            let config = ExperimentConfig::defaults(kind);
            assert_eq!(config.kind(), kind);
            assert!(config.build().validate().is_ok());
        }
    }

    #[test]
    fn json_run_with_null_rows() {
        let run = ExperimentRun::from_json(
            r#"{
                "config": { "experiment": "inclined_plane", "angle_degrees": 20.0 },
                "readings": [3.35, null, 3.37]
            }"#,
        )
        .unwrap();
        assert_eq!(run.readings(), &[Some(3.35), None, Some(3.37)]);
        assert_eq!(run.config().kind(), ExperimentKind::InclinedPlaneGravity);
        assert_eq!(run.analyze().unwrap().readings_used, 2);
    }

    #[test]
    fn json_round_trip_keeps_measured_zero() {
        let config = ExperimentConfig::defaults(ExperimentKind::InclinedPlaneGravity);
        let run = ExperimentRun::new(config, vec![Some(0.0), None, Some(0.02)]);

        let json = serde_json::to_string(&run).unwrap();
        let back = ExperimentRun::from_json(&json).unwrap();
        assert_eq!(back, run);

        let before = run.analyze().unwrap();
        let after = back.analyze().unwrap();
        assert_eq!(after.readings_used, 2);
        assert!((after.primary.value - 0.01).abs() < 1e-12);
        assert_eq!(after, before);
    }

    #[test]
    fn sentinel_column_still_drops_zero() {
        let config = ExperimentConfig::defaults(ExperimentKind::InclinedPlaneGravity);
        let run = ExperimentRun::from_sentinel_readings(config, &[0.0, 0.02]);
        assert_eq!(run.readings(), &[None, Some(0.02)]);
    }

    #[test]
    fn json_rounding_override() {
        let run = ExperimentRun::from_json(
            r#"{
                "config": {
                    "experiment": "rotational_energy",
                    "drop_height": 0.5,
                    "reference_height": 0.5,
                    "rounding": "plain"
                },
                "readings": [1.0]
            }"#,
        )
        .unwrap();
        assert_eq!(run.analyze().unwrap().rounding, RoundingMode::Plain);
    }

    #[test]
    fn json_pendulum_fills_inert_defaults() {
        let run = ExperimentRun::from_json(
            r#"{ "config": { "experiment": "simple_pendulum", "length": 0.8 }, "readings": [] }"#,
        )
        .unwrap();
        assert_eq!(
            *run.config(),
            ExperimentConfig::SimplePendulum {
                length: 0.8,
                amplitude_degrees: 5.0,
                bob_mass: 0.1,
                rounding: None,
            }
        );
    }

    #[test]
    fn json_errors_are_configuration_errors() {
        for json in [
            "not json",
            r#"{ "config": { "experiment": "free_fall" }, "readings": [] }"#,
            r#"{ "config": { "experiment": "inclined_plane" }, "readings": [] }"#,
        ] {
            let err = ExperimentRun::from_json(json).unwrap_err();
            assert!(
                matches!(err, AnalysisError::InvalidConfiguration(_)),
                "{json}: {err:?}"
            );
        }
    }

    #[test]
    fn config_serializes_with_tag() {
        let config = ExperimentConfig::defaults(ExperimentKind::RotationalEnergyConservation);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"experiment":"rotational_energy","drop_height":0.5,"reference_height":0.5}"#
        );
    }

    #[test]
    fn trace_lists_formulas_and_error() {
        let config = ExperimentConfig::defaults(ExperimentKind::RotationalEnergyConservation);
        let result = ExperimentRun::from_sentinel_readings(config, &[1.0, 1.1, 0.9])
            .analyze()
            .unwrap();
        let trace = result.to_string();

        assert!(trace.starts_with("moment of inertia"), "{trace}");
        assert!(trace.contains("(3 readings)"), "{trace}");
        assert!(trace.contains("L = 1.0000 ±"), "{trace}");
        assert!(trace.contains("L² = "), "{trace}");
        assert!(trace.contains("k = mean(0.5 / L²)"), "{trace}");
        assert!(trace.contains("k = 1 / (4 × 0.5) = 0.5000 1/m"), "{trace}");
        assert!(trace.contains("× 100 = "), "{trace}");
    }

    #[test]
    fn result_serializes_for_presentation() {
        let config = ExperimentConfig::defaults(ExperimentKind::SimplePendulum);
        let result = ExperimentRun::from_sentinel_readings(config, &[20.0])
            .analyze()
            .unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "simple_pendulum");
        assert_eq!(value["rounding"], "conservative");
        assert_eq!(value["primary"]["uncertainty"], 0.0);
        assert!(value["secondary"].is_null());
    }
}
