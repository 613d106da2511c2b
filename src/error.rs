//! Error taxonomy for measurement analysis.
//!
//! Every failure is local to a single analysis run and recoverable: the
//! caller reports it and waits for corrected input. Nothing here is retried.

use thiserror::Error;

/// Root error type for all analysis failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No valid readings remain after unset entries are filtered out.
    #[error("no measurements to analyze: enter at least one measurement")]
    EmptyMeasurementSet,

    /// A theoretical denominator evaluated to zero.
    #[error("degenerate theoretical value: {quantity} is zero")]
    DegenerateTheoreticalValue {
        /// The quantity whose value made the computation undefined.
        quantity: &'static str,
    },

    /// Configuration outside the domain the model supports.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A reading that is NaN or infinite.
    #[error("invalid reading at position {index}: {value}")]
    InvalidReading { index: usize, value: f64 },

    /// NaN or infinity reached a computation.
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
