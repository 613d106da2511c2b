//! Input validation for user-entered readings.
//!
//! Readings arrive from a data-entry surface as an ordered column in which
//! some rows may not have been filled in yet. Unset rows are modelled as
//! `None`; the legacy convention of leaving a row at `0.0` is supported
//! through [`MeasurementSet::from_sentinel_readings`].
//!
//! A [`MeasurementSet`] is the only way readings reach an
//! [`ExperimentModel`](crate::model::ExperimentModel), so every model can rely
//! on a non-empty, finite input.

use crate::error::{AnalysisError, Result};
use crate::uncertainty::{self, RepresentativeValue, RoundingMode};

/// Placeholder a data-entry row holds before the user types a reading.
pub const UNSET_SENTINEL: f64 = 0.0;

/// Maps a sentinel-encoded column to explicit optional entries.
///
/// # Examples
///
/// ```
/// use u_labanalysis::measurement::entries_from_sentinel;
///
/// let entries = entries_from_sentinel(&[4.9, 0.0, 4.8]);
/// assert_eq!(entries, vec![Some(4.9), None, Some(4.8)]);
/// ```
pub fn entries_from_sentinel(raw: &[f64]) -> Vec<Option<f64>> {
    raw.iter()
        .map(|&v| if v == UNSET_SENTINEL { None } else { Some(v) })
        .collect()
}

/// A non-empty, ordered set of finite readings.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSet {
    values: Vec<f64>,
}

impl MeasurementSet {
    /// Builds a set from data-entry rows, skipping unset ones.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidReading`] if a set entry is NaN or infinite;
    ///   `index` is the row position in `entries`
    /// - [`AnalysisError::EmptyMeasurementSet`] if no entry is set
    ///
    /// # Examples
    ///
    /// ```
    /// use u_labanalysis::measurement::MeasurementSet;
    ///
    /// let set = MeasurementSet::from_entries(&[Some(2.0), None, Some(2.1)]).unwrap();
    /// assert_eq!(set.values(), &[2.0, 2.1]);
    ///
    /// assert!(MeasurementSet::from_entries(&[None, None]).is_err());
    /// ```
    pub fn from_entries(entries: &[Option<f64>]) -> Result<Self> {
        let mut values = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Some(value) = *entry else { continue };
            if !value.is_finite() {
                return Err(AnalysisError::InvalidReading { index, value });
            }
            values.push(value);
        }
        Self::from_values(values)
    }

    /// Builds a set from a column where `0.0` means "not entered".
    ///
    /// A genuine zero reading cannot be expressed this way; use
    /// [`from_entries`](Self::from_entries) when zero is a legitimate value.
    pub fn from_sentinel_readings(raw: &[f64]) -> Result<Self> {
        Self::from_entries(&entries_from_sentinel(raw))
    }

    fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AnalysisError::EmptyMeasurementSet);
        }
        Ok(Self { values })
    }

    /// The readings, in entry order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of readings. Always at least one.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies `f` to every reading, e.g. converting ten-period timings to
    /// single periods.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidReading`] if `f` produces NaN or infinity.
    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(index, &v)| {
                let value = f(v);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(AnalysisError::InvalidReading { index, value })
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(values)
    }

    /// Representative value and uncertainty of the readings.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Numerical`] if the deviation overflows.
    pub fn estimate(&self, mode: RoundingMode) -> Result<RepresentativeValue> {
        uncertainty::estimate(&self.values, mode).ok_or_else(|| {
            AnalysisError::Numerical(format!(
                "could not estimate a representative value from {} readings",
                self.values.len()
            ))
        })
    }
}
