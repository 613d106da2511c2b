//! Representative value and order-of-magnitude uncertainty.
//!
//! # Algorithm
//!
//! ```text
//! x̄     = mean(x_1, ..., x_n)
//! Δmax  = max |x_i - x̄|
//! p     = floor(log10(Δmax))
//! u     = round(Δmax / 10^p) · 10^p          (one significant digit)
//! ```
//!
//! In [`RoundingMode::Conservative`] the digit is bumped by one whenever the
//! rounded value falls below Δmax, so the reported uncertainty never
//! understates the largest observed deviation. [`RoundingMode::Plain`] keeps
//! the nearest-digit rounding and may understate it by up to half a unit at
//! order `p`.
//!
//! All readings identical ⇒ Δmax = 0 ⇒ u = 0.

use serde::{Deserialize, Serialize};
use u_numflow::stats;

/// How the largest deviation is rounded to one significant digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half to even at the leading digit.
    #[default]
    Plain,
    /// Round, then add one unit at the leading digit if the result
    /// understates the deviation.
    Conservative,
}

/// A repeated measurement summarized as `value ± uncertainty`.
///
/// # Invariants
///
/// - `uncertainty >= 0`
/// - `uncertainty == 0` iff every reading was identical
/// - `value` lies within `[min, max]` of the readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepresentativeValue {
    /// Arithmetic mean of the readings.
    pub value: f64,
    /// Deviation rounded to one significant digit.
    pub uncertainty: f64,
    /// Largest absolute deviation of a reading from `value`, unrounded.
    pub max_deviation: f64,
}

/// Estimates the representative value and uncertainty of `data`.
///
/// # Returns
///
/// `None` if `data` is empty or contains NaN or infinity values.
///
/// # Examples
///
/// ```
/// use u_labanalysis::uncertainty::{estimate, RoundingMode};
///
/// let r = estimate(&[1.0, 1.02, 0.98], RoundingMode::Plain).unwrap();
/// assert!((r.value - 1.0).abs() < 1e-12);
/// assert!((r.uncertainty - 0.02).abs() < 1e-12);
///
/// let same = estimate(&[5.0, 5.0, 5.0], RoundingMode::Conservative).unwrap();
/// assert_eq!(same.value, 5.0);
/// assert_eq!(same.uncertainty, 0.0);
/// ```
pub fn estimate(data: &[f64], mode: RoundingMode) -> Option<RepresentativeValue> {
    let (&first, _) = data.split_first()?;
    if data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    if data.iter().all(|&v| v == first) {
        return Some(RepresentativeValue {
            value: first,
            uncertainty: 0.0,
            max_deviation: 0.0,
        });
    }

    let (lo, hi) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // Summation rounding can land one ulp outside the data range.
    let value = stats::mean(data)?.clamp(lo, hi);

    let max_deviation = data
        .iter()
        .map(|&v| (v - value).abs())
        .fold(0.0_f64, f64::max);
    if !max_deviation.is_finite() {
        return None;
    }

    Some(RepresentativeValue {
        value,
        uncertainty: round_deviation(max_deviation, mode),
        max_deviation,
    })
}

/// Rounds a non-negative deviation to one significant digit.
///
/// Returns `0.0` for a zero deviation.
///
/// # Examples
///
/// ```
/// use u_labanalysis::uncertainty::{round_deviation, RoundingMode};
///
/// assert!((round_deviation(0.013, RoundingMode::Plain) - 0.01).abs() < 1e-15);
/// assert!((round_deviation(0.013, RoundingMode::Conservative) - 0.02).abs() < 1e-15);
/// assert!((round_deviation(33.3, RoundingMode::Plain) - 30.0).abs() < 1e-12);
/// ```
pub fn round_deviation(deviation: f64, mode: RoundingMode) -> f64 {
    if deviation <= 0.0 || !deviation.is_finite() {
        return 0.0;
    }

    let power = deviation.log10().floor() as i32;
    let mut digit = to_order(deviation, power).round_ties_even();
    if mode == RoundingMode::Conservative && from_order(digit, power) < deviation {
        digit += 1.0;
    }
    from_order(digit, power)
}

/// Largest exponent whose power of ten is taken in one step; `10^-power`
/// overflows past 308 for subnormal deviations.
const MAX_STEP_EXPONENT: i32 = 300;

/// `x / 10^power`, dividing by an exact power of ten where possible.
fn to_order(x: f64, power: i32) -> f64 {
    if power < -MAX_STEP_EXPONENT {
        to_order(x * 10f64.powi(MAX_STEP_EXPONENT), power + MAX_STEP_EXPONENT)
    } else if power < 0 {
        x * 10f64.powi(-power)
    } else {
        x / 10f64.powi(power)
    }
}

/// `digit · 10^power`, the inverse of [`to_order`].
fn from_order(digit: f64, power: i32) -> f64 {
    if power < -MAX_STEP_EXPONENT {
        from_order(digit, power + MAX_STEP_EXPONENT) / 10f64.powi(MAX_STEP_EXPONENT)
    } else if power < 0 {
        digit / 10f64.powi(-power)
    } else {
        digit * 10f64.powi(power)
    }
}
