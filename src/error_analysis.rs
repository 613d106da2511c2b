//! Percent error between a theoretical prediction and an experimental value.
//!
//! ```text
//! error% = |(theoretical - experimental) / theoretical| × 100
//! ```

use crate::error::{AnalysisError, Result};

/// Relative deviation of `experimental` from `theoretical`, in percent.
///
/// The result is always non-negative.
///
/// # Errors
///
/// - [`AnalysisError::DegenerateTheoreticalValue`] if `theoretical` is zero
/// - [`AnalysisError::Numerical`] if either input is NaN or infinite
///
/// # Examples
///
/// ```
/// use u_labanalysis::error_analysis::percent_error;
///
/// let e = percent_error(9.81, 9.80).unwrap();
/// assert!((e - 0.1019).abs() < 1e-3);
///
/// assert!(percent_error(0.0, 1.0).is_err());
/// ```
pub fn percent_error(theoretical: f64, experimental: f64) -> Result<f64> {
    if !theoretical.is_finite() || !experimental.is_finite() {
        return Err(AnalysisError::Numerical(format!(
            "percent error of non-finite values (theoretical = {theoretical}, experimental = {experimental})"
        )));
    }
    if theoretical == 0.0 {
        log::warn!("theoretical value is zero, percent error is undefined");
        return Err(AnalysisError::DegenerateTheoreticalValue {
            quantity: "theoretical value",
        });
    }
    Ok(((theoretical - experimental) / theoretical).abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_zero() {
        assert_eq!(percent_error(2.5, 2.5).unwrap(), 0.0);
    }

    #[test]
    fn symmetric_about_theoretical() {
        let over = percent_error(10.0, 11.0).unwrap();
        let under = percent_error(10.0, 9.0).unwrap();
        assert!((over - 10.0).abs() < 1e-12);
        assert!((under - 10.0).abs() < 1e-12);
    }

    #[test]
    fn negative_theoretical_is_still_non_negative() {
        let e = percent_error(-4.0, -3.0).unwrap();
        assert!((e - 25.0).abs() < 1e-12);
    }

    #[test]
    fn zero_theoretical_is_degenerate() {
        let err = percent_error(0.0, 0.26).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::DegenerateTheoreticalValue { .. }
        ));
    }

    #[test]
    fn non_finite_is_numerical_error() {
        assert!(matches!(
            percent_error(f64::NAN, 1.0),
            Err(AnalysisError::Numerical(_))
        ));
        assert!(matches!(
            percent_error(1.0, f64::INFINITY),
            Err(AnalysisError::Numerical(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_negative(t in -1e6_f64..1e6, e in -1e6_f64..1e6) {
            prop_assume!(t != 0.0);
            let err = percent_error(t, e).expect("non-zero theoretical");
            prop_assert!(err >= 0.0);
        }
    }
}
