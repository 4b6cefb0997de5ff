use crate::si::error::PucError;
use crate::si::types::{Precision, ResolvedPrecision, DEFAULT_PRECISION};

/// Check that a reference sequence can determine a digit count
pub fn validate_precision(precision: &Precision) -> Result<(), PucError> {
    match precision {
        Precision::Digits(_) => Ok(()),
        Precision::Spacing(references) => {
            if references.len() < 2 {
                return Err(PucError::InvalidPrecision(format!(
                    "reference sequence needs at least 2 values, got {}",
                    references.len()
                )));
            }
            if let Some(bad) = references.iter().find(|r| !r.is_finite()) {
                return Err(PucError::InvalidPrecision(format!(
                    "reference values must be finite, got {}",
                    bad
                )));
            }
            Ok(())
        }
    }
}

/// Resolve a precision to the rounding exponent and digit count for `magnitude`
///
/// `magnitude` must already be non-negative. For a reference sequence the
/// rounding exponent is the one of the closest spacing, not of the value.
pub fn resolve_precision(
    precision: &Precision,
    magnitude: f64,
) -> Result<ResolvedPrecision, PucError> {
    validate_precision(precision)?;

    let value_exponent = magnitude.log10().floor();

    match precision {
        Precision::Digits(digits) => Ok(ResolvedPrecision {
            exponent: value_exponent,
            digits: *digits,
        }),
        Precision::Spacing(references) => {
            let spacing_exponent = min_spacing(references).log10().floor();
            let digits = (spacing_exponent - value_exponent).abs() + 1.0;

            if !digits.is_finite() {
                tracing::debug!(
                    magnitude,
                    spacing_exponent,
                    "reference spacing gives no digit count, using default precision"
                );
                return Ok(ResolvedPrecision {
                    exponent: value_exponent,
                    digits: DEFAULT_PRECISION,
                });
            }

            Ok(ResolvedPrecision {
                exponent: spacing_exponent,
                digits: digits as u32,
            })
        }
    }
}

/// Smallest gap between neighbouring values once sorted
fn min_spacing(references: &[f64]) -> f64 {
    let mut sorted = references.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .fold(f64::INFINITY, f64::min)
}
