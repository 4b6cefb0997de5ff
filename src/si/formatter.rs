use crate::si::error::PucError;
use crate::si::general::format_general;
use crate::si::precision::resolve_precision;
use crate::si::prefix::{get_prefix, MICRO_SYMBOL};
use crate::si::types::{Formatted, Precision, UnitKind, UnitSpec};

/// Substitutions making a rendered value safe to use in a filename, applied in order
pub const FILE_REPLACEMENTS: [(&str, &str); 4] =
    [(MICRO_SYMBOL, "u"), (".", "p"), ("/", "p"), (" ", "_")];

/// Split a unit string into separator, file marker and base token
///
/// A space anywhere in the unit selects a space separator, otherwise an
/// underscore selects an underscore separator; only the chosen character is
/// stripped. A `!` anywhere requests filename-compatible output.
pub fn parse_unit(unit: &str) -> UnitSpec {
    let (separator, mut token) = if unit.contains(' ') {
        (" ", unit.replace(' ', ""))
    } else if unit.contains('_') {
        ("_", unit.replace('_', ""))
    } else {
        ("", unit.to_string())
    };

    let file_compatible = token.contains('!');
    if file_compatible {
        token = token.replace('!', "");
    }

    UnitSpec {
        separator,
        file_compatible,
        token,
    }
}

/// Replace characters that are awkward in filenames
pub fn sanitize_filename(text: &str) -> String {
    FILE_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Format `value` with an SI prefix and unit
///
/// ```
/// use puc::si::{format, Precision};
///
/// assert_eq!(format(1030e-9, "m", &Precision::Digits(3), false).unwrap(), "1.03µm");
/// assert_eq!(format(999.999, "W", &Precision::default(), false).unwrap(), "1kW");
/// ```
pub fn format(
    value: f64,
    unit: &str,
    precision: &Precision,
    file_compatible: bool,
) -> Result<String, PucError> {
    format_verbose(value, unit, precision, file_compatible).map(|f| f.text)
}

/// Format `value` and report the multiplier and prefix that were applied
pub fn format_verbose(
    value: f64,
    unit: &str,
    precision: &Precision,
    file_compatible: bool,
) -> Result<Formatted, PucError> {
    let parsed = parse_unit(unit);
    let file_compatible = file_compatible || parsed.file_compatible;

    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    let mut magnitude = value * sign;

    let resolved = resolve_precision(precision, magnitude)?;
    let digits = resolved.digits;

    if resolved.exponent.is_finite() {
        let scale = f64::from(digits) - resolved.exponent - 1.0;
        magnitude = (magnitude * 10f64.powf(scale)).round_ties_even() * 10f64.powf(-scale);
    }

    let mut exponent = magnitude.log10().floor();
    if digits == 4 || digits == 5 {
        // 1032.1nm reads better than 1.0321µm
        exponent -= 3.0;
    }

    let formatted = match parsed.kind() {
        UnitKind::Decibel => Formatted {
            text: format!(
                "{}{}{}",
                format_general(10.0 * magnitude.log10(), digits),
                parsed.separator,
                parsed.token
            ),
            multiplier: 0,
            prefix: "",
        },
        UnitKind::Percent => Formatted {
            text: format!(
                "{}{}{}",
                format_general(sign * 100.0 * magnitude, digits),
                parsed.separator,
                parsed.token
            ),
            multiplier: 0,
            prefix: "",
        },
        UnitKind::Prefixed => {
            let prefix = get_prefix(exponent);
            let scaled = sign * magnitude * 10f64.powf(-f64::from(prefix.multiplier));

            let mut number = format_general(scaled, digits);
            if number.contains("e+") {
                tracing::debug!(number = %number, digits, "scientific output, adding one digit");
                number = format_general(scaled, digits.saturating_add(1));
            }

            Formatted {
                text: format!("{}{}{}{}", number, parsed.separator, prefix.symbol, parsed.token),
                multiplier: prefix.multiplier,
                prefix: prefix.symbol,
            }
        }
    };

    if file_compatible {
        return Ok(Formatted {
            text: sanitize_filename(&formatted.text),
            ..formatted
        });
    }

    Ok(formatted)
}
