use serde::{Deserialize, Serialize};

/// Number of significant digits used when no precision is given
pub const DEFAULT_PRECISION: u32 = 3;

/// How many significant digits to show
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Precision {
    /// Fixed significant digit count
    Digits(u32),
    /// Digit count derived from the closest spacing of reference values
    Spacing(Vec<f64>),
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Digits(DEFAULT_PRECISION)
    }
}

impl From<u32> for Precision {
    fn from(digits: u32) -> Self {
        Precision::Digits(digits)
    }
}

impl From<Vec<f64>> for Precision {
    fn from(references: Vec<f64>) -> Self {
        Precision::Spacing(references)
    }
}

impl From<&[f64]> for Precision {
    fn from(references: &[f64]) -> Self {
        Precision::Spacing(references.to_vec())
    }
}

/// Exponent and digit count a precision resolves to for one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrecision {
    /// Decimal exponent the rounding position is measured from
    pub exponent: f64,
    /// Significant digits to render
    pub digits: u32,
}

/// Special unit tokens with their own rendering branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Decibel,
    Percent,
    /// Any other unit (including none), rendered with an SI prefix
    Prefixed,
}

/// A unit string split into its modifiers and base token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    /// Placed between the number (with prefix) and the unit token
    pub separator: &'static str,
    /// Set by a `!` marker in the unit string
    pub file_compatible: bool,
    /// Base unit token, e.g. "m", "dB", "%"
    pub token: String,
}

impl UnitSpec {
    pub fn kind(&self) -> UnitKind {
        match self.token.as_str() {
            "dB" => UnitKind::Decibel,
            "%" => UnitKind::Percent,
            _ => UnitKind::Prefixed,
        }
    }
}

/// Result of formatting a value, with the prefix details behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formatted {
    /// Rendered string, e.g. "1.03µm"
    pub text: String,
    /// Power of ten divided out of the value (0 for dB, % and unprefixed values)
    pub multiplier: i32,
    /// Prefix symbol used ("" for dB, % and unprefixed values)
    pub prefix: &'static str,
}
