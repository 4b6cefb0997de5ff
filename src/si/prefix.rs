/// One row of the SI prefix table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiPrefix {
    /// Largest decimal exponent this row applies to
    pub threshold: i32,
    /// Power of ten divided out of the value
    pub multiplier: i32,
    /// Prefix symbol, empty for no prefix
    pub symbol: &'static str,
}

const fn row(threshold: i32, multiplier: i32, symbol: &'static str) -> SiPrefix {
    SiPrefix {
        threshold,
        multiplier,
        symbol,
    }
}

pub const MICRO_SYMBOL: &str = "µ";

/// Ordered by threshold; exponents below -19 or above 17 are left unprefixed
pub static SI_PREFIXES: [SiPrefix; 13] = [
    row(-19, 0, ""),
    row(-16, -18, "a"),
    row(-13, -15, "f"),
    row(-10, -12, "p"),
    row(-7, -9, "n"),
    row(-4, -6, MICRO_SYMBOL),
    row(-1, -3, "m"),
    row(2, 0, ""),
    row(5, 3, "k"),
    row(8, 6, "M"),
    row(11, 9, "G"),
    row(14, 12, "T"),
    row(17, 15, "P"),
];

/// Returned for exponents past the end of the table and for NaN
pub const FALLBACK_PREFIX: SiPrefix = row(i32::MAX, 0, "");

/// Look up the prefix row for a decimal exponent
///
/// Returns the first row whose threshold is at or above `exponent`.
/// `-inf` (the exponent of zero) lands on the first, unprefixed row.
pub fn get_prefix(exponent: f64) -> SiPrefix {
    SI_PREFIXES
        .iter()
        .find(|p| exponent <= f64::from(p.threshold))
        .copied()
        .unwrap_or(FALLBACK_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_contiguous() {
        for pair in SI_PREFIXES.windows(2) {
            assert_eq!(pair[1].threshold - pair[0].threshold, 3);
        }
    }

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(get_prefix(0.0).symbol, "");
        assert_eq!(get_prefix(-3.0).symbol, "m");
        assert_eq!(get_prefix(-6.0).symbol, "µ");
        assert_eq!(get_prefix(-7.0).symbol, "n");
        assert_eq!(get_prefix(3.0).symbol, "k");
        assert_eq!(get_prefix(15.0).multiplier, 15);
    }

    #[test]
    fn test_residual_exponent_in_range() {
        for exponent in -18..=17 {
            let prefix = get_prefix(f64::from(exponent));
            let residual = exponent - prefix.multiplier;
            assert!(
                (0..3).contains(&residual),
                "exponent {} left residual {} with '{}'",
                exponent,
                residual,
                prefix.symbol
            );
        }
    }

    #[test]
    fn test_fallback_rows() {
        assert_eq!(get_prefix(-19.0), SI_PREFIXES[0]);
        assert_eq!(get_prefix(-40.0).multiplier, 0);
        assert_eq!(get_prefix(f64::NEG_INFINITY).symbol, "");
        assert_eq!(get_prefix(18.0), FALLBACK_PREFIX);
        assert_eq!(get_prefix(f64::INFINITY), FALLBACK_PREFIX);
        assert_eq!(get_prefix(f64::NAN), FALLBACK_PREFIX);
    }
}
