use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex pattern to detect quantity strings
    /// Matches: number (optional sign, decimal, scientific notation) + whitespace + unit
    /// Examples: "100 W", "1030e-9 m", "0.911 %", "-20 dB", "5 m/s"
    static ref QUANTITY_PATTERN: Regex = Regex::new(
        r"^([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)\s+([a-zA-Z/%°µΩ!_]+)$"
    ).unwrap();
}

/// Check if a string looks like a number followed by a unit
pub fn looks_like_quantity(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }

    QUANTITY_PATTERN.is_match(trimmed)
}

/// Split "1030e-9 m" into its value and unit
/// A bare number is accepted with an empty unit
pub fn split_quantity(s: &str) -> Option<(f64, &str)> {
    let trimmed = s.trim();

    if let Some(caps) = QUANTITY_PATTERN.captures(trimmed) {
        let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
        let unit = caps.get(2)?.as_str();
        return Some((value, unit));
    }

    trimmed.parse::<f64>().ok().map(|value| (value, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_detection() {
        assert!(looks_like_quantity("100 W"));
        assert!(looks_like_quantity("1030e-9 m"));
        assert!(looks_like_quantity("0.911 %"));
        assert!(looks_like_quantity("-20 dB"));
        assert!(looks_like_quantity("5 m/s"));
        assert!(looks_like_quantity(".5 Ω"));

        assert!(!looks_like_quantity("100"));
        assert!(!looks_like_quantity("W"));
        assert!(!looks_like_quantity("hello world"));
        assert!(!looks_like_quantity(""));
    }

    #[test]
    fn test_split_quantity() {
        assert_eq!(split_quantity("1030e-9 m"), Some((1030e-9, "m")));
        assert_eq!(split_quantity("  0.911   % "), Some((0.911, "%")));
        assert_eq!(split_quantity("42"), Some((42.0, "")));
        assert_eq!(split_quantity("inf"), Some((f64::INFINITY, "")));
        assert_eq!(split_quantity("ten W"), None);
        assert_eq!(split_quantity(""), None);
    }
}
