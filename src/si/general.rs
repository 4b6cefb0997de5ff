/// Digits beyond this never change the output: every f64 is exact within
/// 767 significant digits and decimal exponents stay within -324..=308
const MAX_PRECISION: u32 = 800;

/// Render `value` with `precision` significant digits in general format
///
/// Behaves like printf's `%.Ng`: fixed notation when the decimal exponent
/// (after rounding) lies in `-4..precision`, scientific notation otherwise,
/// trailing zeros and a dangling decimal point removed. A precision of 0 is
/// treated as 1.
pub fn format_general(value: f64, precision: u32) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let precision = precision.clamp(1, MAX_PRECISION) as usize;

    // Rust's `{:e}` rounds correctly to the requested digits, so the digit
    // string and the post-rounding exponent both come from here.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if exponent < -4 || exponent >= precision as i32 {
        let (lead, rest) = digits.split_at(1);
        let rest = rest.trim_end_matches('0');
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{:02}", lead, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{:02}", lead, rest, sign, exponent.abs())
        }
    } else if exponent >= 0 {
        let (int_part, frac_part) = digits.split_at(exponent as usize + 1);
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.is_empty() {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, frac_part)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("0.{}{}", zeros, digits.trim_end_matches('0'))
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}
