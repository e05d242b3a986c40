//! Fixed-point rendering of oracle values.

use alloy_primitives::I256;

/// Number of fractional digits in `Api3ServerV1` feed values.
pub const FEED_DECIMALS: u8 = 18;

/// Renders a signed fixed-point integer as a decimal string.
///
/// Trailing fractional zeros are trimmed, but at least one fractional digit
/// is kept: `2500 * 10^18` renders as `"2500.0"`.
#[must_use]
pub fn format_fixed(value: I256, decimals: u8) -> String {
    let digits = value.unsigned_abs().to_string();
    let decimals = usize::from(decimals);

    let (int_part, frac_part) = if digits.len() > decimals {
        digits.split_at(digits.len() - decimals)
    } else {
        ("0", digits.as_str())
    };

    let mut frac = format!("{frac_part:0>decimals$}");
    let trimmed = frac.trim_end_matches('0').len().max(1);
    frac.truncate(trimmed);
    if frac.is_empty() {
        frac.push('0');
    }

    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}{int_part}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i256(s: &str) -> I256 {
        I256::from_dec_str(s).unwrap()
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(format_fixed(i256("2500000000000000000000"), 18), "2500.0");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(
            format_fixed(i256("3051234500000000000000"), 18),
            "3051.2345"
        );
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(format_fixed(i256("1"), 18), "0.000000000000000001");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_fixed(I256::ZERO, 18), "0.0");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_fixed(i256("-500000000000000000"), 18), "-0.5");
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(format_fixed(i256("42"), 0), "42.0");
    }
}
