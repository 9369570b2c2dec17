//! Deterministic rounding and display formatting for decimal quantities.

/// Rounds `value` to `decimals` fractional digits, half away from zero.
///
/// Non-finite input (NaN, ±infinity) is returned unchanged; callers must
/// not assume a finite result.
pub fn round(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Formats a value for an editable text field.
///
/// Rounds, renders exactly `decimals` fractional digits, then strips
/// trailing zeros and a dangling decimal point (`1.500000` becomes
/// `1.5`, `2.000000` becomes `2`). Integer renderings without a decimal
/// point are left untouched. Only used to populate editable fields; wire
/// payloads carry the rounded numeric value directly.
pub fn to_display_string(value: f64, decimals: u32) -> String {
    let rounded = round(value, decimals);
    let fixed = format!("{rounded:.prec$}", prec = decimals as usize);
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Formats a price for the depth table: thousands grouping, 2 digits.
pub fn format_price(value: f64) -> String {
    group_thousands(value, 2)
}

/// Formats a quantity for the depth table: thousands grouping, 6 digits.
pub fn format_quantity(value: f64) -> String {
    group_thousands(value, 6)
}

/// Fixed-point rendering with commas every three integer digits.
/// Non-finite values render as-is ("NaN", "inf") so a malformed book row
/// degrades visibly instead of panicking.
fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{value:.decimals$}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_away_from_zero() {
        // Exactly representable halves so the tie is real, not a
        // representation artifact.
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -3.0);
        assert_eq!(round(0.25, 1), 0.3);
        assert_eq!(round(-0.25, 1), -0.3);
        assert_eq!(round(0.1234567, 6), 0.123457);
    }

    #[test]
    fn round_is_idempotent() {
        for value in [0.1234565, 1999.999999949, -0.000001, 123.456] {
            let once = round(value, 6);
            assert_eq!(round(once, 6), once);
        }
    }

    #[test]
    fn round_propagates_non_finite() {
        assert!(round(f64::NAN, 6).is_nan());
        assert_eq!(round(f64::INFINITY, 6), f64::INFINITY);
        assert_eq!(round(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
    }

    #[test]
    fn display_string_strips_trailing_zeros() {
        assert_eq!(to_display_string(1.5, 6), "1.5");
        assert_eq!(to_display_string(2.0, 6), "2");
        assert_eq!(to_display_string(0.05, 6), "0.05");
        assert_eq!(to_display_string(2000.0, 6), "2000");
        assert_eq!(to_display_string(0.1234567, 6), "0.123457");
    }

    #[test]
    fn display_string_without_fraction_keeps_integer_digits() {
        // decimals=0 renders no point, so nothing may be stripped
        assert_eq!(to_display_string(2000.0, 0), "2000");
        assert_eq!(to_display_string(100.0, 0), "100");
    }

    #[test]
    fn price_formatting_groups_thousands() {
        assert_eq!(format_price(20000.0), "20,000.00");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
        assert_eq!(format_price(999.5), "999.50");
        assert_eq!(format_price(-1200.0), "-1,200.00");
        assert_eq!(format_price(f64::NAN), "NaN");
    }

    #[test]
    fn quantity_formatting_uses_six_digits() {
        assert_eq!(format_quantity(0.1), "0.100000");
        assert_eq!(format_quantity(1500.25), "1,500.250000");
    }
}
