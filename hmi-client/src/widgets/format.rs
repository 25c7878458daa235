/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Number to text, matching what the browser pages have always shown.
//!
//! Operators compare these strings against the old JavaScript pages, so the
//! output follows `Number.prototype.toFixed` and `Number.prototype.toString`.

use crate::binding::{BindingConfig, ValueFormat};
use crate::constants::DEFAULT_PRECISION;

/// `toFixed` accepts 0..=100 digits.
const MAX_FIXED_PRECISION: usize = 100;

/// `toFixed` falls back to `String(x)` from here on.
const TO_FIXED_LIMIT: f64 = 1e21;

/// Enough fractional digits to print any f64 exactly (2^-1074 has 1074).
const EXACT_DIGITS: usize = 1100;

/// Renders `value` per the binding's format, then appends ` <unit>` if set.
pub fn format_value(config: &BindingConfig, value: f64) -> String {
    let mut text = format_number(config, value);
    if let Some(unit) = config.unit.as_deref().filter(|u| !u.is_empty()) {
        text.push(' ');
        text.push_str(unit);
    }
    text
}

/// Renders `value` per the binding's format, without the unit.
pub fn format_number(config: &BindingConfig, value: f64) -> String {
    match config.format {
        ValueFormat::Fixed => to_fixed(value, config.precision.unwrap_or(DEFAULT_PRECISION)),
        ValueFormat::Raw => js_number(value),
    }
}

/// `value.toFixed(precision)`: round to the nearest representable decimal,
/// with exact ties going away from zero. Magnitudes of 1e21 and above print
/// as `String(value)`.
pub fn to_fixed(value: f64, precision: usize) -> String {
    if !value.is_finite() || value.abs() >= TO_FIXED_LIMIT {
        return js_number(value);
    }
    let precision = precision.min(MAX_FIXED_PRECISION);
    // -0 prints as "0" in JavaScript.
    let value = if value == 0.0 { 0.0 } else { value };

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let rest = &frac_part[precision..];
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.precision$}");
    }

    // Rust rounds exact ties to even, so bump the truncated digits by hand.
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..precision].bytes())
        .collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let split = digits.len() - precision;
    let mut text = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|&b| b as char));
    if precision > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|&b| b as char));
    }
    text
}

/// `String(value)` for a JavaScript number.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rounds_instead_of_truncating() {
        assert_eq!(to_fixed(57.6, 0), "58");
        assert_eq!(to_fixed(225.4, 1), "225.4");
        assert_eq!(to_fixed(225.46, 1), "225.5");
        assert_eq!(to_fixed(3.0, 2), "3.00");
    }

    #[test]
    fn exact_ties_go_away_from_zero() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(9.5, 0), "10");
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        // 99.95 is stored as 99.95000000000000284...
        assert_eq!(to_fixed(99.95, 1), "100.0");
        // 0.15 is stored as 0.14999999999999999444...
        assert_eq!(to_fixed(0.15, 1), "0.1");
    }

    #[test]
    fn negative_zero_and_non_finite() {
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 1), "Infinity");
    }

    #[test]
    fn huge_magnitudes_print_like_string() {
        assert_eq!(to_fixed(1e21, 1), "1e+21");
        assert_eq!(to_fixed(-2.5e22, 0), "-2.5e+22");
        assert_eq!(to_fixed(9.9e20, 0), "990000000000000000000");
    }

    #[test]
    fn raw_numbers_print_like_javascript() {
        assert_eq!(js_number(58.0), "58");
        assert_eq!(js_number(225.4), "225.4");
        assert_eq!(js_number(-3.25), "-3.25");
        assert_eq!(js_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(1.5e-7), "1.5e-7");
        assert_eq!(js_number(-0.0), "0");
    }

    #[test]
    fn unit_is_appended_with_a_space() {
        let config = BindingConfig::label("smoker.temp").fixed(1).unit("°F");
        assert_eq!(format_value(&config, 225.4), "225.4 °F");

        let raw = BindingConfig::label("heater.1.pct").unit("%");
        assert_eq!(format_value(&raw, 40.0), "40 %");

        let empty_unit = BindingConfig::label("meat.temp").unit("");
        assert_eq!(format_value(&empty_unit, 147.5), "147.5");
    }

    #[test]
    fn fixed_without_precision_uses_one_decimal() {
        let mut config = BindingConfig::label("smoker.temp");
        config.format = ValueFormat::Fixed;
        assert_eq!(format_value(&config, 201.26), "201.3");
    }
}
