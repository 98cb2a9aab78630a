//! Conversions between unscaled values and integers, binary floating point
//! and decimal text.

use alloc::string::String;
use core::fmt;

use crate::scale::POW10;
use crate::wide;
use crate::{DecimalArithmetic, DecimalError, Result, TruncatedPart};

/// Significand bits of an `f64`, including the implicit leading one.
const F64_PRECISION: u32 = 53;
/// Significand bits of an `f32`, including the implicit leading one.
const F32_PRECISION: u32 = 24;

// ============================================================================
// Integer Conversions
// ============================================================================

impl DecimalArithmetic {
    /// Unscaled value of the integer `value`.
    #[inline]
    pub const fn from_long(&self, value: i64) -> Result<i64> {
        if self.is_checked() && !self.scale_metrics().is_valid_integer_value(value) {
            return Err(DecimalError::Overflow);
        }
        Ok(self.scale_metrics().multiply_by_scale_factor(value))
    }

    /// Converts `unscaled` given at `scale` to this engine's scale, rounding
    /// if digits are dropped.
    #[inline]
    pub fn from_unscaled(&self, unscaled: i64, scale: i32) -> Result<i64> {
        self.scale_by_power_of_10(unscaled, self.scale() as i64 - scale as i64)
    }

    /// Integer part of `u`, rounded with the engine's rounding mode.
    pub const fn to_long(&self, u: i64) -> Result<i64> {
        let one = self.one() as u64;
        let magnitude = u.unsigned_abs();
        self.round_quotient(
            u < 0,
            (magnitude / one) as u128,
            (magnitude % one) as u128,
            one as u128,
        )
    }
}

// ============================================================================
// Floating Point Conversions
// ============================================================================

impl DecimalArithmetic {
    /// Unscaled value of `value`, rounded.
    ///
    /// The conversion is exact with respect to the binary value of `value`;
    /// `0.1` is treated as `0.1000000000000000055511151231257827...`.
    ///
    /// # Errors
    /// Returns `DecimalError::NotFinite` for NaN and infinite values.
    pub fn from_double(&self, value: f64) -> Result<i64> {
        if !value.is_finite() {
            return Err(DecimalError::NotFinite);
        }
        let bits = value.to_bits();
        let biased = ((bits >> 52) & 0x7FF) as i32;
        let fraction = bits & ((1 << 52) - 1);
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | 1 << 52, biased - 1075)
        };
        self.from_binary(bits >> 63 != 0, mantissa, exponent)
    }

    /// Unscaled value of `value`, rounded.
    ///
    /// # Errors
    /// Returns `DecimalError::NotFinite` for NaN and infinite values.
    pub fn from_float(&self, value: f32) -> Result<i64> {
        if !value.is_finite() {
            return Err(DecimalError::NotFinite);
        }
        let bits = value.to_bits();
        let biased = ((bits >> 23) & 0xFF) as i32;
        let fraction = (bits & ((1 << 23) - 1)) as u64;
        let (mantissa, exponent) = if biased == 0 {
            (fraction, -149)
        } else {
            (fraction | 1 << 23, biased - 150)
        };
        self.from_binary(bits >> 31 != 0, mantissa, exponent)
    }

    /// Unscaled value of `±mantissa * 2^exponent` with `mantissa < 2^53`.
    fn from_binary(&self, negative: bool, mantissa: u64, exponent: i32) -> Result<i64> {
        if mantissa == 0 {
            return Ok(0);
        }

        // below 2^113, so the scaled mantissa itself never overflows
        let scaled = mantissa as u128 * self.one() as u128;

        if exponent >= 0 {
            let shift = exponent as u32;
            if shift < scaled.leading_zeros() {
                return self.signed(negative, scaled << shift);
            }
            if self.is_checked() {
                return Err(DecimalError::Overflow);
            }
            return Ok(if shift >= 128 {
                0
            } else {
                wide::wrap_signed(negative, scaled << shift)
            });
        }

        let shift = exponent.unsigned_abs();
        if shift >= 128 {
            // scaled < 2^113 stays below half of 2^127
            return self.round_quotient(negative, 0, scaled, 1 << 127);
        }
        let divisor = 1u128 << shift;
        self.round_quotient(negative, scaled >> shift, scaled & (divisor - 1), divisor)
    }

    /// Nearest `f64` to `u`, rounded with the engine's rounding mode.
    ///
    /// # Errors
    /// Returns `DecimalError::RoundingNecessary` for `Unnecessary` if `u` has
    /// no exact binary representation.
    pub fn to_double(&self, u: i64) -> Result<f64> {
        if u == 0 {
            return Ok(0.0);
        }
        let (mantissa, exponent) = self.to_binary(u, F64_PRECISION)?;
        // exponent stays within [-112, 11]
        let power = f64::from_bits(((exponent + 1023) as u64) << 52);
        let magnitude = mantissa as f64 * power;
        Ok(if u < 0 { -magnitude } else { magnitude })
    }

    /// Nearest `f32` to `u`, rounded with the engine's rounding mode.
    ///
    /// # Errors
    /// Returns `DecimalError::RoundingNecessary` for `Unnecessary` if `u` has
    /// no exact binary representation.
    pub fn to_float(&self, u: i64) -> Result<f32> {
        if u == 0 {
            return Ok(0.0);
        }
        let (mantissa, exponent) = self.to_binary(u, F32_PRECISION)?;
        // exponent stays within [-83, 40]
        let power = f32::from_bits(((exponent + 127) as u32) << 23);
        let magnitude = mantissa as f32 * power;
        Ok(if u < 0 { -magnitude } else { magnitude })
    }

    /// Rounds `|u| / 10^scale` to `precision` significant bits, returning
    /// `(mantissa, exponent)` with the value `mantissa * 2^exponent`.
    ///
    /// `mantissa` has `precision` bits, or `precision + 1` bits after
    /// rounding up to the next power of two.
    fn to_binary(&self, u: i64, precision: u32) -> Result<(u64, i32)> {
        let numerator = u.unsigned_abs() as u128;
        let denominator = self.one() as u128;
        let numerator_bits = (128 - numerator.leading_zeros()) as i32;
        let denominator_bits = (128 - denominator.leading_zeros()) as i32;

        // the quotient numerator * 2^shift / denominator lies in
        // [2^precision, 2^(precision + 2))
        let shift = precision as i32 - (numerator_bits - denominator_bits) + 1;
        let (quotient, sticky) = if shift >= 0 {
            let scaled = numerator << shift;
            (scaled / denominator, scaled % denominator != 0)
        } else {
            let scaled = denominator << -shift;
            (numerator / scaled, numerator % scaled != 0)
        };

        let extra = (128 - quotient.leading_zeros()) - precision;
        let half = 1u128 << (extra - 1);
        let dropped = quotient & ((1 << extra) - 1);
        let part = if dropped == 0 && !sticky {
            TruncatedPart::Zero
        } else if dropped < half {
            TruncatedPart::LessThanHalf
        } else if dropped == half && !sticky {
            TruncatedPart::EqualToHalf
        } else {
            TruncatedPart::GreaterThanHalf
        };

        let mantissa = (quotient >> extra) as u64;
        let away = self
            .rounding_mode()
            .rounding_increment(u < 0, mantissa & 1 == 1, part)?;
        Ok((mantissa + away as u64, extra as i32 - shift))
    }
}

// ============================================================================
// Parsing
// ============================================================================

impl DecimalArithmetic {
    /// Parses a plain decimal string such as `-12.340`, `+5`, `.5` or `5.`.
    ///
    /// Fraction digits beyond the scale are rounded with the engine's
    /// rounding mode.
    ///
    /// # Errors
    /// Returns `DecimalError::InvalidFormat` for anything but an optional
    /// sign, digits and at most one decimal point with at least one digit,
    /// and `DecimalError::Overflow` in checked mode if the value does not fit.
    pub fn parse(&self, s: &str) -> Result<i64> {
        let bytes = s.as_bytes();
        let (negative, digits) = match bytes.split_first() {
            Some((&b'-', rest)) => (true, rest),
            Some((&b'+', rest)) => (false, rest),
            _ => (false, bytes),
        };
        let (integer_digits, fraction_digits) = match digits.iter().position(|&b| b == b'.') {
            Some(point) => (&digits[..point], &digits[point + 1..]),
            None => (digits, &digits[digits.len()..]),
        };
        if integer_digits.is_empty() && fraction_digits.is_empty() {
            return Err(DecimalError::InvalidFormat);
        }
        if !integer_digits.iter().chain(fraction_digits).all(u8::is_ascii_digit) {
            return Err(DecimalError::InvalidFormat);
        }

        let mut integer = 0u64;
        let mut integer_overflow = false;
        for &b in integer_digits {
            let digit = (b - b'0') as u64;
            integer = match integer.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => {
                    integer_overflow = true;
                    integer.wrapping_mul(10).wrapping_add(digit)
                }
            };
        }

        let scale = self.scale() as usize;
        let kept = fraction_digits.len().min(scale);
        let mut fraction = 0u64;
        for &b in &fraction_digits[..kept] {
            fraction = fraction * 10 + (b - b'0') as u64;
        }
        fraction *= POW10[scale - kept];

        let part = match fraction_digits[kept..].split_first() {
            Some((&first, rest)) => {
                TruncatedPart::of_digit(first - b'0', rest.iter().any(|&b| b != b'0'))
            }
            None => TruncatedPart::Zero,
        };

        let magnitude = if integer_overflow {
            if self.is_checked() {
                return Err(DecimalError::Overflow);
            }
            integer
                .wrapping_mul(self.one() as u64)
                .wrapping_add(fraction) as u128
        } else {
            integer as u128 * self.one() as u128 + fraction as u128
        };

        let away = self
            .rounding_mode()
            .rounding_increment(negative, magnitude & 1 == 1, part)?;
        self.signed(negative, magnitude + away as u128)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Sign, point and at most 20 digits.
const MAX_STR_LEN: usize = 24;

impl DecimalArithmetic {
    /// Writes `u` as a plain decimal string: sign, integer part and, for a
    /// positive scale, a point followed by exactly `scale` fraction digits.
    pub fn write_to<W: fmt::Write>(&self, u: i64, out: &mut W) -> fmt::Result {
        let mut buf = [0u8; MAX_STR_LEN];
        let mut pos = MAX_STR_LEN;

        let one = self.one() as u64;
        let magnitude = u.unsigned_abs();
        let mut integer = magnitude / one;
        let mut fraction = magnitude % one;

        if self.scale() > 0 {
            for _ in 0..self.scale() {
                pos -= 1;
                buf[pos] = b'0' + (fraction % 10) as u8;
                fraction /= 10;
            }
            pos -= 1;
            buf[pos] = b'.';
        }

        loop {
            pos -= 1;
            buf[pos] = b'0' + (integer % 10) as u8;
            integer /= 10;
            if integer == 0 {
                break;
            }
        }

        if u < 0 {
            pos -= 1;
            buf[pos] = b'-';
        }

        // only ASCII digits, '.' and '-' were written
        match core::str::from_utf8(&buf[pos..]) {
            Ok(s) => out.write_str(s),
            Err(_) => Err(fmt::Error),
        }
    }

    /// Plain decimal string of `u`, e.g. `-12.340` at scale 3.
    pub fn to_string(&self, u: i64) -> String {
        let mut out = String::with_capacity(MAX_STR_LEN);
        // fmt::Write for String never fails
        let _ = self.write_to(u, &mut out);
        out
    }

    /// Adapter implementing `Display` for `u` at this engine's scale.
    #[inline]
    pub const fn display(&self, u: i64) -> UnscaledDisplay {
        UnscaledDisplay {
            arith: *self,
            unscaled: u,
        }
    }
}

/// `Display` for an unscaled value, created by [`DecimalArithmetic::display`].
#[derive(Copy, Clone, Debug)]
pub struct UnscaledDisplay {
    arith: DecimalArithmetic,
    unscaled: i64,
}

impl fmt::Display for UnscaledDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.arith.write_to(self.unscaled, f)
    }
}

#[cfg(test)]
mod convert_tests {
    use std::format;

    use super::*;
    use crate::{OverflowMode, RoundingMode};

    fn checked(scale: i32, rounding: RoundingMode) -> DecimalArithmetic {
        DecimalArithmetic::new(scale, rounding, OverflowMode::Checked).unwrap()
    }

    fn unchecked(scale: i32, rounding: RoundingMode) -> DecimalArithmetic {
        DecimalArithmetic::new(scale, rounding, OverflowMode::Unchecked).unwrap()
    }

    #[test]
    fn test_from_long() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.from_long(-12), Ok(-1_200));
        assert_eq!(c.from_long(i64::MAX / 100), Ok(i64::MAX / 100 * 100));
        assert_eq!(c.from_long(i64::MAX / 100 + 1), Err(DecimalError::Overflow));
        assert_eq!(checked(18, RoundingMode::HalfUp).from_long(-10), Err(DecimalError::Overflow));
        assert_eq!(
            unchecked(18, RoundingMode::HalfUp).from_long(10),
            Ok(10i64.wrapping_mul(1_000_000_000_000_000_000))
        );
        assert_eq!(checked(0, RoundingMode::HalfUp).from_long(i64::MIN), Ok(i64::MIN));
    }

    #[test]
    fn test_from_unscaled() {
        let c = checked(3, RoundingMode::HalfUp);
        assert_eq!(c.from_unscaled(12, 1), Ok(1_200));
        assert_eq!(c.from_unscaled(12_345, 3), Ok(12_345));
        assert_eq!(c.from_unscaled(123_456, 5), Ok(1_235));
        assert_eq!(c.from_unscaled(-123_456, 5), Ok(-1_235));
        assert_eq!(c.from_unscaled(7, -2), Ok(700_000));
        assert_eq!(c.from_unscaled(1, -30), Err(DecimalError::Overflow));
        assert_eq!(
            checked(3, RoundingMode::Unnecessary).from_unscaled(123_456, 5),
            Err(DecimalError::RoundingNecessary)
        );
    }

    #[test]
    fn test_to_long() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.to_long(1_250), Ok(13));
        assert_eq!(c.to_long(-1_250), Ok(-13));
        assert_eq!(c.to_long(1_249), Ok(12));
        assert_eq!(checked(2, RoundingMode::Down).to_long(-1_299), Ok(-12));
        assert_eq!(checked(2, RoundingMode::Floor).to_long(-1_201), Ok(-13));
        assert_eq!(checked(0, RoundingMode::Floor).to_long(i64::MIN), Ok(i64::MIN));
        assert_eq!(checked(18, RoundingMode::HalfUp).to_long(i64::MIN), Ok(-9));
    }

    #[test]
    fn test_from_double() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.from_double(1.5), Ok(150));
        assert_eq!(c.from_double(-1.5), Ok(-150));
        assert_eq!(c.from_double(0.0), Ok(0));
        assert_eq!(c.from_double(-0.0), Ok(0));
        // 0.125 is exact in binary
        assert_eq!(c.from_double(0.125), Ok(13));
        assert_eq!(checked(2, RoundingMode::HalfEven).from_double(0.125), Ok(12));
        // 0.1 is slightly above one tenth
        assert_eq!(
            checked(1, RoundingMode::Unnecessary).from_double(0.1),
            Err(DecimalError::RoundingNecessary)
        );
        assert_eq!(checked(1, RoundingMode::Down).from_double(0.1), Ok(1));
        assert_eq!(checked(1, RoundingMode::Up).from_double(0.1), Ok(2));
        assert_eq!(c.from_double(f64::MIN_POSITIVE), Ok(0));
        assert_eq!(checked(2, RoundingMode::Up).from_double(-f64::from_bits(1)), Ok(-1));
    }

    #[test]
    fn test_from_double_rejects_non_finite() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.from_double(f64::NAN), Err(DecimalError::NotFinite));
        assert_eq!(c.from_double(f64::INFINITY), Err(DecimalError::NotFinite));
        assert_eq!(c.from_float(f32::NEG_INFINITY), Err(DecimalError::NotFinite));
    }

    #[test]
    fn test_from_double_overflow() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.from_double(1e17), Err(DecimalError::Overflow));
        assert_eq!(c.from_double(f64::MAX), Err(DecimalError::Overflow));
        assert_eq!(c.from_double(9.0e16), Ok(9_000_000_000_000_000_000));
        assert_eq!(
            checked(0, RoundingMode::HalfUp).from_double(-9_223_372_036_854_775_808.0),
            Ok(i64::MIN)
        );
        let u = unchecked(0, RoundingMode::HalfUp);
        assert_eq!(u.from_double(18_446_744_073_709_551_616.0), Ok(0));
        assert_eq!(u.from_double(f64::MAX), Ok(0));
        assert_eq!(u.from_double(9_223_372_036_854_775_808.0), Ok(i64::MIN));
    }

    #[test]
    fn test_from_float() {
        let c = checked(3, RoundingMode::HalfUp);
        assert_eq!(c.from_float(2.75), Ok(2_750));
        assert_eq!(c.from_float(-0.5), Ok(-500));
        // 0.1f32 = 0.100000001490116...
        assert_eq!(c.from_float(0.1), Ok(100));
        assert_eq!(checked(3, RoundingMode::Up).from_float(0.1), Ok(101));
        assert_eq!(checked(0, RoundingMode::HalfUp).from_float(16_777_216.0), Ok(16_777_216));
    }

    #[test]
    fn test_to_double() {
        let c = checked(2, RoundingMode::HalfEven);
        assert_eq!(c.to_double(150), Ok(1.5));
        assert_eq!(c.to_double(-150), Ok(-1.5));
        assert_eq!(c.to_double(0), Ok(0.0));
        assert_eq!(c.to_double(1), Ok(0.01));
        assert_eq!(c.to_double(12_345), Ok(123.45));
        assert_eq!(checked(18, RoundingMode::HalfEven).to_double(100_000_000_000_000_000), Ok(0.1));
        assert_eq!(
            checked(0, RoundingMode::HalfEven).to_double(i64::MIN),
            Ok(-9_223_372_036_854_775_808.0)
        );
        assert_eq!(
            checked(0, RoundingMode::HalfEven).to_double(i64::MAX),
            Ok(9_223_372_036_854_775_808.0)
        );
        assert_eq!(checked(18, RoundingMode::HalfEven).to_double(1), Ok(1e-18));
    }

    #[test]
    fn test_to_double_rounding_modes() {
        // 2^53 + 1 is halfway between two doubles
        let value = (1i64 << 53) + 1;
        assert_eq!(
            checked(0, RoundingMode::HalfEven).to_double(value),
            Ok(9_007_199_254_740_992.0)
        );
        assert_eq!(checked(0, RoundingMode::HalfUp).to_double(value), Ok(9_007_199_254_740_994.0));
        assert_eq!(checked(0, RoundingMode::Floor).to_double(-value), Ok(-9_007_199_254_740_994.0));
        assert_eq!(
            checked(0, RoundingMode::Unnecessary).to_double(value),
            Err(DecimalError::RoundingNecessary)
        );
        assert_eq!(
            checked(0, RoundingMode::Unnecessary).to_double(1 << 53),
            Ok(9_007_199_254_740_992.0)
        );
        assert_eq!(
            checked(1, RoundingMode::Unnecessary).to_double(1),
            Err(DecimalError::RoundingNecessary)
        );
        assert_eq!(checked(1, RoundingMode::Unnecessary).to_double(5), Ok(0.5));
    }

    #[test]
    fn test_to_float() {
        let c = checked(3, RoundingMode::HalfEven);
        assert_eq!(c.to_float(2_750), Ok(2.75));
        assert_eq!(c.to_float(-100), Ok(-0.1));
        assert_eq!(checked(0, RoundingMode::HalfEven).to_float(16_777_217), Ok(16_777_216.0));
        assert_eq!(checked(0, RoundingMode::Up).to_float(16_777_217), Ok(16_777_218.0));
        assert_eq!(
            checked(0, RoundingMode::HalfEven).to_float(i64::MAX),
            Ok(9_223_372_036_854_775_808.0)
        );
    }

    #[test]
    fn test_double_roundtrip() {
        let c = checked(6, RoundingMode::HalfEven);
        for u in [1, -1, 123_456_789, -987_654_321_012, 1_000_000, 123_456_789_012_345] {
            let d = c.to_double(u).unwrap();
            assert_eq!(c.from_double(d), Ok(u), "{u} -> {d}");
        }
    }

    #[test]
    fn test_parse() {
        let c = checked(3, RoundingMode::HalfUp);
        assert_eq!(c.parse("-12.340"), Ok(-12_340));
        assert_eq!(c.parse("12.34"), Ok(12_340));
        assert_eq!(c.parse("+7"), Ok(7_000));
        assert_eq!(c.parse(".5"), Ok(500));
        assert_eq!(c.parse("5."), Ok(5_000));
        assert_eq!(c.parse("-0"), Ok(0));
        assert_eq!(c.parse("0000000000000000000000000001.000"), Ok(1_000));
        assert_eq!(c.parse("9223372036854775.807"), Ok(i64::MAX));
        assert_eq!(c.parse("-9223372036854775.808"), Ok(i64::MIN));
        assert_eq!(c.parse("9223372036854775.808"), Err(DecimalError::Overflow));
    }

    #[test]
    fn test_parse_rounds_excess_digits() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(c.parse("1.005"), Ok(101));
        assert_eq!(c.parse("-1.005"), Ok(-101));
        assert_eq!(c.parse("1.00499999"), Ok(100));
        assert_eq!(c.parse("1.0050000"), Ok(101));
        assert_eq!(checked(2, RoundingMode::HalfEven).parse("1.005"), Ok(100));
        assert_eq!(checked(2, RoundingMode::HalfEven).parse("1.0050001"), Ok(101));
        assert_eq!(checked(2, RoundingMode::Unnecessary).parse("1.0100"), Ok(101));
        assert_eq!(
            checked(2, RoundingMode::Unnecessary).parse("1.011"),
            Err(DecimalError::RoundingNecessary)
        );
        assert_eq!(checked(0, RoundingMode::HalfEven).parse("2.5"), Ok(2));
        assert_eq!(checked(0, RoundingMode::HalfEven).parse("3.5"), Ok(4));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let c = checked(2, RoundingMode::HalfUp);
        for s in ["", "-", "+", ".", "-.", "1.2.3", "1e5", " 1", "1 ", "+-1", "1,5", "0x10", "١"] {
            assert_eq!(c.parse(s), Err(DecimalError::InvalidFormat), "{s:?}");
        }
    }

    #[test]
    fn test_parse_unchecked_wraps() {
        let u = unchecked(0, RoundingMode::HalfUp);
        assert_eq!(u.parse("9223372036854775808"), Ok(i64::MIN));
        assert_eq!(u.parse("18446744073709551617"), Ok(1));
        assert_eq!(u.parse("-18446744073709551617"), Ok(-1));
        assert_eq!(
            checked(0, RoundingMode::HalfUp).parse("18446744073709551617"),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_to_string() {
        let c = checked(3, RoundingMode::HalfUp);
        assert_eq!(c.to_string(-12_340), "-12.340");
        assert_eq!(c.to_string(5), "0.005");
        assert_eq!(c.to_string(-5), "-0.005");
        assert_eq!(c.to_string(0), "0.000");
        assert_eq!(checked(0, RoundingMode::HalfUp).to_string(-42), "-42");
        assert_eq!(checked(0, RoundingMode::HalfUp).to_string(i64::MIN), "-9223372036854775808");
        assert_eq!(checked(18, RoundingMode::HalfUp).to_string(i64::MIN), "-9.223372036854775808");
        assert_eq!(checked(18, RoundingMode::HalfUp).to_string(1), "0.000000000000000001");
    }

    #[test]
    fn test_display_adapter() {
        let c = checked(2, RoundingMode::HalfUp);
        assert_eq!(format!("[{}]", c.display(-1_999)), "[-19.99]");
        let mut out = String::new();
        c.write_to(7, &mut out).unwrap();
        assert_eq!(out, "0.07");
    }

    #[test]
    fn test_parse_to_string_roundtrip() {
        for scale in 0..=18 {
            let c = checked(scale, RoundingMode::Unnecessary);
            for u in [0, 1, -1, 42, -123_456_789, i64::MAX, i64::MIN] {
                assert_eq!(c.parse(&c.to_string(u)), Ok(u), "scale {scale} u {u}");
            }
        }
    }
}
