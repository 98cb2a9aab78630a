//! Conversions to and from arbitrary-precision integers and decimals.
//!
//! These are the only engine operations that allocate.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{DecimalArithmetic, DecimalError, Result, TruncatedPart};

/// Low 64 bits of the two's complement representation of `value`.
fn low_i64(value: &BigInt) -> i64 {
    let bytes = value.to_signed_bytes_le();
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0 };
    let mut word = [fill; 8];
    for (dst, src) in word.iter_mut().zip(&bytes) {
        *dst = *src;
    }
    i64::from_le_bytes(word)
}

fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exponent as usize)
}

impl DecimalArithmetic {
    /// Unscaled value of the integer `value`.
    ///
    /// # Errors
    /// Returns `DecimalError::Overflow` in checked mode if `value` does not
    /// fit at this scale.
    pub fn from_big_integer(&self, value: &BigInt) -> Result<i64> {
        match value.to_i64() {
            Some(v) => self.from_long(v),
            None if self.is_checked() => Err(DecimalError::Overflow),
            None => Ok(low_i64(&(value * BigInt::from(self.one())))),
        }
    }

    /// Unscaled value of `value`, rounded to this engine's scale.
    ///
    /// # Errors
    /// Returns `DecimalError::Overflow` in checked mode if the rounded value
    /// does not fit, and `DecimalError::RoundingNecessary` for `Unnecessary`
    /// if digits are dropped.
    pub fn from_big_decimal(&self, value: &BigDecimal) -> Result<i64> {
        // value = digits * 10^-exponent
        let (digits, exponent) = value.as_bigint_and_exponent();
        if digits.is_zero() {
            return Ok(0);
        }
        let shift = self.scale() as i128 - exponent as i128;

        if shift >= 0 {
            // |digits| * 10^20 exceeds the i64 range; 10^64 is divisible by 2^64
            if self.is_checked() && shift > 19 {
                return Err(DecimalError::Overflow);
            }
            if shift >= 64 {
                return Ok(0);
            }
            let scaled = digits * pow10(shift as u32);
            return match scaled.to_i64() {
                Some(v) => Ok(v),
                None if self.is_checked() => Err(DecimalError::Overflow),
                None => Ok(low_i64(&scaled)),
            };
        }

        let negative = digits.is_negative();
        let magnitude = digits.abs();
        let dropped_digits = shift.unsigned_abs();

        // 2^bits <= 10^(dropped_digits - 1) keeps |digits| below half of 10^dropped_digits
        let (quotient, part) = if dropped_digits > (magnitude.bits() / 3 + 1) as u128 {
            (BigInt::zero(), TruncatedPart::LessThanHalf)
        } else {
            let divisor = pow10(dropped_digits as u32);
            let (quotient, remainder) = magnitude.div_rem(&divisor);
            let part = if remainder.is_zero() {
                TruncatedPart::Zero
            } else {
                match (&remainder << 1usize).cmp(&divisor) {
                    core::cmp::Ordering::Less => TruncatedPart::LessThanHalf,
                    core::cmp::Ordering::Equal => TruncatedPart::EqualToHalf,
                    core::cmp::Ordering::Greater => TruncatedPart::GreaterThanHalf,
                }
            };
            (quotient, part)
        };

        let away = self
            .rounding_mode()
            .rounding_increment(negative, quotient.is_odd(), part)?;
        let rounded = if away { quotient + 1u8 } else { quotient };

        match rounded.to_u128() {
            Some(magnitude) => self.signed(negative, magnitude),
            None if self.is_checked() => Err(DecimalError::Overflow),
            None => Ok(crate::wide::wrap_signed(negative, low_i64(&rounded) as u64 as u128)),
        }
    }

    /// `u` as a big decimal carrying this engine's scale.
    pub fn to_big_decimal(&self, u: i64) -> BigDecimal {
        BigDecimal::new(BigInt::from(u), self.scale() as i64)
    }

    /// `u` as a big decimal with the given `scale`, rounding with the
    /// engine's rounding mode if `scale` is below the engine's scale.
    ///
    /// A `scale` above the engine's scale appends trailing zeros to the
    /// digits: the result holds about `scale` digits, so time and memory grow
    /// linearly with it. Narrowing never allocates more than `u` itself.
    ///
    /// # Errors
    /// Returns `DecimalError::RoundingNecessary` for `Unnecessary` if digits
    /// are dropped.
    pub fn to_big_decimal_with_scale(&self, u: i64, scale: i32) -> Result<BigDecimal> {
        let own = self.scale() as i32;
        if scale >= own {
            let digits = BigInt::from(u) * pow10((scale - own) as u32);
            return Ok(BigDecimal::new(digits, scale as i64));
        }
        let rounded = self.scale_by_power_of_10(u, scale as i64 - own as i64)?;
        Ok(BigDecimal::new(BigInt::from(rounded), scale as i64))
    }

    /// Integer part of `u`, rounded like [`to_long`](Self::to_long).
    pub fn to_big_integer(&self, u: i64) -> Result<BigInt> {
        Ok(BigInt::from(self.to_long(u)?))
    }
}
