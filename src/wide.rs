//! 128-bit helper math.
//!
//! Pure integer building blocks with no knowledge of scales or rounding
//! modes: full 64x64 bit products, 128-by-64 bit division and overflow
//! predicates that are evaluated before a result is committed.

use crate::{DecimalError, Result};

// ============================================================================
// 128-bit Products and Quotients
// ============================================================================

/// Joins a high and a low 64-bit word into one 128-bit value.
#[inline(always)]
pub const fn join(hi: u64, lo: u64) -> u128 {
    ((hi as u128) << 64) | lo as u128
}

/// Splits a 128-bit value into its high and low 64-bit words.
#[inline(always)]
pub const fn split(value: u128) -> (u64, u64) {
    ((value >> 64) as u64, value as u64)
}

/// Multiplies two unsigned 64-bit values, returning the 128-bit product as
/// `(hi, lo)`.
#[inline(always)]
pub const fn mul_hi_lo(a: u64, b: u64) -> (u64, u64) {
    split(a as u128 * b as u128)
}

/// Divides the unsigned 128-bit value `hi:lo` by `divisor`.
///
/// Returns `(quotient, remainder)`.
///
/// # Errors
/// Returns `DecimalError::DivisionByZero` if `divisor` is zero and
/// `DecimalError::Overflow` if the quotient does not fit into 64 bits.
#[inline]
pub const fn div_128_by_64(hi: u64, lo: u64, divisor: u64) -> Result<(u64, u64)> {
    if divisor == 0 {
        return Err(DecimalError::DivisionByZero);
    }

    // quotient fits iff the high word is below the divisor
    if hi >= divisor {
        return Err(DecimalError::Overflow);
    }

    if hi == 0 {
        return Ok((lo / divisor, lo % divisor));
    }

    let dividend = join(hi, lo);
    let divisor = divisor as u128;
    Ok(((dividend / divisor) as u64, (dividend % divisor) as u64))
}

// ============================================================================
// Overflow Predicates
// ============================================================================

/// Returns `true` if `a + b` overflows the signed 64-bit range.
#[inline(always)]
pub const fn is_add_overflow(a: i64, b: i64) -> bool {
    let sum = a.wrapping_add(b);
    // both operands have the same sign and the sum's sign differs
    ((a ^ sum) & (b ^ sum)) < 0
}

/// Returns `true` if `a - b` overflows the signed 64-bit range.
#[inline(always)]
pub const fn is_sub_overflow(a: i64, b: i64) -> bool {
    let diff = a.wrapping_sub(b);
    ((a ^ b) & (a ^ diff)) < 0
}

/// Returns `true` if `a * b` overflows the signed 64-bit range.
#[inline(always)]
pub const fn is_mul_overflow(a: i64, b: i64) -> bool {
    let product = a as i128 * b as i128;
    product > i64::MAX as i128 || product < i64::MIN as i128
}

/// Returns `true` if shifting `value` left by `n` bits loses significant bits
/// (including the sign bit).
#[inline(always)]
pub const fn is_shl_overflow(value: i64, n: u32) -> bool {
    if value == 0 {
        return false;
    }
    if n >= 64 {
        return true;
    }
    // significant bits are all bits except the redundant leading sign copies
    let redundant = if value < 0 {
        value.leading_ones()
    } else {
        value.leading_zeros()
    };
    n >= redundant
}

/// Returns `true` if the magnitude fits into an `i64` carrying the given sign.
///
/// A negative result can hold one more unit than a positive one, namely
/// `i64::MIN`.
#[inline(always)]
pub const fn fits_i64(negative: bool, magnitude: u128) -> bool {
    if negative {
        magnitude <= i64::MIN.unsigned_abs() as u128
    } else {
        magnitude <= i64::MAX as u128
    }
}

/// Applies a sign to a magnitude, wrapping to the low 64 bits of the exact
/// two's-complement result.
#[inline(always)]
pub const fn wrap_signed(negative: bool, magnitude: u128) -> i64 {
    let low = magnitude as u64 as i64;
    if negative { low.wrapping_neg() } else { low }
}

#[cfg(test)]
mod wide_tests {
    use super::*;

    #[test]
    fn test_mul_hi_lo_small() {
        assert_eq!(mul_hi_lo(3, 7), (0, 21));
        assert_eq!(mul_hi_lo(0, u64::MAX), (0, 0));
    }

    #[test]
    fn test_mul_hi_lo_max() {
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        assert_eq!(mul_hi_lo(u64::MAX, u64::MAX), (u64::MAX - 1, 1));
    }

    #[test]
    fn test_mul_hi_lo_carry() {
        assert_eq!(mul_hi_lo(1 << 32, 1 << 32), (1, 0));
        assert_eq!(mul_hi_lo(u64::MAX, 2), (1, u64::MAX - 1));
    }

    #[test]
    fn test_div_128_by_64_fits() {
        let (hi, lo) = mul_hi_lo(123_456_789_012, 987_654_321);
        assert_eq!(div_128_by_64(hi, lo, 987_654_321), Ok((123_456_789_012, 0)));
        assert_eq!(div_128_by_64(0, 100, 7), Ok((14, 2)));
    }

    #[test]
    fn test_div_128_by_64_large_dividend() {
        // (2^64 + 5) / 2 = 2^63 + 2 remainder 1
        assert_eq!(div_128_by_64(1, 5, 2), Ok(((1 << 63) + 2, 1)));
    }

    #[test]
    fn test_div_128_by_64_overflow() {
        assert_eq!(div_128_by_64(1, 0, 1), Err(DecimalError::Overflow));
        assert_eq!(div_128_by_64(5, 0, 5), Err(DecimalError::Overflow));
        assert!(div_128_by_64(4, u64::MAX, 5).is_ok());
    }

    #[test]
    fn test_div_128_by_64_zero_divisor() {
        assert_eq!(div_128_by_64(0, 1, 0), Err(DecimalError::DivisionByZero));
    }

    #[test]
    fn test_add_sub_overflow() {
        assert!(is_add_overflow(i64::MAX, 1));
        assert!(is_add_overflow(i64::MIN, -1));
        assert!(!is_add_overflow(i64::MAX, -1));
        assert!(!is_add_overflow(i64::MIN, i64::MAX));
        assert!(is_sub_overflow(i64::MIN, 1));
        assert!(is_sub_overflow(0, i64::MIN));
        assert!(!is_sub_overflow(-1, i64::MIN));
    }

    #[test]
    fn test_mul_overflow() {
        assert!(is_mul_overflow(i64::MIN, -1));
        assert!(is_mul_overflow(1 << 32, 1 << 31));
        assert!(!is_mul_overflow(1 << 32, -(1 << 31)));
        assert!(!is_mul_overflow(i64::MAX, 1));
    }

    #[test]
    fn test_shl_overflow() {
        assert!(!is_shl_overflow(1, 62));
        assert!(is_shl_overflow(1, 63));
        assert!(!is_shl_overflow(-1, 63));
        assert!(is_shl_overflow(-1, 64));
        assert!(is_shl_overflow(-3, 62));
        assert!(!is_shl_overflow(0, 200));
        assert!(is_shl_overflow(i64::MAX, 1));
    }

    #[test]
    fn test_fits_and_wrap() {
        assert!(fits_i64(true, 1 << 63));
        assert!(!fits_i64(false, 1 << 63));
        assert_eq!(wrap_signed(true, 1 << 63), i64::MIN);
        assert_eq!(wrap_signed(false, 1 << 63), i64::MIN);
        assert_eq!(wrap_signed(true, 5), -5);
        assert_eq!(wrap_signed(false, (1u128 << 64) + 7), 7);
    }
}
