//! The arithmetic engine operating on unscaled `i64` values.
//!
//! A [`DecimalArithmetic`] binds one [`ScaleMetrics`] to one
//! [`TruncationPolicy`]. All operations take and return unscaled values; the
//! scale is implicit in the engine. Results match arbitrary-precision decimal
//! arithmetic rounded to the engine's scale with its rounding mode.
//!
//! The general paths work on unsigned magnitudes plus a sign: the exact
//! quotient is truncated, the remainder is classified against the divisor and
//! the rounding mode decides whether the magnitude moves away from zero. The
//! sign is applied last, either with a range check (checked mode) or by
//! wrapping to the low 64 bits (unchecked mode).

use core::cmp::Ordering;

use crate::scale::POW10;
use crate::special::{SpecialDivision, SpecialMultiplication};
use crate::wide;
use crate::{
    DecimalError, OverflowMode, Result, RoundingMode, ScaleMetrics, TruncatedPart, TruncationPolicy,
};

/// Arithmetic for one scale and one truncation policy.
///
/// Engines are small `Copy` values; obtain them with [`DecimalArithmetic::new`]
/// or from the per-scale table via [`ScaleMetrics::arithmetic`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalArithmetic {
    metrics: &'static ScaleMetrics,
    policy: TruncationPolicy,
}

// ============================================================================
// Construction and Introspection
// ============================================================================

impl DecimalArithmetic {
    /// Returns the engine for `scale` with the given rounding and overflow
    /// modes.
    ///
    /// # Errors
    /// Returns `DecimalError::ScaleOutOfRange` unless `0 <= scale <= 18`.
    pub fn new(scale: i32, rounding: RoundingMode, overflow: OverflowMode) -> Result<Self> {
        Self::with_policy(scale, TruncationPolicy::new(rounding, overflow))
    }

    /// Returns the engine for `scale` and a combined truncation policy.
    ///
    /// # Errors
    /// Returns `DecimalError::ScaleOutOfRange` unless `0 <= scale <= 18`.
    pub fn with_policy(scale: i32, policy: TruncationPolicy) -> Result<Self> {
        let metrics = match ScaleMetrics::of(scale) {
            Ok(metrics) => metrics,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(scale, %policy, "rejected decimal arithmetic scale");
                return Err(e);
            }
        };
        Ok(Self::with_metrics(metrics, policy))
    }

    pub(crate) fn with_metrics(metrics: &'static ScaleMetrics, policy: TruncationPolicy) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(scale = metrics.scale(), %policy, "decimal arithmetic selected");
        Self { metrics, policy }
    }

    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.metrics.scale()
    }

    #[inline(always)]
    pub const fn scale_metrics(&self) -> &'static ScaleMetrics {
        self.metrics
    }

    #[inline(always)]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.policy.rounding
    }

    #[inline(always)]
    pub const fn overflow_mode(&self) -> OverflowMode {
        self.policy.overflow
    }

    #[inline(always)]
    pub const fn truncation_policy(&self) -> TruncationPolicy {
        self.policy
    }

    /// The unscaled representation of one, `10^scale`.
    #[inline(always)]
    pub const fn one(&self) -> i64 {
        self.metrics.scale_factor()
    }

    #[inline(always)]
    pub(crate) const fn is_checked(&self) -> bool {
        self.policy.overflow.is_checked()
    }

    /// Returns `-1`, `0` or `1` depending on the sign of `u`.
    #[inline(always)]
    pub const fn signum(&self, u: i64) -> i32 {
        u.signum() as i32
    }

    /// Compares two unscaled values of this scale.
    #[inline(always)]
    pub fn compare(&self, u1: i64, u2: i64) -> Ordering {
        u1.cmp(&u2)
    }
}

// ============================================================================
// Sign Application and Rounding Helpers
// ============================================================================

impl DecimalArithmetic {
    /// Applies `negative` to `magnitude`, failing in checked mode if the result
    /// does not fit and wrapping otherwise.
    #[inline]
    pub(crate) const fn signed(&self, negative: bool, magnitude: u128) -> Result<i64> {
        if self.is_checked() && !wide::fits_i64(negative, magnitude) {
            return Err(DecimalError::Overflow);
        }
        Ok(wide::wrap_signed(negative, magnitude))
    }

    /// Rounds `quotient + remainder / divisor` and applies the sign.
    #[inline]
    pub(crate) const fn round_quotient(
        &self,
        negative: bool,
        quotient: u128,
        remainder: u128,
        divisor: u128,
    ) -> Result<i64> {
        match self
            .rounding_mode()
            .round_magnitude(negative, quotient, remainder, divisor)
        {
            Ok(magnitude) => self.signed(negative, magnitude),
            Err(e) => Err(e),
        }
    }

    /// Divides the unsigned 128-bit magnitude `hi:lo` by `divisor` with
    /// rounding.
    ///
    /// In unchecked mode a quotient wider than 64 bits is truncated to its low
    /// word, which keeps the low 64 bits of the rounded result intact.
    #[inline]
    fn divide_wide(&self, negative: bool, hi: u64, lo: u64, divisor: u64) -> Result<i64> {
        let (quotient, remainder) = match wide::div_128_by_64(hi, lo, divisor) {
            Ok(qr) => qr,
            Err(DecimalError::Overflow) if !self.is_checked() => {
                let dividend = wide::join(hi, lo);
                let divisor = divisor as u128;
                ((dividend / divisor) as u64, (dividend % divisor) as u64)
            }
            Err(e) => return Err(e),
        };
        self.round_quotient(negative, quotient as u128, remainder as u128, divisor as u128)
    }
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

impl DecimalArithmetic {
    #[inline]
    pub const fn add(&self, u1: i64, u2: i64) -> Result<i64> {
        if self.is_checked() && wide::is_add_overflow(u1, u2) {
            return Err(DecimalError::Overflow);
        }
        Ok(u1.wrapping_add(u2))
    }

    #[inline]
    pub const fn subtract(&self, u1: i64, u2: i64) -> Result<i64> {
        if self.is_checked() && wide::is_sub_overflow(u1, u2) {
            return Err(DecimalError::Overflow);
        }
        Ok(u1.wrapping_sub(u2))
    }

    /// `(u1 + u2) / 2`, rounded, without intermediate overflow.
    #[inline]
    pub const fn avg(&self, u1: i64, u2: i64) -> Result<i64> {
        let sum = u1 as i128 + u2 as i128;
        let magnitude = sum.unsigned_abs();
        self.round_quotient(sum < 0, magnitude >> 1, magnitude & 1, 2)
    }
}

// ============================================================================
// Sign Operations
// ============================================================================

impl DecimalArithmetic {
    #[inline]
    pub const fn negate(&self, u: i64) -> Result<i64> {
        if self.is_checked() && u == i64::MIN {
            return Err(DecimalError::Overflow);
        }
        Ok(u.wrapping_neg())
    }

    #[inline]
    pub const fn abs(&self, u: i64) -> Result<i64> {
        if u < 0 { self.negate(u) } else { Ok(u) }
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl DecimalArithmetic {
    /// Product of two unscaled values, rounded to the scale.
    pub fn multiply(&self, u1: i64, u2: i64) -> Result<i64> {
        match SpecialMultiplication::classify(self.one(), u1, u2) {
            Some(special) => special.multiply(self, u1, u2),
            None => self.multiply_wide(u1, u2),
        }
    }

    /// `u * u`, rounded to the scale.
    #[inline]
    pub fn square(&self, u: i64) -> Result<i64> {
        self.multiply_wide(u, u)
    }

    fn multiply_wide(&self, u1: i64, u2: i64) -> Result<i64> {
        let negative = (u1 < 0) != (u2 < 0);
        let (hi, lo) = wide::mul_hi_lo(u1.unsigned_abs(), u2.unsigned_abs());
        self.divide_wide(negative, hi, lo, self.one() as u64)
    }

    /// Product of an unscaled value with a plain integer; no rounding needed.
    #[inline]
    pub const fn multiply_by_long(&self, u: i64, factor: i64) -> Result<i64> {
        if self.is_checked() && wide::is_mul_overflow(u, factor) {
            return Err(DecimalError::Overflow);
        }
        Ok(u.wrapping_mul(factor))
    }

    /// `u * 10^n`; a negative `n` divides with rounding.
    #[inline]
    pub fn multiply_by_power_of_10(&self, u: i64, n: i32) -> Result<i64> {
        self.scale_by_power_of_10(u, n as i64)
    }

    /// `u / 10^n`, rounded; a negative `n` multiplies.
    #[inline]
    pub fn divide_by_power_of_10(&self, u: i64, n: i32) -> Result<i64> {
        self.scale_by_power_of_10(u, -(n as i64))
    }

    pub(crate) fn scale_by_power_of_10(&self, u: i64, n: i64) -> Result<i64> {
        if n == 0 || u == 0 {
            return Ok(u);
        }

        if n > 0 {
            if n <= 18 {
                return self.multiply_by_long(u, POW10[n as usize] as i64);
            }
            // |u| * 10^19 exceeds the i64 range for every non-zero u
            if self.is_checked() {
                return Err(DecimalError::Overflow);
            }
            let mut result = u;
            let mut remaining = n;
            while remaining > 0 && result != 0 {
                let step = if remaining > 18 { 18 } else { remaining };
                result = result.wrapping_mul(POW10[step as usize] as i64);
                remaining -= step;
            }
            return Ok(result);
        }

        let negative = u < 0;
        let magnitude = u.unsigned_abs() as u128;
        let k = n.unsigned_abs();
        if k <= 19 {
            let divisor = POW10[k as usize] as u128;
            self.round_quotient(negative, magnitude / divisor, magnitude % divisor, divisor)
        } else {
            // |u| < 2^63 is below half of 10^20, so only the sign and the
            // rounding mode matter
            let divisor = POW10[19] as u128 * 10;
            self.round_quotient(negative, 0, magnitude, divisor)
        }
    }
}

// ============================================================================
// Division
// ============================================================================

impl DecimalArithmetic {
    /// Quotient of two unscaled values, rounded to the scale.
    ///
    /// # Errors
    /// Returns `DecimalError::DivisionByZero` if `divisor` is zero, in either
    /// overflow mode.
    pub fn divide(&self, dividend: i64, divisor: i64) -> Result<i64> {
        if let Some(special) = SpecialDivision::classify(self.one(), dividend, divisor) {
            return special.divide(self, dividend);
        }
        let negative = (dividend < 0) != (divisor < 0);
        let (hi, lo) = self
            .metrics
            .multiply_by_scale_factor_wide(dividend.unsigned_abs());
        self.divide_wide(negative, hi, lo, divisor.unsigned_abs())
    }

    /// Quotient of an unscaled value and a plain integer, rounded.
    pub fn divide_by_long(&self, dividend: i64, divisor: i64) -> Result<i64> {
        match divisor {
            0 => Err(DecimalError::DivisionByZero),
            1 => Ok(dividend),
            -1 => self.negate(dividend),
            _ if dividend == 0 => Ok(0),
            _ => {
                let negative = (dividend < 0) != (divisor < 0);
                self.divide_wide(negative, 0, dividend.unsigned_abs(), divisor.unsigned_abs())
            }
        }
    }

    /// `1 / u`, rounded.
    ///
    /// # Errors
    /// Returns `DecimalError::DivisionByZero` if `u` is zero.
    #[inline]
    pub fn invert(&self, u: i64) -> Result<i64> {
        self.divide(self.one(), u)
    }
}

// ============================================================================
// Powers and Roots
// ============================================================================

impl DecimalArithmetic {
    /// Square root of `u`, rounded.
    ///
    /// # Errors
    /// Returns `DecimalError::NegativeSqrt` if `u` is negative.
    pub fn sqrt(&self, u: i64) -> Result<i64> {
        if u < 0 {
            return Err(DecimalError::NegativeSqrt);
        }
        if u == 0 {
            return Ok(0);
        }

        // sqrt(u / 10^f) * 10^f = sqrt(u * 10^f)
        let radicand = u as u128 * self.one() as u128;
        let root = radicand.isqrt();
        let remainder = radicand - root * root;

        // (root + 1/2)^2 = root^2 + root + 1/4, so the exact root exceeds the
        // midpoint iff remainder > root; it can never equal it
        let part = if remainder == 0 {
            TruncatedPart::Zero
        } else if remainder > root {
            TruncatedPart::GreaterThanHalf
        } else {
            TruncatedPart::LessThanHalf
        };
        let away = self
            .rounding_mode()
            .rounding_increment(false, root & 1 == 1, part)?;
        self.signed(false, root + away as u128)
    }

    /// `u` raised to the integer power `exponent`, computed by repeated
    /// squaring through [`multiply`](Self::multiply).
    ///
    /// Every intermediate product is rounded to the scale, so the result is
    /// not always correctly rounded. For a positive exponent `n` the error
    /// stays below `n * max(1, |u|)^(n - 1)` units in the last place; at
    /// scale 2, `1.01^100` yields `2.67` where the exact power is `2.7048...`.
    /// A negative exponent rounds once more when inverting the positive power.
    /// If that power rounds to zero or leaves the 64-bit range, the inverse of
    /// `u` is raised to `|exponent|` instead.
    ///
    /// # Errors
    /// Returns `DecimalError::DivisionByZero` for a zero base with a negative
    /// exponent, and `DecimalError::Overflow` in checked mode if the result
    /// does not fit.
    pub fn pow(&self, u: i64, exponent: i32) -> Result<i64> {
        let one = self.one();
        match exponent {
            0 => Ok(one),
            1 => Ok(u),
            -1 => self.invert(u),
            _ if u == 0 => {
                if exponent < 0 {
                    Err(DecimalError::DivisionByZero)
                } else {
                    Ok(0)
                }
            }
            _ if u == one => Ok(one),
            _ if u == -one => Ok(if exponent & 1 == 0 { one } else { -one }),
            _ if exponent < 0 => self.pow_inverse(u, exponent.unsigned_abs()),
            _ => self.pow_unsigned(u, exponent as u32),
        }
    }

    /// `u^-n` for `n >= 2` and `u` not zero.
    fn pow_inverse(&self, u: i64, n: u32) -> Result<i64> {
        let checked = Self {
            policy: TruncationPolicy::new(self.rounding_mode(), OverflowMode::Checked),
            ..*self
        };
        match checked.pow_unsigned(u, n) {
            Ok(power) if power != 0 => self.invert(power),
            // u^n is out of range or rounds to zero
            Ok(_) | Err(DecimalError::Overflow) => {
                let inverse = self.invert(u)?;
                self.pow_unsigned(inverse, n)
            }
            Err(e) => Err(e),
        }
    }

    fn pow_unsigned(&self, u: i64, mut exponent: u32) -> Result<i64> {
        let mut base = u;
        let mut result = self.one();
        loop {
            if exponent & 1 == 1 {
                result = self.multiply(result, base)?;
            }
            exponent >>= 1;
            if exponent == 0 {
                return Ok(result);
            }
            base = self.square(base)?;
        }
    }
}

// ============================================================================
// Shifts
// ============================================================================

impl DecimalArithmetic {
    /// `u * 2^n`; a negative `n` shifts right.
    pub fn shift_left(&self, u: i64, n: i32) -> Result<i64> {
        if n < 0 {
            self.shift_right_by(u, n.unsigned_abs())
        } else {
            self.shift_left_by(u, n as u32)
        }
    }

    /// `u / 2^n`, rounded; a negative `n` shifts left.
    pub fn shift_right(&self, u: i64, n: i32) -> Result<i64> {
        if n < 0 {
            self.shift_left_by(u, n.unsigned_abs())
        } else {
            self.shift_right_by(u, n as u32)
        }
    }

    fn shift_left_by(&self, u: i64, n: u32) -> Result<i64> {
        if self.is_checked() && wide::is_shl_overflow(u, n) {
            return Err(DecimalError::Overflow);
        }
        Ok(if n >= 64 { 0 } else { u << n })
    }

    fn shift_right_by(&self, u: i64, n: u32) -> Result<i64> {
        if n == 0 || u == 0 {
            return Ok(u);
        }
        let negative = u < 0;
        let magnitude = u.unsigned_abs() as u128;
        if n > 64 {
            // |u| <= 2^63 is at most a quarter of 2^65
            return self.round_quotient(negative, 0, magnitude, 1 << 65);
        }
        let divisor = 1u128 << n;
        self.round_quotient(negative, magnitude >> n, magnitude & (divisor - 1), divisor)
    }
}

// ============================================================================
// Rounding to Precision
// ============================================================================

impl DecimalArithmetic {
    /// Rounds `u` to `precision` fraction digits, keeping the scale.
    ///
    /// A negative precision rounds to tens, hundreds and so on. A precision
    /// at or above the scale returns `u` unchanged.
    ///
    /// # Errors
    /// Returns `DecimalError::PrecisionOutOfRange` if
    /// `precision < scale - 18`.
    pub fn round(&self, u: i64, precision: i32) -> Result<i64> {
        let scale = self.scale() as i32;
        if precision >= scale {
            return Ok(u);
        }
        let min = scale - crate::MAX_SCALE as i32;
        if precision < min {
            return Err(DecimalError::PrecisionOutOfRange { precision, min });
        }

        let divisor = POW10[(scale - precision) as usize] as u128;
        let negative = u < 0;
        let magnitude = u.unsigned_abs() as u128;
        let rounded = self.rounding_mode().round_magnitude(
            negative,
            magnitude / divisor,
            magnitude % divisor,
            divisor,
        )?;
        self.signed(negative, rounded * divisor)
    }
}
