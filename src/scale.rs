use crate::wide;
use crate::{DecimalArithmetic, DecimalError, OverflowMode, RoundingMode, TruncationPolicy};

/// Largest supported scale; `10^18` is the largest power of ten in an `i64`.
pub const MAX_SCALE: u8 = 18;

/// Powers of ten `10^0` to `10^19` (`10^19` still fits into a `u64`).
pub(crate) const POW10: [u64; 20] = {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < 20 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// Scale factor and derived constants for one scale `f` in `[0, 18]`.
///
/// The scale factor `10^f` is kept together with its high and low 32-bit
/// halves so that 128-bit products with the scale factor can be assembled
/// from four 32x32 bit partial products.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScaleMetrics {
    scale: u8,
    scale_factor: i64,
    factor_lo: u64,
    factor_hi: u64,
}

/// Metrics for every scale, indexed by scale.
pub static SCALES: [ScaleMetrics; MAX_SCALE as usize + 1] = {
    let mut table = [ScaleMetrics::new(0); MAX_SCALE as usize + 1];
    let mut scale = 1;
    while scale <= MAX_SCALE {
        table[scale as usize] = ScaleMetrics::new(scale);
        scale += 1;
    }
    table
};

// ============================================================================
// Construction and Constants
// ============================================================================

impl ScaleMetrics {
    const fn new(scale: u8) -> Self {
        let factor = POW10[scale as usize];
        Self {
            scale,
            scale_factor: factor as i64,
            factor_lo: factor & 0xFFFF_FFFF,
            factor_hi: factor >> 32,
        }
    }

    /// Returns the metrics for `scale`.
    ///
    /// # Errors
    /// Returns `DecimalError::ScaleOutOfRange` unless `0 <= scale <= 18`.
    #[inline]
    pub fn of(scale: i32) -> crate::Result<&'static Self> {
        if scale < 0 || scale > MAX_SCALE as i32 {
            return Err(DecimalError::ScaleOutOfRange(scale));
        }
        Ok(&SCALES[scale as usize])
    }

    /// Number of fraction digits.
    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// `10^scale`, the unscaled representation of the value one.
    #[inline(always)]
    pub const fn scale_factor(&self) -> i64 {
        self.scale_factor
    }

    /// Largest integer `i` with `i * 10^scale <= i64::MAX`.
    #[inline(always)]
    pub const fn max_integer_value(&self) -> i64 {
        i64::MAX / self.scale_factor
    }

    /// Smallest integer `i` with `i * 10^scale >= i64::MIN`.
    #[inline(always)]
    pub const fn min_integer_value(&self) -> i64 {
        i64::MIN / self.scale_factor
    }

    /// Returns `true` if `value * 10^scale` fits into an `i64`.
    #[inline(always)]
    pub const fn is_valid_integer_value(&self, value: i64) -> bool {
        self.min_integer_value() <= value && value <= self.max_integer_value()
    }
}

// ============================================================================
// Fast Paths by the Scale Factor
// ============================================================================

impl ScaleMetrics {
    /// `factor * 10^scale`, wrapping on overflow; callers check the range.
    #[inline(always)]
    pub const fn multiply_by_scale_factor(&self, factor: i64) -> i64 {
        factor.wrapping_mul(self.scale_factor)
    }

    /// Product of the unsigned 32-bit `factor` with the low 32 bits of the
    /// scale factor.
    #[inline(always)]
    pub const fn mullo_by_scale_factor(&self, factor: u32) -> u64 {
        factor as u64 * self.factor_lo
    }

    /// Product of the unsigned 32-bit `factor` with the high 32 bits of the
    /// scale factor.
    #[inline(always)]
    pub const fn mulhi_by_scale_factor(&self, factor: u32) -> u64 {
        factor as u64 * self.factor_hi
    }

    /// Full 128-bit product `factor * 10^scale` as `(hi, lo)`, assembled from
    /// the 32-bit partial products.
    #[inline]
    pub const fn multiply_by_scale_factor_wide(&self, factor: u64) -> (u64, u64) {
        let lo32 = factor as u32;
        let hi32 = (factor >> 32) as u32;

        // factor_hi < 2^28 for all scales, so the middle sum cannot overflow
        let low = self.mullo_by_scale_factor(lo32) as u128;
        let middle =
            self.mulhi_by_scale_factor(lo32) as u128 + self.mullo_by_scale_factor(hi32) as u128;
        let high = self.mulhi_by_scale_factor(hi32) as u128;

        wide::split((high << 64) + (middle << 32) + low)
    }

    /// `dividend / 10^scale`, truncating towards zero.
    #[inline(always)]
    pub const fn divide_by_scale_factor(&self, dividend: i64) -> i64 {
        dividend / self.scale_factor
    }

    /// `dividend % 10^scale`, with the sign of the dividend.
    #[inline(always)]
    pub const fn modulo_by_scale_factor(&self, dividend: i64) -> i64 {
        dividend % self.scale_factor
    }
}

// ============================================================================
// Arithmetic Lookup
// ============================================================================

impl ScaleMetrics {
    /// Arithmetic engine for this scale and the given truncation policy.
    #[inline]
    pub fn arithmetic(&'static self, policy: TruncationPolicy) -> DecimalArithmetic {
        DecimalArithmetic::with_metrics(self, policy)
    }

    /// Engine with `HALF_UP` rounding and silent overflow.
    #[inline]
    pub fn default_arithmetic(&'static self) -> DecimalArithmetic {
        self.arithmetic(TruncationPolicy::DEFAULT)
    }

    /// Engine reporting overflows as errors.
    #[inline]
    pub fn checked(&'static self, rounding: RoundingMode) -> DecimalArithmetic {
        self.arithmetic(TruncationPolicy::new(rounding, OverflowMode::Checked))
    }

    /// Engine wrapping silently on overflow.
    #[inline]
    pub fn unchecked(&'static self, rounding: RoundingMode) -> DecimalArithmetic {
        self.arithmetic(TruncationPolicy::new(rounding, OverflowMode::Unchecked))
    }
}
