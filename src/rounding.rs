//! Rounding decisions shared by every operation that discards digits.
//!
//! Operations compute a truncated magnitude and classify the discarded
//! remainder as a [`TruncatedPart`]. The [`RoundingMode`] then decides
//! whether the magnitude moves one unit away from zero.

use crate::{DecimalError, Result, RoundingMode};

/// Classification of the digits discarded by a truncating operation,
/// relative to half a unit of the last retained digit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TruncatedPart {
    /// Nothing was discarded; the truncated value is exact.
    Zero,
    /// Non-zero, but less than half a unit.
    LessThanHalf,
    /// Exactly half a unit.
    EqualToHalf,
    /// More than half a unit.
    GreaterThanHalf,
}

impl TruncatedPart {
    /// Classifies `remainder / divisor` where `0 <= remainder < divisor`.
    #[inline(always)]
    pub const fn of(remainder: u128, divisor: u128) -> Self {
        if remainder == 0 {
            return Self::Zero;
        }
        // compare remainder against divisor - remainder to avoid doubling
        let rest = divisor - remainder;
        if remainder < rest {
            Self::LessThanHalf
        } else if remainder == rest {
            Self::EqualToHalf
        } else {
            Self::GreaterThanHalf
        }
    }

    /// Classifies a discarded decimal digit followed by further digits, where
    /// `sticky` tells whether any of the further digits is non-zero.
    #[inline(always)]
    pub const fn of_digit(first_digit: u8, sticky: bool) -> Self {
        match first_digit {
            0 if !sticky => Self::Zero,
            0..=4 => Self::LessThanHalf,
            5 if !sticky => Self::EqualToHalf,
            _ => Self::GreaterThanHalf,
        }
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
}

impl RoundingMode {
    /// Returns `true` if a truncated magnitude must be incremented by one,
    /// that is, moved away from zero.
    ///
    /// `negative` is the sign of the exact result and `truncated_is_odd` the
    /// parity of the last retained digit (only consulted for `HalfEven`).
    ///
    /// # Errors
    /// Returns `DecimalError::RoundingNecessary` for `Unnecessary` if any
    /// non-zero part was discarded.
    #[inline]
    pub const fn rounding_increment(
        self,
        negative: bool,
        truncated_is_odd: bool,
        part: TruncatedPart,
    ) -> Result<bool> {
        if part.is_zero() {
            return Ok(false);
        }
        let away = match self {
            Self::Up => true,
            Self::Down => false,
            Self::Ceiling => !negative,
            Self::Floor => negative,
            Self::HalfUp => matches!(
                part,
                TruncatedPart::EqualToHalf | TruncatedPart::GreaterThanHalf
            ),
            Self::HalfDown => matches!(part, TruncatedPart::GreaterThanHalf),
            Self::HalfEven => match part {
                TruncatedPart::GreaterThanHalf => true,
                TruncatedPart::EqualToHalf => truncated_is_odd,
                _ => false,
            },
            Self::Unnecessary => return Err(DecimalError::RoundingNecessary),
        };
        Ok(away)
    }

    /// Rounds a truncated magnitude given the discarded remainder over
    /// `divisor`.
    #[inline]
    pub(crate) const fn round_magnitude(
        self,
        negative: bool,
        truncated: u128,
        remainder: u128,
        divisor: u128,
    ) -> Result<u128> {
        let part = TruncatedPart::of(remainder, divisor);
        match self.rounding_increment(negative, truncated & 1 == 1, part) {
            Ok(true) => Ok(truncated + 1),
            Ok(false) => Ok(truncated),
            Err(e) => Err(e),
        }
    }
}
