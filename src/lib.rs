//! Allocation-free fixed-point decimal arithmetic on unscaled `i64` values
//!
//! A decimal value with scale `f` is represented by its *unscaled* value
//! `u = value * 10^f`, stored in a plain `i64`. This crate provides the
//! arithmetic engine operating on such unscaled values for every scale from
//! 0 to 18:
//!
//! - **`ScaleMetrics`**: per-scale constants (scale factor `10^f` and its
//!   32-bit halves) with fast multiply/divide/modulo by the scale factor
//! - **`TruncationPolicy`**: a rounding mode combined with an overflow mode
//! - **`DecimalArithmetic`**: the engine for one scale and one policy
//!
//! ## Features
//!
//! - **Exact decimal math**: results match arbitrary-precision decimal
//!   arithmetic rounded to the scale, using 128-bit intermediates only
//! - **Eight rounding modes**: up, down, ceiling, floor, half-up, half-down,
//!   half-even and unnecessary
//! - **Checked or wrapping overflow**: selected per engine
//! - **no_std compatible**: needs `alloc` only for big-number conversions and
//!   `to_string`
//! - **Serde support** (feature `serde`) for truncation policies
//!
//! ## Example
//!
//! ```rust
//! use fixarith::{DecimalArithmetic, OverflowMode, RoundingMode};
//!
//! let arith = DecimalArithmetic::new(2, RoundingMode::HalfUp, OverflowMode::Checked).unwrap();
//!
//! let one = arith.parse("1.00").unwrap();
//! let three = arith.from_long(3).unwrap();
//! let third = arith.divide(one, three).unwrap();
//!
//! assert_eq!(third, 33);
//! assert_eq!(arith.to_string(third), "0.33");
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

extern crate alloc;

mod arithmetic;
mod big;
mod convert;
mod policy;
mod rounding;
mod scale;
mod special;
pub mod wide;

pub use arithmetic::DecimalArithmetic;
pub use convert::UnscaledDisplay;
pub use policy::{OverflowMode, RoundingMode, TruncationPolicy};
pub use rounding::TruncatedPart;
pub use scale::{MAX_SCALE, SCALES, ScaleMetrics};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    #[error("overflow: result does not fit into a 64-bit unscaled value")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("rounding necessary: result cannot be represented exactly")]
    RoundingNecessary,

    #[error("scale must be in [0, 18] but was {0}")]
    ScaleOutOfRange(i32),

    #[error("precision must be at least {min} but was {precision}")]
    PrecisionOutOfRange { precision: i32, min: i32 },

    #[error("square root of a negative value")]
    NegativeSqrt,

    #[error("invalid decimal string format")]
    InvalidFormat,

    #[error("value is NaN or infinite")]
    NotFinite,
}

impl DecimalError {
    /// Returns `true` for errors caused by an argument outside its valid domain.
    pub const fn is_invalid_argument(self) -> bool {
        matches!(
            self,
            Self::ScaleOutOfRange(_) | Self::PrecisionOutOfRange { .. } | Self::NegativeSqrt
        )
    }

    /// Returns `true` for errors caused by malformed textual or non-finite input.
    pub const fn is_format(self) -> bool {
        matches!(self, Self::InvalidFormat | Self::NotFinite)
    }
}

pub type Result<T> = core::result::Result<T, DecimalError>;

#[cfg(test)]
mod error_tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DecimalError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            DecimalError::ScaleOutOfRange(19).to_string(),
            "scale must be in [0, 18] but was 19"
        );
        assert_eq!(
            DecimalError::PrecisionOutOfRange {
                precision: -17,
                min: -16
            }
            .to_string(),
            "precision must be at least -16 but was -17"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(DecimalError::NegativeSqrt.is_invalid_argument());
        assert!(DecimalError::ScaleOutOfRange(-1).is_invalid_argument());
        assert!(!DecimalError::Overflow.is_invalid_argument());
        assert!(DecimalError::NotFinite.is_format());
        assert!(DecimalError::InvalidFormat.is_format());
        assert!(!DecimalError::RoundingNecessary.is_format());
    }
}
