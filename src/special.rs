//! Operand patterns that multiplication and division resolve without the
//! general 128-bit algorithm.

use crate::{DecimalArithmetic, DecimalError, Result};

/// Special cases of `a * b`, checked in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SpecialMultiplication {
    /// `a == 0` or `b == 0`
    FactorIsZero,
    /// `a == 1`
    FirstIsOne,
    /// `b == 1`
    SecondIsOne,
    /// `a == -1`
    FirstIsMinusOne,
    /// `b == -1`
    SecondIsMinusOne,
    /// `a == b`
    FactorsAreEqual,
}

impl SpecialMultiplication {
    #[inline]
    pub(crate) const fn classify(one: i64, a: i64, b: i64) -> Option<Self> {
        if a == 0 || b == 0 {
            Some(Self::FactorIsZero)
        } else if a == one {
            Some(Self::FirstIsOne)
        } else if b == one {
            Some(Self::SecondIsOne)
        } else if a == -one {
            Some(Self::FirstIsMinusOne)
        } else if b == -one {
            Some(Self::SecondIsMinusOne)
        } else if a == b {
            Some(Self::FactorsAreEqual)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn multiply(self, arith: &DecimalArithmetic, a: i64, b: i64) -> Result<i64> {
        match self {
            Self::FactorIsZero => Ok(0),
            Self::FirstIsOne => Ok(b),
            Self::SecondIsOne => Ok(a),
            // negation can overflow for i64::MIN
            Self::FirstIsMinusOne => arith.negate(b),
            Self::SecondIsMinusOne => arith.negate(a),
            Self::FactorsAreEqual => arith.square(a),
        }
    }
}

/// Special cases of `a / b`, checked in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SpecialDivision {
    /// `b == 0`
    DivisorIsZero,
    /// `a == 0`
    DividendIsZero,
    /// `b == 1`
    DivisorIsOne,
    /// `b == -1`
    DivisorIsMinusOne,
    /// `a == b`
    OperandsAreEqual,
    /// `a == -b`
    OperandsAreOpposite,
}

impl SpecialDivision {
    #[inline]
    pub(crate) const fn classify(one: i64, a: i64, b: i64) -> Option<Self> {
        if b == 0 {
            Some(Self::DivisorIsZero)
        } else if a == 0 {
            Some(Self::DividendIsZero)
        } else if b == one {
            Some(Self::DivisorIsOne)
        } else if b == -one {
            Some(Self::DivisorIsMinusOne)
        } else if a == b {
            Some(Self::OperandsAreEqual)
        } else if b != i64::MIN && a == -b {
            Some(Self::OperandsAreOpposite)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn divide(self, arith: &DecimalArithmetic, a: i64) -> Result<i64> {
        match self {
            Self::DivisorIsZero => Err(DecimalError::DivisionByZero),
            Self::DividendIsZero => Ok(0),
            Self::DivisorIsOne => Ok(a),
            Self::DivisorIsMinusOne => arith.negate(a),
            Self::OperandsAreEqual => Ok(arith.one()),
            Self::OperandsAreOpposite => Ok(-arith.one()),
        }
    }
}
