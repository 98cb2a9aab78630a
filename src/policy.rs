use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DecimalError;

// ============================================================================
// Rounding Mode
// ============================================================================

/// Rule applied when an operation discards digits of the exact result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoundingMode {
    /// Away from zero whenever a non-zero fraction is discarded.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// To the nearest neighbour, ties away from zero.
    HalfUp,
    /// To the nearest neighbour, ties towards zero.
    HalfDown,
    /// To the nearest neighbour, ties to the even neighbour (banker's rounding).
    HalfEven,
    /// Asserts that no rounding is necessary; inexact results are an error.
    Unnecessary,
}

impl RoundingMode {
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Unnecessary,
    ];

    /// Canonical upper-case name, e.g. `HALF_EVEN`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ceiling => "CEILING",
            Self::Floor => "FLOOR",
            Self::HalfUp => "HALF_UP",
            Self::HalfDown => "HALF_DOWN",
            Self::HalfEven => "HALF_EVEN",
            Self::Unnecessary => "UNNECESSARY",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(DecimalError::InvalidFormat)
    }
}

// ============================================================================
// Overflow Mode
// ============================================================================

/// Behaviour when a result does not fit into the 64-bit unscaled range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OverflowMode {
    /// Results wrap silently (two's complement truncation).
    #[default]
    Unchecked,
    /// Overflows are reported as `DecimalError::Overflow`.
    Checked,
}

impl OverflowMode {
    pub const ALL: [Self; 2] = [Self::Unchecked, Self::Checked];

    #[inline(always)]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Unchecked => "UNCHECKED",
            Self::Checked => "CHECKED",
        }
    }
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverflowMode {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(DecimalError::InvalidFormat)
    }
}

// ============================================================================
// Truncation Policy
// ============================================================================

/// Rounding mode and overflow mode applied together whenever an operation
/// truncates its exact result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruncationPolicy {
    pub rounding: RoundingMode,
    pub overflow: OverflowMode,
}

impl TruncationPolicy {
    /// `HALF_UP` rounding with silent overflow.
    pub const DEFAULT: Self = Self::new(RoundingMode::HalfUp, OverflowMode::Unchecked);

    /// `HALF_UP` rounding with overflow errors.
    pub const CHECKED: Self = Self::new(RoundingMode::HalfUp, OverflowMode::Checked);

    /// `HALF_EVEN` rounding with overflow errors.
    pub const BANKERS: Self = Self::new(RoundingMode::HalfEven, OverflowMode::Checked);

    /// `UNNECESSARY` rounding with overflow errors: every lossy result fails.
    pub const EXACT: Self = Self::new(RoundingMode::Unnecessary, OverflowMode::Checked);

    /// All sixteen combinations, unchecked ones first.
    pub const VALUES: [Self; 16] = {
        let mut values = [Self::DEFAULT; 16];
        let mut i = 0;
        while i < 16 {
            values[i] = Self::new(RoundingMode::ALL[i % 8], OverflowMode::ALL[i / 8]);
            i += 1;
        }
        values
    };

    #[inline(always)]
    pub const fn new(rounding: RoundingMode, overflow: OverflowMode) -> Self {
        Self { rounding, overflow }
    }

    #[inline(always)]
    pub const fn rounding_mode(self) -> RoundingMode {
        self.rounding
    }

    #[inline(always)]
    pub const fn overflow_mode(self) -> OverflowMode {
        self.overflow
    }
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rounding, self.overflow)
    }
}

impl FromStr for TruncationPolicy {
    type Err = DecimalError;

    /// Parses `ROUNDING/OVERFLOW` (e.g. `HALF_EVEN/CHECKED`); a bare rounding
    /// mode selects unchecked overflow.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((rounding, overflow)) => Ok(Self::new(rounding.parse()?, overflow.parse()?)),
            None => Ok(Self::new(s.parse()?, OverflowMode::Unchecked)),
        }
    }
}

impl From<RoundingMode> for TruncationPolicy {
    fn from(rounding: RoundingMode) -> Self {
        Self::new(rounding, OverflowMode::Unchecked)
    }
}
