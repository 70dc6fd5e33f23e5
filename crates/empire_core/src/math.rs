//! Exact decimal math for deterministic simulation.
//!
//! Every multiplier the empire uses (1.2 for alignment bonuses, 0.05 per
//! battle of veterancy, 0.8 for plunder) is a ratio of small integers, so
//! the simulation never touches floating point. Stockpiles are kept in
//! tenths, which is the finest grain any yield ever produces.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of stored sub-units per whole resource unit.
pub const AMOUNT_SCALE: i64 = 10;

/// A resource quantity stored in tenths.
///
/// # Example
///
/// ```
/// use empire_core::math::Amount;
///
/// let a = Amount::from_tenths(84) + Amount::whole(1);
/// assert_eq!(a.tenths(), 94);
/// assert_eq!(a.floor(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Zero of any resource.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole units.
    #[must_use]
    pub const fn whole(units: i64) -> Self {
        Self(units.saturating_mul(AMOUNT_SCALE))
    }

    /// Create an amount from raw tenths.
    #[must_use]
    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    /// Raw tenths.
    #[must_use]
    pub const fn tenths(self) -> i64 {
        self.0
    }

    /// Whole units, rounded toward negative infinity.
    #[must_use]
    pub const fn floor(self) -> i64 {
        self.0.div_euclid(AMOUNT_SCALE)
    }

    /// Check if this amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = self.0.rem_euclid(AMOUNT_SCALE);
        if frac == 0 {
            write!(f, "{}", self.floor())
        } else {
            write!(f, "{}.{}", self.floor(), frac)
        }
    }
}

/// An exact non-negative multiplier `num / den`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    /// Numerator.
    pub num: u64,
    /// Denominator (never zero).
    pub den: u64,
}

impl Ratio {
    /// The identity multiplier.
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Create a ratio. A zero denominator is treated as one.
    #[must_use]
    pub const fn new(num: u64, den: u64) -> Self {
        Self {
            num,
            den: if den == 0 { 1 } else { den },
        }
    }

    /// Multiply two ratios without reducing.
    #[must_use]
    pub const fn compose(self, other: Self) -> Self {
        Self {
            num: self.num.saturating_mul(other.num),
            den: self.den.saturating_mul(other.den),
        }
    }

    /// `floor(value * self)`, computed exactly.
    #[must_use]
    pub fn mul_floor(self, value: u64) -> u64 {
        let wide = u128::from(value) * u128::from(self.num) / u128::from(self.den);
        u64::try_from(wide).unwrap_or(u64::MAX)
    }
}
