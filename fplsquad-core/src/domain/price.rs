//! Fixed-point money.
//!
//! Prices and budgets are held in tenths of a unit, the same resolution the
//! FPL API uses for `now_cost` (`75` = 7.5). All sums stay in integers so a
//! squad's spend never drifts against its budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Tenths per monetary unit.
pub const TENTHS_PER_UNIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u32);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Convert a unit amount (e.g. `7.5`) to tenths, rounding to the nearest tenth.
    ///
    /// Returns `None` for non-finite, negative, or out-of-range amounts.
    pub fn from_units(units: f64) -> Option<Self> {
        if !units.is_finite() || units < 0.0 {
            return None;
        }
        let tenths = (units * TENTHS_PER_UNIT as f64).round();
        if tenths > u32::MAX as f64 {
            return None;
        }
        Some(Self(tenths as u32))
    }

    pub fn tenths(self) -> u32 {
        self.0
    }

    pub fn as_units(self) -> f64 {
        self.0 as f64 / TENTHS_PER_UNIT as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, rhs: Price) -> Price {
        Price(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / TENTHS_PER_UNIT, self.0 % TENTHS_PER_UNIT)
    }
}
