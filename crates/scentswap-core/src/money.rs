//! # Money — Integer Minor Units
//!
//! Monetary estimates are stored as integer minor units (US cents, `i64`).
//! Floats never appear in a stored amount: valuation math runs its
//! multiplicative factors over a fractional intermediate and converts back
//! through [`Money::round_half_up`] exactly once, at the end.
//!
//! ## Invariant
//!
//! Two valuations of the same item must be bit-identical. Integer cents plus
//! a single, documented rounding point is what makes that hold — repeated
//! float round-trips would make "the same" estimate drift between calls.

use serde::{Deserialize, Serialize};

/// An amount of money in US cents.
///
/// Serializes transparently as the integer cent count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money(0);

    /// Construct from a cent count.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Construct from a whole-dollar count.
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// The cent count.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whether the amount is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert a fractional cent amount to `Money`, rounding half-up.
    ///
    /// Half-up means 0.5 cents rounds away from zero toward positive
    /// infinity: `170.5 → 171`, `169.4 → 169`. This is the only place in
    /// the stack where a fractional amount becomes a stored one.
    pub fn round_half_up(raw_cents: f64) -> Self {
        Self((raw_cents + 0.5).floor() as i64)
    }

    /// Multiply by a scalar factor, rounding half-up to cents.
    pub fn scale(&self, factor: f64) -> Self {
        Self::round_half_up(self.0 as f64 * factor)
    }

    /// The absolute difference between two amounts.
    pub fn abs_diff(&self, other: Money) -> Money {
        Self((self.0 - other.0).abs())
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
