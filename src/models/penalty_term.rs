//! Penalty terms and the exact fractions applied to them.
//!
//! All legal adjustments are expressed as rational [`Fraction`]s and applied
//! to whole-month [`PenaltyTerm`]s with a single rounding rule: the amount
//! added, removed or produced by a fraction is rounded up to a whole month.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An exact rational factor such as 1/3 or 5/4.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::Fraction;
///
/// assert_eq!(Fraction::ONE_THIRD.ceil_of(72), 24);
/// assert_eq!(Fraction::TWO_THIRDS.ceil_of(73), 49);
/// assert_eq!(Fraction::new(5, 4).to_string(), "5/4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    /// The numerator.
    pub numerator: u32,
    /// The denominator, never zero.
    pub denominator: u32,
}

impl Fraction {
    /// One third, used by the concurrence increase and the attempt reduction.
    pub const ONE_THIRD: Fraction = Fraction::new(1, 3);
    /// One half.
    pub const ONE_HALF: Fraction = Fraction::new(1, 2);
    /// Two thirds.
    pub const TWO_THIRDS: Fraction = Fraction::new(2, 3);
    /// The whole term.
    pub const ONE: Fraction = Fraction::new(1, 1);

    /// Creates a new fraction.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. All fractions in the engine are
    /// compile-time constants.
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        assert!(denominator != 0, "fraction denominator must be non-zero");
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns `ceil(months × numerator / denominator)`.
    pub fn ceil_of(&self, months: u32) -> u32 {
        (months * self.numerator).div_ceil(self.denominator)
    }

    /// Returns the exact product `months × self` as a decimal, for audit display.
    ///
    /// Values that do not terminate are rounded to two decimal places.
    pub fn exact_of(&self, months: u32) -> Decimal {
        (Decimal::from(months) * Decimal::from(self.numerator) / Decimal::from(self.denominator))
            .round_dp(2)
            .normalize()
    }

    /// Returns the decimal value of the fraction rounded to four places.
    pub fn to_decimal(&self) -> Decimal {
        (Decimal::from(self.numerator) / Decimal::from(self.denominator))
            .round_dp(4)
            .normalize()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A non-negative duration in whole months.
///
/// Terms are never mutated in place; every adjustment returns a new term.
///
/// # Example
///
/// ```
/// use prescrizione_engine::models::{Fraction, PenaltyTerm};
///
/// let base = PenaltyTerm::from_years_months(6, 0);
/// assert_eq!(base.months(), 72);
///
/// let (reduction, reduced) = base.reduced_by(Fraction::ONE_THIRD);
/// assert_eq!(reduction, 24);
/// assert_eq!(reduced.months(), 48);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PenaltyTerm {
    months: u32,
}

impl PenaltyTerm {
    /// Creates a term from a number of months.
    pub const fn from_months(months: u32) -> Self {
        Self { months }
    }

    /// Creates a term from years and months.
    pub const fn from_years_months(years: u32, months: u32) -> Self {
        Self {
            months: years * 12 + months,
        }
    }

    /// Returns the term in months.
    pub const fn months(&self) -> u32 {
        self.months
    }

    /// Splits the term into whole years and remaining months.
    pub const fn years_and_months(&self) -> (u32, u32) {
        (self.months / 12, self.months % 12)
    }

    /// Adds `fraction` of the term, returning the rounded-up increase and the new term.
    pub fn increased_by(&self, fraction: Fraction) -> (u32, PenaltyTerm) {
        let increase = fraction.ceil_of(self.months);
        (increase, PenaltyTerm::from_months(self.months + increase))
    }

    /// Removes `fraction` of the term, returning the rounded-up reduction and the new term.
    ///
    /// The reduction never exceeds the term itself.
    pub fn reduced_by(&self, fraction: Fraction) -> (u32, PenaltyTerm) {
        let reduction = fraction.ceil_of(self.months).min(self.months);
        (reduction, PenaltyTerm::from_months(self.months - reduction))
    }

    /// Multiplies the term by `fraction`, rounding the product up.
    pub fn scaled_by(&self, fraction: Fraction) -> PenaltyTerm {
        PenaltyTerm::from_months(fraction.ceil_of(self.months))
    }

    /// Returns the larger of this term and `floor`.
    pub fn at_least(&self, floor: PenaltyTerm) -> PenaltyTerm {
        PenaltyTerm::from_months(self.months.max(floor.months))
    }
}

impl fmt::Display for PenaltyTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mesi", self.months)
    }
}
