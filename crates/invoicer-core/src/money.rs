//! # Money Module
//!
//! Integer-cent money for storing and displaying engine results.
//!
//! ## Where Money Fits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The engine computes in f64 with the rounding discipline of            │
//! │  `rounding::round`. Once a figure leaves the engine it is already      │
//! │  rounded to 2 decimals, so it converts to whole cents losslessly:      │
//! │                                                                         │
//! │    LineItemResult / BillTotals (f64)                                    │
//! │         │ as_money()                                                    │
//! │         ▼                                                               │
//! │    Money (i64 cents) ──► to_fixed() "1190.00" ──► database / receipt   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoicer_core::money::Money;
//!
//! let price = Money::from_amount(10.995).unwrap();
//! assert_eq!(price.cents(), 1100);
//! assert_eq!(price.to_fixed(), "11.00");
//!
//! let total: Money = [price, Money::from_cents(50)].into_iter().sum();
//! assert_eq!(total.to_string(), "11.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::rounding::round;
use crate::types::{BillTotals, LineItemResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes and
///   out-of-range discounts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

/// Largest amount whose cent count fits in the exactly representable f64
/// integer range.
pub const MAX_AMOUNT: f64 = 90_071_992_547_409.91;

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount to cents, rounding it first.
    ///
    /// Returns `None` for NaN, infinities and amounts beyond
    /// ±90 071 992 547 409.91 where cents are no longer exact.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_amount(-5.5), Some(Money::from_cents(-550)));
    /// assert_eq!(Money::from_amount(f64::NAN), None);
    /// ```
    pub fn from_amount(amount: f64) -> Option<Self> {
        let rounded = round(amount);
        if !rounded.is_finite() || rounded.abs() > MAX_AMOUNT {
            return None;
        }
        // rounded × 100 sits within an ulp of an integer
        Some(Money((rounded * 100.0).round() as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a decimal number.
    #[inline]
    pub fn to_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Formats with exactly two decimals and no currency symbol, the format
    /// the database stores decimals in.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(119000).to_fixed(), "1190.00");
    /// assert_eq!(Money::from_cents(-550).to_fixed(), "-5.50");
    /// assert_eq!(Money::from_cents(-5).to_fixed(), "-0.05");
    /// ```
    pub fn to_fixed(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Cent Views of Engine Results
// =============================================================================

/// [`LineItemResult`] in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemMoney {
    pub base_subtotal: Money,
    pub discount_amount: Money,
    pub taxable_subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
}

/// [`BillTotals`] in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillTotalsMoney {
    pub subtotal: Money,
    pub discount_total: Money,
    pub tax_total: Money,
    pub total: Money,
}

impl LineItemResult {
    /// Converts every figure to cents; `None` if any is not representable.
    pub fn as_money(&self) -> Option<LineItemMoney> {
        Some(LineItemMoney {
            base_subtotal: Money::from_amount(self.base_subtotal)?,
            discount_amount: Money::from_amount(self.discount_amount)?,
            taxable_subtotal: Money::from_amount(self.taxable_subtotal)?,
            tax_amount: Money::from_amount(self.tax_amount)?,
            total: Money::from_amount(self.total)?,
        })
    }
}

impl BillTotals {
    /// Converts every figure to cents; `None` if any is not representable.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::{calculate_bill_totals, LineItemInput};
    ///
    /// let totals = calculate_bill_totals(&[LineItemInput::new(1000.0, 2.0, 50.0, 19.0)]);
    /// let cents = totals.as_money().unwrap();
    /// assert_eq!(cents.total.cents(), 119_000);
    /// ```
    pub fn as_money(&self) -> Option<BillTotalsMoney> {
        Some(BillTotalsMoney {
            subtotal: Money::from_amount(self.subtotal)?,
            discount_total: Money::from_amount(self.discount_total)?,
            tax_total: Money::from_amount(self.tax_total)?,
            total: Money::from_amount(self.total)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate_bill_totals, calculate_item_totals};
    use crate::types::LineItemInput;

    #[test]
    fn test_from_amount_rounds_first() {
        assert_eq!(Money::from_amount(10.005), Some(Money::from_cents(1001)));
        assert_eq!(Money::from_amount(12.344), Some(Money::from_cents(1234)));
        assert_eq!(Money::from_amount(417.08), Some(Money::from_cents(41708)));
        assert_eq!(Money::from_amount(-0.001), Some(Money::zero()));
    }

    #[test]
    fn test_from_amount_rejects_unrepresentable() {
        assert_eq!(Money::from_amount(f64::NAN), None);
        assert_eq!(Money::from_amount(f64::INFINITY), None);
        assert_eq!(Money::from_amount(1e20), None);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(Money::from_cents(330150).to_fixed(), "3301.50");
        assert_eq!(Money::from_cents(0).to_fixed(), "0.00");
        assert_eq!(Money::from_cents(7).to_fixed(), "0.07");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
    }

    #[test]
    fn test_to_amount() {
        assert_eq!(Money::from_cents(371858).to_amount(), 3718.58);
        assert_eq!(Money::from_cents(-30).to_amount(), -0.3);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());

        // A 150% discount leaves a credit on the line
        let result = calculate_item_totals(&LineItemInput::new(100.0, 1.0, 150.0, 10.0));
        let cents = result.as_money().unwrap();
        assert!(cents.total.is_negative());
        assert!(!cents.total.is_zero());

        // Negative zero from the rounder is stored as plain zero
        let credit = Money::from_amount(-0.004).unwrap();
        assert!(credit.is_zero());
        assert!(!credit.is_negative());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((-b).cents(), -250);

        let mut c = a;
        c += b;
        c -= Money::from_cents(50);
        assert_eq!(c.cents(), 1200);
    }

    #[test]
    fn test_line_item_as_money() {
        let result = calculate_item_totals(&LineItemInput::new(500.5, 3.0, 0.0, 5.0));
        let cents = result.as_money().unwrap();
        assert_eq!(cents.base_subtotal.cents(), 150150);
        assert_eq!(cents.tax_amount.cents(), 7508);
        assert_eq!(cents.total.cents(), 157658);
    }

    #[test]
    fn test_bill_as_money_matches_cent_sum_of_lines() {
        let items = [
            LineItemInput::new(1000.0, 2.0, 10.0, 19.0),
            LineItemInput::new(500.5, 3.0, 0.0, 5.0),
        ];
        let totals = calculate_bill_totals(&items).as_money().unwrap();
        let line_total: Money = items
            .iter()
            .map(|i| calculate_item_totals(i).as_money().unwrap().total)
            .sum();
        assert_eq!(totals.total, line_total);
        assert_eq!(totals.total.to_fixed(), "3718.58");
    }

    #[test]
    fn test_as_money_fails_on_nan() {
        let result = calculate_item_totals(&LineItemInput::plain(f64::NAN, 1.0));
        assert!(result.as_money().is_none());
    }
}
