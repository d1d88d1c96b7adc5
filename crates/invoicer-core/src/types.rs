//! # Domain Types
//!
//! Value types flowing into and out of the calculation engine.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Engine Value Types                              │
//! │                                                                         │
//! │  ┌────────────────────┐        ┌────────────────────┐                   │
//! │  │   LineItemInput    │        │   LineItemResult   │                   │
//! │  │  ────────────────  │  item  │  ────────────────  │                   │
//! │  │  price             │ ─────► │  base_subtotal     │                   │
//! │  │  quantity          │        │  discount_amount   │                   │
//! │  │  discount_percent. │        │  taxable_subtotal  │                   │
//! │  │  tax_rate          │        │  tax_amount        │                   │
//! │  └─────────┬──────────┘        │  total             │                   │
//! │            │                   └────────────────────┘                   │
//! │            │ [items]           ┌────────────────────┐                   │
//! │            └─────────────────► │     BillTotals     │                   │
//! │                                │  subtotal (net)    │                   │
//! │                                │  discount_total    │                   │
//! │                                │  tax_total, total  │                   │
//! │                                └────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types are `Copy` and serialize in camelCase to match the web layer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::calculate_item_totals;

// =============================================================================
// Line Item Input
// =============================================================================

/// Raw inputs of one bill line, as supplied by the caller.
///
/// Percentages are expressed as `0..=100` (19.0 means 19 %). The engine does
/// not check ranges; see [`crate::validation`] for the opt-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    /// Unit price.
    pub price: f64,

    /// Quantity sold, fractional quantities allowed.
    pub quantity: f64,

    /// Discount applied to the line, in percent.
    pub discount_percentage: f64,

    /// Tax rate applied after the discount, in percent.
    pub tax_rate: f64,
}

impl LineItemInput {
    /// Creates a line item.
    #[inline]
    pub const fn new(price: f64, quantity: f64, discount_percentage: f64, tax_rate: f64) -> Self {
        LineItemInput {
            price,
            quantity,
            discount_percentage,
            tax_rate,
        }
    }

    /// Creates a line item without discount or tax.
    #[inline]
    pub const fn plain(price: f64, quantity: f64) -> Self {
        LineItemInput::new(price, quantity, 0.0, 0.0)
    }

    /// Computes the rounded totals of this line.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::LineItemInput;
    ///
    /// let result = LineItemInput::new(1000.0, 2.0, 50.0, 19.0).totals();
    /// assert_eq!(result.tax_amount, 190.0);
    /// assert_eq!(result.total, 1190.0);
    /// ```
    #[inline]
    pub fn totals(&self) -> LineItemResult {
        calculate_item_totals(self)
    }
}

// =============================================================================
// Line Item Result
// =============================================================================

/// Rounded figures of one bill line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResult {
    /// `price × quantity`.
    pub base_subtotal: f64,

    /// Discount taken off the base subtotal.
    pub discount_amount: f64,

    /// Base subtotal minus discount; the tax base.
    pub taxable_subtotal: f64,

    /// Tax on the taxable subtotal.
    pub tax_amount: f64,

    /// Taxable subtotal plus tax.
    pub total: f64,
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Aggregated figures of a whole bill.
///
/// ## Subtotal Semantics
/// `subtotal` is the sum of the lines' *taxable* subtotals: it is already net
/// of discounts. The pre-discount amount is `subtotal + discount_total`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    /// Sum of taxable subtotals (post-discount, pre-tax).
    pub subtotal: f64,

    /// Sum of line discounts.
    pub discount_total: f64,

    /// Sum of line taxes.
    pub tax_total: f64,

    /// Sum of line totals.
    pub total: f64,
}

impl BillTotals {
    /// All-zero totals, the result for an empty bill.
    #[inline]
    pub const fn zero() -> Self {
        BillTotals {
            subtotal: 0.0,
            discount_total: 0.0,
            tax_total: 0.0,
            total: 0.0,
        }
    }

    /// Checks whether every figure is zero.
    pub fn is_zero(&self) -> bool {
        self.subtotal == 0.0
            && self.discount_total == 0.0
            && self.tax_total == 0.0
            && self.total == 0.0
    }
}

// =============================================================================
// Bill
// =============================================================================

/// Per-line results together with the bill totals.
///
/// `items[i]` is the result for input line `i`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub items: Vec<LineItemResult>,
    pub totals: BillTotals,
}

// =============================================================================
// Unit Tests
// =============================================================================
