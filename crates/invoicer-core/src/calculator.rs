//! # Calculator Module
//!
//! Line item and bill arithmetic.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PER LINE (every step rounded before the next one uses it)             │
//! │                                                                         │
//! │    base_subtotal    = round(price × quantity)                           │
//! │    discount_amount  = round(base_subtotal × discount% / 100)            │
//! │    taxable_subtotal = round(base_subtotal − discount_amount)            │
//! │    tax_amount       = round(taxable_subtotal × tax% / 100)              │
//! │    total            = round(taxable_subtotal + tax_amount)              │
//! │                                                                         │
//! │  PER BILL                                                               │
//! │                                                                         │
//! │    subtotal       = round(Σ taxable_subtotal)                           │
//! │    discount_total = round(Σ discount_amount)                            │
//! │    tax_total      = round(Σ tax_amount)                                 │
//! │    total          = round(Σ total)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is always computed on the discounted amount. Both functions are total:
//! out-of-range inputs give arithmetically consistent results, never errors.

use tracing::{debug, trace};

use crate::rounding::round;
use crate::types::{Bill, BillTotals, LineItemInput, LineItemResult};

// =============================================================================
// Item Calculator
// =============================================================================

/// Computes the rounded figures of one line item.
///
/// ## Example
/// ```rust
/// use invoicer_core::{calculate_item_totals, LineItemInput};
///
/// // 2 × 1000 with 50% off, 19% tax on the remaining 1000
/// let result = calculate_item_totals(&LineItemInput::new(1000.0, 2.0, 50.0, 19.0));
///
/// assert_eq!(result.base_subtotal, 2000.0);
/// assert_eq!(result.discount_amount, 1000.0);
/// assert_eq!(result.taxable_subtotal, 1000.0);
/// assert_eq!(result.tax_amount, 190.0);
/// assert_eq!(result.total, 1190.0);
/// ```
pub fn calculate_item_totals(item: &LineItemInput) -> LineItemResult {
    let base_subtotal = round(item.price * item.quantity);
    let discount_amount = round(base_subtotal * item.discount_percentage / 100.0);
    let taxable_subtotal = round(base_subtotal - discount_amount);
    let tax_amount = round(taxable_subtotal * item.tax_rate / 100.0);
    let total = round(taxable_subtotal + tax_amount);

    trace!(
        price = item.price,
        quantity = item.quantity,
        taxable_subtotal,
        total,
        "Calculated line item"
    );

    LineItemResult {
        base_subtotal,
        discount_amount,
        taxable_subtotal,
        tax_amount,
        total,
    }
}

// =============================================================================
// Bill Aggregator
// =============================================================================

/// Sums line results into bill totals.
///
/// Each sum is rounded once, after the loop. The line results it adds are
/// themselves rounded, so every bill figure is rounded twice.
fn aggregate<I>(results: I) -> BillTotals
where
    I: IntoIterator<Item = LineItemResult>,
{
    let mut subtotal = 0.0;
    let mut tax_total = 0.0;
    let mut discount_total = 0.0;
    let mut total = 0.0;

    for result in results {
        subtotal += result.taxable_subtotal;
        tax_total += result.tax_amount;
        discount_total += result.discount_amount;
        total += result.total;
    }

    BillTotals {
        subtotal: round(subtotal),
        discount_total: round(discount_total),
        tax_total: round(tax_total),
        total: round(total),
    }
}

/// Computes the totals of a bill.
///
/// `subtotal` is post-discount and pre-tax. An empty bill totals zero.
///
/// ## Example
/// ```rust
/// use invoicer_core::{calculate_bill_totals, LineItemInput};
///
/// let totals = calculate_bill_totals(&[
///     LineItemInput::new(1000.0, 2.0, 10.0, 19.0),
///     LineItemInput::new(500.5, 3.0, 0.0, 5.0),
/// ]);
///
/// assert_eq!(totals.subtotal, 3301.5);
/// assert_eq!(totals.discount_total, 200.0);
/// assert_eq!(totals.tax_total, 417.08);
/// assert_eq!(totals.total, 3718.58);
/// ```
pub fn calculate_bill_totals(items: &[LineItemInput]) -> BillTotals {
    let totals = aggregate(items.iter().map(calculate_item_totals));
    debug!(
        items = items.len(),
        subtotal = totals.subtotal,
        total = totals.total,
        "Calculated bill totals"
    );
    totals
}

/// Computes every line result and the bill totals in one pass.
///
/// The returned `items` keep the input order. `totals` equals
/// [`calculate_bill_totals`] for the same input.
pub fn calculate_bill(items: &[LineItemInput]) -> Bill {
    let results: Vec<LineItemResult> = items.iter().map(calculate_item_totals).collect();
    let totals = aggregate(results.iter().copied());
    debug!(
        items = results.len(),
        subtotal = totals.subtotal,
        total = totals.total,
        "Calculated bill"
    );
    Bill {
        items: results,
        totals,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
