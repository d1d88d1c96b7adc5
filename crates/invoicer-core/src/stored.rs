//! # Stored Line Items
//!
//! Bridges the ORM's string decimals and the engine's numbers.
//!
//! ## Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  database row          StoredLineItem        LineItemInput             │
//! │  price = "1000.00"  ─► price: "1000.00"  ─►  price: 1000.0             │
//! │  (DECIMAL as text)     (serde, camelCase)    (TryFrom, per field)      │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │  StoredBillTotals  ◄── format_fixed ◄──────  BillTotals                 │
//! │  (TryFrom: NaN / overflow rejected)                                     │
//! │  total: "1190.00"                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON payloads may carry either strings (`"19.00"`) or plain numbers
//! (`19`); both deserialize into the same textual field.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::calculator::calculate_bill_totals;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, MAX_AMOUNT};
use crate::types::{BillTotals, LineItemInput};

// =============================================================================
// Stored Line Item
// =============================================================================

/// A bill line as persisted, with every decimal kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoredLineItem {
    #[serde(deserialize_with = "decimal_text")]
    #[ts(type = "string | number")]
    pub price: String,

    #[serde(deserialize_with = "decimal_text")]
    #[ts(type = "string | number")]
    pub quantity: String,

    #[serde(deserialize_with = "decimal_text")]
    #[ts(type = "string | number")]
    pub discount_percentage: String,

    #[serde(deserialize_with = "decimal_text")]
    #[ts(type = "string | number")]
    pub tax_rate: String,
}

/// Accepts `"12.50"` as well as `12.5` for a decimal field.
fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

impl StoredLineItem {
    /// Creates a stored line from its four textual decimals.
    pub fn new(
        price: impl Into<String>,
        quantity: impl Into<String>,
        discount_percentage: impl Into<String>,
        tax_rate: impl Into<String>,
    ) -> Self {
        StoredLineItem {
            price: price.into(),
            quantity: quantity.into(),
            discount_percentage: discount_percentage.into(),
            tax_rate: tax_rate.into(),
        }
    }
}

impl TryFrom<&StoredLineItem> for LineItemInput {
    type Error = ValidationError;

    fn try_from(stored: &StoredLineItem) -> Result<Self, Self::Error> {
        Ok(LineItemInput {
            price: parse_decimal("price", &stored.price)?,
            quantity: parse_decimal("quantity", &stored.quantity)?,
            discount_percentage: parse_decimal("discountPercentage", &stored.discount_percentage)?,
            tax_rate: parse_decimal("taxRate", &stored.tax_rate)?,
        })
    }
}

impl From<&LineItemInput> for StoredLineItem {
    fn from(item: &LineItemInput) -> Self {
        StoredLineItem {
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            discount_percentage: item.discount_percentage.to_string(),
            tax_rate: item.tax_rate.to_string(),
        }
    }
}

// =============================================================================
// Parsing & Formatting
// =============================================================================

/// Parses a textual decimal.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty text is `Required`
/// - Anything `f64` can't parse, and `NaN` / `inf`, is `InvalidFormat`
///
/// ## Example
/// ```rust
/// use invoicer_core::stored::parse_decimal;
///
/// assert_eq!(parse_decimal("price", " 500.50 ").unwrap(), 500.5);
/// assert!(parse_decimal("price", "").is_err());
/// assert!(parse_decimal("price", "12,50").is_err());
/// ```
pub fn parse_decimal(field: &str, text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{text}' is not a decimal number"),
    })?;

    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{text}' is not a finite number"),
        });
    }

    Ok(value)
}

/// Formats an amount with exactly two decimals, rounding it first.
///
/// Formatting goes through [`Money`], so the cents always follow the
/// half-away-from-zero rule of [`crate::rounding::round`].
///
/// ## Errors
/// - `NotFinite` for NaN and infinities
/// - `OutOfRange` beyond ±[`MAX_AMOUNT`], where whole cents are no longer
///   exact in `f64`
///
/// ## Example
/// ```rust
/// use invoicer_core::stored::format_fixed;
///
/// assert_eq!(format_fixed("total", 3301.5).unwrap(), "3301.50");
/// assert_eq!(format_fixed("total", 0.1 + 0.2).unwrap(), "0.30");
/// assert_eq!(format_fixed("total", -0.001).unwrap(), "0.00");
/// assert!(format_fixed("total", f64::NAN).is_err());
/// ```
pub fn format_fixed(field: &str, amount: f64) -> Result<String, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Money::from_amount(amount)
        .map(|money| money.to_fixed())
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.to_string(),
            min: -MAX_AMOUNT,
            max: MAX_AMOUNT,
        })
}

// =============================================================================
// Bill Totals
// =============================================================================

/// [`BillTotals`] as the database stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoredBillTotals {
    pub subtotal: String,
    pub discount_total: String,
    pub tax_total: String,
    pub total: String,
}

impl TryFrom<&BillTotals> for StoredBillTotals {
    type Error = ValidationError;

    /// Fails on the first figure that has no two-decimal text form, so an
    /// overflowed bill never reaches the database as `"NaN"`.
    fn try_from(totals: &BillTotals) -> Result<Self, Self::Error> {
        Ok(StoredBillTotals {
            subtotal: format_fixed("subtotal", totals.subtotal)?,
            discount_total: format_fixed("discountTotal", totals.discount_total)?,
            tax_total: format_fixed("taxTotal", totals.tax_total)?,
            total: format_fixed("total", totals.total)?,
        })
    }
}

/// Converts every stored line, then computes the bill totals.
///
/// The first line that fails to convert aborts the calculation and is
/// reported by index.
///
/// ## Example
/// ```rust
/// use invoicer_core::stored::{bill_totals_from_stored, StoredBillTotals, StoredLineItem};
///
/// let totals = bill_totals_from_stored(&[
///     StoredLineItem::new("1000.00", "2", "10.00", "19.00"),
///     StoredLineItem::new("500.50", "3", "0", "5"),
/// ])
/// .unwrap();
///
/// assert_eq!(StoredBillTotals::try_from(&totals).unwrap().total, "3718.58");
/// ```
pub fn bill_totals_from_stored(items: &[StoredLineItem]) -> CoreResult<BillTotals> {
    let inputs = to_inputs(items)?;
    Ok(calculate_bill_totals(&inputs))
}

/// Converts stored lines to engine inputs, keeping their order.
pub fn to_inputs(items: &[StoredLineItem]) -> CoreResult<Vec<LineItemInput>> {
    items
        .iter()
        .enumerate()
        .map(|(index, stored)| {
            LineItemInput::try_from(stored)
                .map_err(|source| CoreError::InvalidLineItem { index, source })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
