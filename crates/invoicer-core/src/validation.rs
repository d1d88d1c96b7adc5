//! # Validation Module
//!
//! Opt-in business rules for line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Bill form (TypeScript)                                        │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API route                                                     │
//! │  ├── stored::to_inputs (text → numbers)                                 │
//! │  └── THIS MODULE: ranges from BillingConfig                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Engine: calculator (accepts anything, never fails)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never calls into this module. Skipping validation gives the
//! engine's plain arithmetic result for any input.
//!
//! ## Usage
//! ```rust
//! use invoicer_core::config::BillingConfig;
//! use invoicer_core::validation::validate_line_item;
//! use invoicer_core::LineItemInput;
//!
//! let config = BillingConfig::default();
//! assert!(validate_line_item(&LineItemInput::new(10.0, 1.0, 5.0, 19.0), &config).is_ok());
//! assert!(validate_line_item(&LineItemInput::new(10.0, 1.0, 120.0, 19.0), &config).is_err());
//! ```

use tracing::warn;

use crate::calculator::calculate_bill_totals;
use crate::config::BillingConfig;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{BillTotals, LineItemInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn require_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
        })
    }
}

fn require_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn require_range(field: &str, value: f64, max: f64) -> ValidationResult<()> {
    require_finite(field, value)?;
    if !(0.0..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Line Item & Bill Validators
// =============================================================================

/// Validates one line item.
///
/// ## Rules
/// - Every field must be finite
/// - `price` must not be negative
/// - `quantity` must be within `0..=max_quantity`
/// - `discountPercentage` must be within `0..=max_discount_percentage`
/// - `taxRate` must be within `0..=max_tax_rate`
pub fn validate_line_item(item: &LineItemInput, config: &BillingConfig) -> ValidationResult<()> {
    let checked = require_non_negative("price", item.price)
        .and_then(|_| require_range("quantity", item.quantity, config.max_quantity))
        .and_then(|_| {
            require_range(
                "discountPercentage",
                item.discount_percentage,
                config.max_discount_percentage,
            )
        })
        .and_then(|_| require_range("taxRate", item.tax_rate, config.max_tax_rate));

    if let Err(err) = &checked {
        warn!(field = ?err.field(), error = %err, "Line item rejected");
    }
    checked
}

/// Validates a whole bill.
///
/// ## Rules
/// - At most `max_line_items` lines
/// - Every line passes [`validate_line_item`]; the first failure is
///   reported with its index
pub fn validate_bill(items: &[LineItemInput], config: &BillingConfig) -> CoreResult<()> {
    if items.len() > config.max_line_items {
        warn!(
            count = items.len(),
            max = config.max_line_items,
            "Bill rejected: too many line items"
        );
        return Err(ValidationError::TooManyItems {
            count: items.len(),
            max: config.max_line_items,
        }
        .into());
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(item, config)
            .map_err(|source| CoreError::InvalidLineItem { index, source })?;
    }

    Ok(())
}

/// Validates a bill, then computes its totals.
///
/// ## Example
/// ```rust
/// use invoicer_core::config::BillingConfig;
/// use invoicer_core::validation::calculate_validated_bill;
/// use invoicer_core::LineItemInput;
///
/// let config = BillingConfig::default();
/// let totals = calculate_validated_bill(&[LineItemInput::new(500.0, 4.0, 0.0, 0.0)], &config)
///     .unwrap();
/// assert_eq!(totals.total, 2000.0);
///
/// let err = calculate_validated_bill(&[LineItemInput::new(-1.0, 1.0, 0.0, 0.0)], &config)
///     .unwrap_err();
/// assert_eq!(err.line_index(), Some(0));
/// ```
pub fn calculate_validated_bill(
    items: &[LineItemInput],
    config: &BillingConfig,
) -> CoreResult<BillTotals> {
    validate_bill(items, config)?;
    Ok(calculate_bill_totals(items))
}

// =============================================================================
// Unit Tests
// =============================================================================
