//! Billing configuration.
//!
//! Limits used by the opt-in [`crate::validation`] layer. The calculation
//! engine itself takes no configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Limits applied when a caller validates line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingConfig {
    /// Maximum number of lines on one bill
    pub max_line_items: usize,

    /// Maximum quantity on one line
    pub max_quantity: f64,

    /// Maximum discount, in percent (at most 100)
    pub max_discount_percentage: f64,

    /// Maximum tax rate, in percent (at most 100)
    pub max_tax_rate: f64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            max_line_items: 500,
            max_quantity: 1_000_000.0,
            max_discount_percentage: 100.0,
            max_tax_rate: 100.0,
        }
    }
}

impl BillingConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                            | Default   |
    /// |-------------------------------------|-----------|
    /// | `INVOICER_MAX_LINE_ITEMS`           | 500       |
    /// | `INVOICER_MAX_QUANTITY`             | 1000000   |
    /// | `INVOICER_MAX_DISCOUNT_PERCENTAGE`  | 100       |
    /// | `INVOICER_MAX_TAX_RATE`             | 100       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::config::BillingConfig;
    ///
    /// let config = BillingConfig::from_lookup(|key| match key {
    ///     "INVOICER_MAX_LINE_ITEMS" => Some("20".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.max_line_items, 20);
    /// assert_eq!(config.max_tax_rate, 100.0);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BillingConfig::default();
        let config = BillingConfig {
            max_line_items: read(&lookup, "INVOICER_MAX_LINE_ITEMS", defaults.max_line_items)?,
            max_quantity: read(&lookup, "INVOICER_MAX_QUANTITY", defaults.max_quantity)?,
            max_discount_percentage: read(
                &lookup,
                "INVOICER_MAX_DISCOUNT_PERCENTAGE",
                defaults.max_discount_percentage,
            )?,
            max_tax_rate: read(&lookup, "INVOICER_MAX_TAX_RATE", defaults.max_tax_rate)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks that the limits make sense together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_items == 0 {
            return Err(ConfigError::Inconsistent(
                "max_line_items must be at least 1".to_string(),
            ));
        }

        if !(self.max_quantity.is_finite() && self.max_quantity > 0.0) {
            return Err(ConfigError::Inconsistent(
                "max_quantity must be a positive number".to_string(),
            ));
        }

        for (name, value) in [
            ("max_discount_percentage", self.max_discount_percentage),
            ("max_tax_rate", self.max_tax_rate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Inconsistent(format!(
                    "{name} must be between 0 and 100"
                )));
            }
        }

        Ok(())
    }
}

fn read<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}
