//! # invoicer-core: Billing Calculation Engine
//!
//! This crate turns the raw lines of a bill (price, quantity, discount,
//! tax rate) into rounded line figures and bill totals. It is pure: no I/O,
//! no shared state, no async.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoicer Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Web application (Next.js)                       │   │
//! │  │    Bill form ──► API route ──► ORM (decimals stored as text)    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ line items                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ invoicer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ rounding  │─►│ calculator │  │  stored   │  │validation │  │   │
//! │  │   │  round    │  │ item, bill │  │ text ⇄ f64│  │  opt-in   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rounding`] - Epsilon-nudged currency rounding
//! - [`calculator`] - Line item and bill totals
//! - [`types`] - Engine inputs and outputs
//! - [`money`] - Integer-cent view of results
//! - [`stored`] - Conversion from and to the ORM's string decimals
//! - [`validation`] - Opt-in business rules
//! - [`config`] - Limits for the validation layer
//! - [`error`] - Error types of the non-engine layers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, callable from any thread
//! 2. **Round Every Step**: each intermediate figure is rounded to cents
//!    before the next step uses it, and bill sums are rounded again
//! 3. **Discount Before Tax**: tax is always computed on the discounted base
//! 4. **Total Engine**: the calculator never fails; validation is the
//!    caller's choice
//!
//! ## Example Usage
//!
//! ```rust
//! use invoicer_core::{calculate_bill_totals, LineItemInput};
//!
//! let totals = calculate_bill_totals(&[
//!     LineItemInput::new(0.1, 1.0, 0.0, 0.0),
//!     LineItemInput::new(0.2, 1.0, 0.0, 0.0),
//! ]);
//!
//! // Not 0.30000000000000004
//! assert_eq!(totals.total, 0.3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod config;
pub mod error;
pub mod money;
pub mod rounding;
pub mod stored;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate_bill, calculate_bill_totals, calculate_item_totals};
pub use config::BillingConfig;
pub use error::{ConfigError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rounding::{round, round_to};
pub use types::*;
