//! # Rounding Module
//!
//! Currency rounding for floating point amounts.
//!
//! ## The Representation Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BINARY FLOATING POINT                                                  │
//! │                                                                         │
//! │    0.1 + 0.2         = 0.30000000000000004                              │
//! │    10.005 (stored)   = 10.00499999999999900524...                       │
//! │    10.005 × 100      = 1000.4999999999999        → naive round: 10.00  │
//! │                                                                         │
//! │  OUR SOLUTION: Epsilon Nudge                                            │
//! │    scaled = value × 10^decimals                                         │
//! │    scaled × (1 + ε)  = 1000.5000000000001        → round: 10.01        │
//! │                                                                         │
//! │  The nudge is relative to the magnitude (about two ulps), so it fixes  │
//! │  representation error at any scale without moving real values.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Halves round away from zero, symmetrically for negative amounts.

/// Number of decimal places every monetary value is rounded to.
pub const CURRENCY_DECIMALS: u32 = 2;

/// 2^52: the smallest magnitude at which f64 has no fractional bits.
const MAX_FRACTIONAL: f64 = 4_503_599_627_370_496.0;

/// Rounds a value to [`CURRENCY_DECIMALS`] decimal places.
///
/// ## Example
/// ```rust
/// use invoicer_core::rounding::round;
///
/// assert_eq!(round(10.005), 10.01);
/// assert_eq!(round(0.1 + 0.2), 0.3);
/// assert_eq!(round(99.999), 100.0);
/// ```
#[inline]
pub fn round(value: f64) -> f64 {
    round_to(value, CURRENCY_DECIMALS)
}

/// Rounds a value to `decimals` decimal places.
///
/// NaN and infinities are returned unchanged. Values too large to scale
/// without overflowing are already integral in `f64` and are returned as-is.
///
/// ## Example
/// ```rust
/// use invoicer_core::rounding::round_to;
///
/// assert_eq!(round_to(2.5, 0), 3.0);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// assert_eq!(round_to(1.23456, 3), 1.235);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // 10^308 is the largest finite power of ten; clamping also keeps the
    // exponent from wrapping negative in the i32 cast
    let factor = 10f64.powi(decimals.min(f64::MAX_10_EXP as u32) as i32);
    let scaled = value * factor;
    // Past 2^52 every f64 is an integer, so there is nothing left to round.
    // This also catches scaling overflow to infinity.
    if scaled.abs() >= MAX_FRACTIONAL {
        return value;
    }

    // f64::round already rounds halves away from zero
    (scaled * (1.0 + f64::EPSILON)).round() / factor
}

// =============================================================================
// Unit Tests
// =============================================================================
