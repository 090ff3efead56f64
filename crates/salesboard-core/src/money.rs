//! # Money Module
//!
//! Rounding rules for monetary figures in the report.
//!
//! ## Why f64 Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUT IS ALREADY FLOATING POINT                                        │
//! │                                                                         │
//! │  Datasets carry prices like 15.57 and discounts like 12.5 (%).         │
//! │  Revenue policies return arbitrary reals (price × qty × (1 - d/100)).  │
//! │                                                                         │
//! │  OUR RULE:                                                              │
//! │    1. Accumulate in f64, in a fixed order (record, then item)          │
//! │    2. Round ONCE, at the report boundary, to 2 decimals                │
//! │                                                                         │
//! │  Fixed order + single rounding = byte-identical output on re-runs      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salesboard_core::money::round_money;
//!
//! assert_eq!(round_money(1.005_1), 1.01);
//! assert_eq!(round_money(-2.345_6), -2.35);
//! ```

/// Number of decimal places kept in reported figures.
pub const MONEY_DECIMALS: i32 = 2;

/// Rounds a monetary value to two decimal places.
///
/// ## Rounding Mode
/// Half away from zero, applied to the value scaled by 100:
/// ```text
///    0.125 →  0.13
///   -0.125 → -0.13
///    2.5   →  2.5   (already exact)
/// ```
/// The scaling multiplication is itself binary floating point, so a value
/// whose decimal form ends in 5 but is stored slightly below it (e.g. 1.005)
/// rounds down. That is deterministic and matches what `f64` actually holds.
///
/// ## Example
/// ```rust
/// use salesboard_core::money::round_money;
///
/// assert_eq!(round_money(8.000000000000002), 8.0);
/// assert_eq!(round_money(10.0 * 0.15), 1.5);
/// ```
pub fn round_money(value: f64) -> f64 {
    let scale = 10f64.powi(MONEY_DECIMALS);
    let rounded = (value * scale).round() / scale;
    // Keep -0.0 out of serialized output.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_basic() {
        assert_eq!(round_money(10.0), 10.0);
        assert_eq!(round_money(10.994), 10.99);
        assert_eq!(round_money(10.996), 11.0);
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(0.125), 0.13);
        assert_eq!(round_money(-0.125), -0.13);
    }

    #[test]
    fn test_round_money_cleans_float_noise() {
        // 80 × 0.1 in binary floating point
        assert_eq!(round_money(80.0 * 0.1), 8.0);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round_money_never_negative_zero() {
        let rounded = round_money(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }
}
