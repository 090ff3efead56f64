//! # Policies
//!
//! Pluggable pricing rules used by the analysis.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RevenuePolicy: (LineItem, Product)            → revenue of one line   │
//! │  BonusPolicy:   (rank index, total, SellerStats) → seller bonus        │
//! │                                                                         │
//! │  Defaults:   SimpleRevenue, BonusByProfit                              │
//! │  Closures:   any matching Fn implements the trait                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policies are called synchronously inline and must be pure.

use crate::types::{LineItem, Product, SellerStats};

// =============================================================================
// Revenue Policy
// =============================================================================

/// Computes the revenue of one line item.
pub trait RevenuePolicy {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64;
}

impl<F> RevenuePolicy for F
where
    F: Fn(&LineItem, &Product) -> f64,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        self(item, product)
    }
}

/// `sale_price × quantity × (1 − discount / 100)`.
///
/// The discount is not range-checked; values outside 0..=100 produce
/// negative or inflated revenue.
///
/// ## Example
/// ```rust
/// use salesboard_core::policy::{RevenuePolicy, SimpleRevenue};
/// use salesboard_core::types::{LineItem, Product};
///
/// let item = LineItem { sku: "SKU_001".into(), quantity: 2, discount: 10.0, sale_price: 50.0 };
/// let product = Product {
///     sku: "SKU_001".into(), purchase_price: 30.0,
///     name: None, category: None, sale_price: None,
/// };
/// assert_eq!(SimpleRevenue.revenue(&item, &product), 90.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenuePolicy for SimpleRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> f64 {
        let discount_factor = 1.0 - item.discount / 100.0;
        item.sale_price * f64::from(item.quantity) * discount_factor
    }
}

// =============================================================================
// Bonus Policy
// =============================================================================

/// Computes a seller's bonus from their position in the profit ranking.
///
/// `index` is 0-based (0 = highest profit), `total` is the number of sellers.
pub trait BonusPolicy {
    fn bonus(&self, index: usize, total: usize, seller: &SellerStats) -> f64;
}

impl<F> BonusPolicy for F
where
    F: Fn(usize, usize, &SellerStats) -> f64,
{
    fn bonus(&self, index: usize, total: usize, seller: &SellerStats) -> f64 {
        self(index, total, seller)
    }
}

/// Tiered bonus by profit rank.
///
/// ## Tiers (checked top to bottom, first match wins)
/// ```text
/// ┌──────────────────────────────┬───────────────────────────────┐
/// │ index == 0                   │ profit × first_place_rate     │
/// │ index == 1 or index == 2     │ profit × podium_rate          │
/// │ index == total - 1           │ 0                             │
/// │ everyone else                │ profit × base_rate            │
/// └──────────────────────────────┴───────────────────────────────┘
/// ```
/// With a single seller, index 0 is also the last index; the first-place
/// tier applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusByProfit {
    pub first_place_rate: f64,
    pub podium_rate: f64,
    pub base_rate: f64,
}

impl BonusByProfit {
    pub const DEFAULT_FIRST_PLACE_RATE: f64 = 0.15;
    pub const DEFAULT_PODIUM_RATE: f64 = 0.10;
    pub const DEFAULT_BASE_RATE: f64 = 0.05;

    pub fn with_rates(first_place_rate: f64, podium_rate: f64, base_rate: f64) -> Self {
        BonusByProfit {
            first_place_rate,
            podium_rate,
            base_rate,
        }
    }
}

impl Default for BonusByProfit {
    fn default() -> Self {
        BonusByProfit::with_rates(
            Self::DEFAULT_FIRST_PLACE_RATE,
            Self::DEFAULT_PODIUM_RATE,
            Self::DEFAULT_BASE_RATE,
        )
    }
}

impl BonusPolicy for BonusByProfit {
    fn bonus(&self, index: usize, total: usize, seller: &SellerStats) -> f64 {
        let profit = seller.profit;
        if index == 0 {
            profit * self.first_place_rate
        } else if index == 1 || index == 2 {
            profit * self.podium_rate
        } else if index + 1 == total {
            0.0
        } else {
            profit * self.base_rate
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
