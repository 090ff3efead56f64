//! # Report
//!
//! Projects ranked seller statistics into the final, rounded report.
//!
//! ## Output Shape
//! ```text
//! {
//!   "seller_id":    "seller_1",
//!   "name":         "Alexey Petrov",
//!   "revenue":      123456.78,      ← rounded, 2 decimals
//!   "profit":       45678.9,        ← rounded, 2 decimals
//!   "sales_count":  112,
//!   "top_products": [{ "sku": "SKU_001", "quantity": 27 }, ...],  ← ≤ 10
//!   "bonus":        6851.84         ← rounded, 2 decimals
//! }
//! ```
//!
//! Entries are emitted in ranking order; there is no sort on output.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round_money;
use crate::types::{ProductSales, SellerStats};

// =============================================================================
// Report Entry
// =============================================================================

/// One seller's line in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportEntry {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: usize,
    pub top_products: Vec<ProductSales>,
    pub bonus: f64,
}

impl From<SellerStats> for ReportEntry {
    fn from(stats: SellerStats) -> Self {
        ReportEntry {
            seller_id: stats.id,
            name: stats.name,
            revenue: round_money(stats.revenue),
            profit: round_money(stats.profit),
            sales_count: stats.sales_count,
            top_products: stats.top_products,
            bonus: round_money(stats.bonus.unwrap_or_default()),
        }
    }
}

/// Converts ranked statistics into report entries, preserving order.
pub fn build_report(ranked: Vec<SellerStats>) -> Vec<ReportEntry> {
    ranked.into_iter().map(ReportEntry::from).collect()
}

// =============================================================================
// Report Summary
// =============================================================================

/// Totals across every entry of a report.
///
/// Sums the already-rounded figures, so the summary always agrees with the
/// rows a reader sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSummary {
    pub sellers: usize,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_bonus: f64,
    pub total_sales: usize,
}

impl ReportSummary {
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let summary = entries
            .iter()
            .fold(ReportSummary::default(), |mut acc, entry| {
                acc.sellers += 1;
                acc.total_revenue += entry.revenue;
                acc.total_profit += entry.profit;
                acc.total_bonus += entry.bonus;
                acc.total_sales += entry.sales_count;
                acc
            });

        ReportSummary {
            total_revenue: round_money(summary.total_revenue),
            total_profit: round_money(summary.total_profit),
            total_bonus: round_money(summary.total_bonus),
            ..summary
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
