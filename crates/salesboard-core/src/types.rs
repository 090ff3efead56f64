//! # Domain Types
//!
//! Input records and the per-seller running statistics built from them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (immutable, deserialized from the dataset)                      │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Seller       │   │    Product      │   │ PurchaseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  sku            │   │  seller_id (FK) │       │
//! │  │  first_name     │   │  purchase_price │   │  total_amount   │       │
//! │  │  last_name      │   │                 │   │  items[]        │──┐    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘  │    │
//! │                                                                    ▼    │
//! │                                              ┌─────────────────┐       │
//! │                                              │    LineItem     │       │
//! │                                              │  sku (FK)       │       │
//! │                                              │  quantity       │       │
//! │                                              │  discount       │       │
//! │                                              │  sale_price     │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  DERIVED (mutable during one analysis run)                             │
//! │  ┌──────────────────────────────────────────────────────────────┐      │
//! │  │ SellerStats: revenue, profit, sales_count, products_sold,    │      │
//! │  │              bonus (after ranking), top_products             │      │
//! │  └──────────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown JSON fields are ignored. Optional fields are carried for callers
//! and never influence the computation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Seller
// =============================================================================

/// A salesperson whose performance is being reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Unique seller identifier.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub position: Option<String>,
}

impl Seller {
    /// Display name: `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalogue entry. Only `sku` and `purchase_price` matter for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Cost basis per unit.
    pub purchase_price: f64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// List price. Informational: line items carry their own sale price.
    #[serde(default)]
    pub sale_price: Option<f64>,
}

// =============================================================================
// Customer
// =============================================================================

/// A buyer. Required to be present in the dataset, unused by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Purchase Records
// =============================================================================

/// One product line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    /// Discount percentage, expected in 0..=100.
    pub discount: f64,
    /// Unit price charged before discount.
    pub sale_price: f64,
}

/// A receipt: one sale made by one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(default)]
    pub receipt_id: Option<String>,

    /// Sale date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<NaiveDate>,

    pub seller_id: String,

    #[serde(default)]
    pub customer_id: Option<String>,

    /// Receipt total as stated by the till. Feeds seller revenue directly.
    pub total_amount: f64,

    #[serde(default)]
    pub total_discount: Option<f64>,

    #[serde(default)]
    pub items: Vec<LineItem>,
}

// =============================================================================
// Sales Data
// =============================================================================

/// The full dataset handed to the analysis.
///
/// Every collection is optional so that a missing key and an empty array
/// stay distinguishable; the validator decides which is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    #[serde(default)]
    pub sellers: Option<Vec<Seller>>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
    #[serde(default)]
    pub purchase_records: Option<Vec<PurchaseRecord>>,
}

impl SalesData {
    /// Parses a dataset from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// Product Sales
// =============================================================================

/// Quantity of one SKU sold by one seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSales {
    pub sku: String,
    /// Sum of line-item quantities. Wider than a single item's `u32` so
    /// repeated large sales cannot overflow.
    #[ts(type = "number")]
    pub quantity: u64,
}

/// Cumulative quantities per SKU, in order of first sale.
///
/// First-sale order is what breaks ties when top products are ranked, so a
/// plain `HashMap` is not enough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTally {
    entries: Vec<ProductSales>,
    positions: HashMap<String, usize>,
}

impl ProductTally {
    /// Adds `quantity` to the running total for `sku`, starting it at zero.
    pub fn add(&mut self, sku: &str, quantity: u64) {
        match self.positions.get(sku) {
            Some(&pos) => self.entries[pos].quantity += quantity,
            None => {
                self.positions.insert(sku.to_string(), self.entries.len());
                self.entries.push(ProductSales {
                    sku: sku.to_string(),
                    quantity,
                });
            }
        }
    }

    /// Total quantity sold for `sku`, if it was sold at all.
    #[cfg(test)]
    pub(crate) fn get(&self, sku: &str) -> Option<u64> {
        self.positions.get(sku).map(|&pos| self.entries[pos].quantity)
    }

    /// Entries in first-sale order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductSales> {
        self.entries.iter()
    }
}

// =============================================================================
// Seller Stats
// =============================================================================

/// Running totals for one seller during one analysis.
///
/// ## Lifecycle
/// ```text
/// aggregate_sales  ──► revenue, profit, sales_count, products_sold
///        │
///        ▼
/// rank_sellers     ──► bonus, top_products (assigned once)
///        │
///        ▼
/// build_report     ──► ReportEntry (stats discarded)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub id: String,
    pub name: String,
    /// Sum of receipt totals.
    pub revenue: f64,
    /// Sum of per-item (policy revenue - cost).
    pub profit: f64,
    pub sales_count: usize,
    pub products_sold: ProductTally,
    /// `None` until ranking.
    pub bonus: Option<f64>,
    pub top_products: Vec<ProductSales>,
}

impl SellerStats {
    /// Fresh, all-zero statistics for a seller.
    pub fn new(seller: &Seller) -> Self {
        SellerStats {
            id: seller.id.clone(),
            name: seller.full_name(),
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: ProductTally::default(),
            bonus: None,
            top_products: Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
