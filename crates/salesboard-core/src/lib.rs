//! # salesboard-core: Seller Performance Analysis
//!
//! Turns raw sales data (sellers, products, purchase records) into a ranked
//! per-seller report: revenue, profit, number of sales, top products and a
//! rank-based bonus. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Salesboard Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 salesboard-cli (or any caller)                  │   │
//! │  │    load JSON ──► load config ──► analyze ──► print report       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SalesData + AnalysisOptions            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ salesboard-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  validation ─► aggregation ─► ranking ─► report                 │   │
//! │  │                     │            │                              │   │
//! │  │              RevenuePolicy   BonusPolicy                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • DETERMINISTIC                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input records and per-seller running statistics
//! - [`policy`] - Revenue and bonus policies (traits + defaults)
//! - [`validation`] - Presence/shape checks before aggregation
//! - [`aggregation`] - Folds purchase records into seller statistics
//! - [`ranking`] - Profit ranking, bonus assignment, top products
//! - [`report`] - Rounded output entries and summary totals
//! - [`money`] - Two-decimal rounding
//! - [`analysis`] - The `analyze_sales_data` entry point
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use salesboard_core::{analyze_sales_data, AnalysisOptions, BonusByProfit, SalesData};
//! use salesboard_core::policy::SimpleRevenue;
//!
//! let data: SalesData = SalesData::from_json(r#"{
//!     "sellers": [
//!         {"id": "s1", "first_name": "Ada", "last_name": "King"},
//!         {"id": "s2", "first_name": "Alan", "last_name": "Turing"}
//!     ],
//!     "products": [{"sku": "P1", "purchase_price": 1}],
//!     "customers": [{"id": "c1"}],
//!     "purchase_records": [
//!         {"seller_id": "s2", "total_amount": 10,
//!          "items": [{"sku": "P1", "quantity": 5, "discount": 0, "sale_price": 2}]}
//!     ]
//! }"#).unwrap();
//!
//! let options = AnalysisOptions::new()
//!     .with_revenue_policy(SimpleRevenue)
//!     .with_bonus_policy(BonusByProfit::default());
//!
//! let report = analyze_sales_data(&data, &options).unwrap();
//! assert_eq!(report[0].seller_id, "s2");
//! assert_eq!(report[0].profit, 5.0);
//! assert_eq!(report[0].bonus, 0.75);
//! assert_eq!(report[1].bonus, 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregation;
pub mod analysis;
pub mod error;
pub mod money;
pub mod policy;
pub mod ranking;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analysis::{analyze_sales_data, AnalysisOptions};
pub use error::{AnalysisError, AnalysisResult, ValidationError};
pub use policy::{BonusByProfit, BonusPolicy, RevenuePolicy, SimpleRevenue};
pub use ranking::TOP_PRODUCTS_LIMIT;
pub use report::{ReportEntry, ReportSummary};
pub use types::*;
