//! # Sales Analysis
//!
//! The single entry point of the crate.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesData + AnalysisOptions                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_input     ── InvalidInput / MissingOption                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate_sales    ── UnknownSeller / UnknownProduct                  │
//! │       │                 (calls RevenuePolicy per line item)            │
//! │       ▼                                                                 │
//! │  rank_sellers           (calls BonusPolicy per seller,                 │
//! │       │                  extracts top products)                        │
//! │       ▼                                                                 │
//! │  build_report       ── Vec<ReportEntry>, profit descending             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::aggregation::aggregate_sales;
use crate::error::AnalysisResult;
use crate::policy::{BonusByProfit, BonusPolicy, RevenuePolicy, SimpleRevenue};
use crate::ranking::rank_sellers;
use crate::report::{build_report, ReportEntry};
use crate::types::SalesData;
use crate::validation::validate_input;

// =============================================================================
// Analysis Options
// =============================================================================

/// The policies an analysis runs with.
///
/// A policy left unset is reported as a missing option when the analysis
/// starts.
#[derive(Default)]
pub struct AnalysisOptions {
    calculate_revenue: Option<Box<dyn RevenuePolicy>>,
    calculate_bonus: Option<Box<dyn BonusPolicy>>,
}

impl AnalysisOptions {
    /// Options with no policies set.
    pub fn new() -> Self {
        Self::default()
    }

    /// [`SimpleRevenue`] and the default [`BonusByProfit`] tiers.
    pub fn standard() -> Self {
        Self::new()
            .with_revenue_policy(SimpleRevenue)
            .with_bonus_policy(BonusByProfit::default())
    }

    pub fn with_revenue_policy(mut self, policy: impl RevenuePolicy + 'static) -> Self {
        self.calculate_revenue = Some(Box::new(policy));
        self
    }

    pub fn with_bonus_policy(mut self, policy: impl BonusPolicy + 'static) -> Self {
        self.calculate_bonus = Some(Box::new(policy));
        self
    }

    pub fn revenue_policy(&self) -> Option<&dyn RevenuePolicy> {
        self.calculate_revenue.as_deref()
    }

    pub fn bonus_policy(&self) -> Option<&dyn BonusPolicy> {
        self.calculate_bonus.as_deref()
    }
}

impl std::fmt::Debug for AnalysisOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .finish()
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Computes the per-seller performance report.
///
/// Returns one entry per seller, ordered by profit (highest first, ties in
/// seller input order). Fails before any aggregation on invalid input or
/// missing options, and aborts on the first unknown seller or SKU.
///
/// ## Example
/// ```rust
/// use salesboard_core::{analyze_sales_data, AnalysisOptions, SalesData};
///
/// let data = SalesData::from_json(r#"{
///     "sellers": [{"id": "s1", "first_name": "Ada", "last_name": "King"}],
///     "products": [{"sku": "P1", "purchase_price": 10}],
///     "customers": [{"id": "c1"}],
///     "purchase_records": [{"seller_id": "s1", "total_amount": 30,
///         "items": [{"sku": "P1", "quantity": 2, "discount": 0, "sale_price": 15}]}]
/// }"#).unwrap();
///
/// let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
/// assert_eq!(report[0].profit, 10.0);
/// assert_eq!(report[0].bonus, 1.5);
/// ```
pub fn analyze_sales_data(
    data: &SalesData,
    options: &AnalysisOptions,
) -> AnalysisResult<Vec<ReportEntry>> {
    let (validated, policies) = validate_input(data, options)?;
    let stats = aggregate_sales(&validated, policies.revenue)?;
    let ranked = rank_sellers(stats, policies.bonus);
    let report = build_report(ranked);

    debug!(entries = report.len(), "Sales report built");
    Ok(report)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisError, ValidationError};
    use crate::types::{Customer, LineItem, Product, PurchaseRecord, Seller, SellerStats};

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: "Seller".to_string(),
            last_name: id.to_string(),
            start_date: None,
            position: None,
        }
    }

    fn product(sku: &str, purchase_price: f64) -> Product {
        Product {
            sku: sku.to_string(),
            purchase_price,
            name: None,
            category: None,
            sale_price: None,
        }
    }

    fn item(sku: &str, quantity: u32, discount: f64, sale_price: f64) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            quantity,
            discount,
            sale_price,
        }
    }

    fn record(seller_id: &str, total_amount: f64, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            receipt_id: None,
            date: None,
            seller_id: seller_id.to_string(),
            customer_id: None,
            total_amount,
            total_discount: None,
            items,
        }
    }

    fn customers() -> Option<Vec<Customer>> {
        Some(vec![Customer {
            id: "customer_1".to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            email: None,
        }])
    }

    /// Four sellers, one product at cost 0 and price 1, so profit == quantity.
    fn ranked_dataset(profits: &[u32]) -> SalesData {
        let sellers: Vec<Seller> = (1..=profits.len())
            .map(|i| seller(&format!("seller_{i}")))
            .collect();
        let records = profits
            .iter()
            .enumerate()
            .map(|(i, &qty)| {
                record(
                    &format!("seller_{}", i + 1),
                    f64::from(qty),
                    vec![item("SKU_001", qty, 0.0, 1.0)],
                )
            })
            .collect();

        SalesData {
            sellers: Some(sellers),
            products: Some(vec![product("SKU_001", 0.0)]),
            customers: customers(),
            purchase_records: Some(records),
        }
    }

    /// A mixed dataset with repeat sales, discounts and many SKUs.
    fn busy_dataset() -> SalesData {
        let products: Vec<Product> = (1..=14)
            .map(|i| product(&format!("SKU_{i:03}"), 2.0 + f64::from(i) * 0.37))
            .collect();
        let mut records = Vec::new();
        for r in 0..40u32 {
            let seller_id = format!("seller_{}", r % 5 + 1);
            let items: Vec<LineItem> = (0..(r % 4 + 1))
                .map(|k| {
                    let sku = format!("SKU_{:03}", (r * 3 + k) % 14 + 1);
                    item(&sku, (r + k) % 6 + 1, f64::from((r * 7 + k) % 30), 9.99)
                })
                .collect();
            let total: f64 = items
                .iter()
                .map(|it| it.sale_price * f64::from(it.quantity) * (1.0 - it.discount / 100.0))
                .sum();
            records.push(record(&seller_id, total, items));
        }

        SalesData {
            sellers: Some((1..=6).map(|i| seller(&format!("seller_{i}"))).collect()),
            products: Some(products),
            customers: customers(),
            purchase_records: Some(records),
        }
    }

    #[test]
    fn test_single_seller_scenario() {
        let data = SalesData {
            sellers: Some(vec![seller("seller_1")]),
            products: Some(vec![product("SKU_001", 10.0)]),
            customers: customers(),
            purchase_records: Some(vec![record(
                "seller_1",
                30.0,
                vec![item("SKU_001", 2, 0.0, 15.0)],
            )]),
        };

        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        assert_eq!(report.len(), 1);
        let entry = &report[0];
        assert_eq!(entry.seller_id, "seller_1");
        assert_eq!(entry.name, "Seller seller_1");
        assert_eq!(entry.revenue, 30.0);
        assert_eq!(entry.profit, 10.0);
        assert_eq!(entry.sales_count, 1);
        assert_eq!(entry.bonus, 1.5);
        assert_eq!(entry.top_products.len(), 1);
        assert_eq!(entry.top_products[0].sku, "SKU_001");
        assert_eq!(entry.top_products[0].quantity, 2);
    }

    #[test]
    fn test_four_seller_bonus_scenario() {
        let data = ranked_dataset(&[50, 10, 100, 80]);
        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();

        let profits: Vec<f64> = report.iter().map(|e| e.profit).collect();
        assert_eq!(profits, vec![100.0, 80.0, 50.0, 10.0]);
        let bonuses: Vec<f64> = report.iter().map(|e| e.bonus).collect();
        assert_eq!(bonuses, vec![15.0, 8.0, 5.0, 0.0]);
    }

    #[test]
    fn test_one_entry_per_seller() {
        let data = busy_dataset();
        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();

        let sellers = data.sellers.as_ref().unwrap();
        assert_eq!(report.len(), sellers.len());
        for seller in sellers {
            let hits = report.iter().filter(|e| e.seller_id == seller.id).count();
            assert_eq!(hits, 1, "seller {} must appear once", seller.id);
        }
    }

    #[test]
    fn test_report_ordered_by_profit() {
        let report = analyze_sales_data(&busy_dataset(), &AnalysisOptions::standard()).unwrap();
        assert!(report.windows(2).all(|w| w[0].profit >= w[1].profit));
    }

    #[test]
    fn test_sales_count_totals_records() {
        let data = busy_dataset();
        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        let total: usize = report.iter().map(|e| e.sales_count).sum();
        assert_eq!(total, data.purchase_records.as_ref().unwrap().len());
    }

    #[test]
    fn test_top_products_bounded_and_sorted() {
        let report = analyze_sales_data(&busy_dataset(), &AnalysisOptions::standard()).unwrap();
        for entry in &report {
            assert!(entry.top_products.len() <= 10);
            assert!(entry
                .top_products
                .windows(2)
                .all(|w| w[0].quantity >= w[1].quantity));
        }
        // seller_1 sells more than ten distinct SKUs in this dataset.
        let seller_1 = report.iter().find(|e| e.seller_id == "seller_1").unwrap();
        assert_eq!(seller_1.top_products.len(), 10);
    }

    #[test]
    fn test_revenue_is_sum_of_receipt_totals() {
        let data = busy_dataset();
        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        let records = data.purchase_records.as_ref().unwrap();

        for entry in &report {
            let expected: f64 = records
                .iter()
                .filter(|r| r.seller_id == entry.seller_id)
                .map(|r| r.total_amount)
                .sum();
            assert_eq!(entry.revenue, crate::money::round_money(expected));
        }
    }

    #[test]
    fn test_rank_bonuses_with_default_policy() {
        let data = busy_dataset();
        let options = AnalysisOptions::standard();
        let report = analyze_sales_data(&data, &options).unwrap();
        let first = &report[0];
        let last = report.last().unwrap();

        // Bonus is taken on the unrounded profit.
        let (validated, policies) = validate_input(&data, &options).unwrap();
        let stats = aggregate_sales(&validated, policies.revenue).unwrap();
        let top_profit = stats.get(&first.seller_id).unwrap().profit;

        assert_eq!(first.bonus, crate::money::round_money(top_profit * 0.15));
        assert_eq!(last.bonus, 0.0);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let data = busy_dataset();
        let first = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        let second = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_purchase_history_gives_zero_report() {
        let mut data = ranked_dataset(&[1, 2, 3]);
        data.purchase_records = Some(vec![]);

        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        assert_eq!(report.len(), 3);
        let ids: Vec<&str> = report.iter().map(|e| e.seller_id.as_str()).collect();
        assert_eq!(ids, vec!["seller_1", "seller_2", "seller_3"]);
        for entry in &report {
            assert_eq!(entry.revenue, 0.0);
            assert_eq!(entry.profit, 0.0);
            assert_eq!(entry.bonus, 0.0);
            assert_eq!(entry.sales_count, 0);
            assert!(entry.top_products.is_empty());
        }
    }

    #[test]
    fn test_empty_sellers_is_invalid_input() {
        let mut data = ranked_dataset(&[1]);
        data.sellers = Some(vec![]);

        let err = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::InvalidInput { ref field, .. })
                if field == "sellers"
        ));
    }

    #[test]
    fn test_missing_bonus_policy_is_missing_option() {
        let options = AnalysisOptions::new().with_revenue_policy(SimpleRevenue);
        let err = analyze_sales_data(&ranked_dataset(&[1]), &options).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::MissingOption { ref option })
                if option == "calculate_bonus"
        ));
    }

    #[test]
    fn test_unknown_sku_is_unknown_product() {
        let mut data = ranked_dataset(&[1]);
        data.purchase_records = Some(vec![record(
            "seller_1",
            5.0,
            vec![item("SKU_MISSING", 1, 0.0, 5.0)],
        )]);

        let err = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownProduct { ref sku } if sku == "SKU_MISSING"));
    }

    #[test]
    fn test_large_quantities_accumulate_without_overflow() {
        let mut data = ranked_dataset(&[1]);
        let big = 4_000_000_000;
        data.purchase_records = Some(vec![
            record("seller_1", 4.0e9, vec![item("SKU_001", big, 0.0, 1.0)]),
            record("seller_1", 4.0e9, vec![item("SKU_001", big, 0.0, 1.0)]),
        ]);

        let report = analyze_sales_data(&data, &AnalysisOptions::standard()).unwrap();
        let entry = &report[0];
        assert_eq!(entry.sales_count, 2);
        assert_eq!(entry.top_products[0].quantity, 8_000_000_000);
        assert_eq!(entry.profit, 8.0e9);
    }

    #[test]
    fn test_custom_policies_are_used() {
        let options = AnalysisOptions::new()
            .with_revenue_policy(|item: &LineItem, _p: &Product| f64::from(item.quantity) * 2.0)
            .with_bonus_policy(|_i: usize, _t: usize, s: &SellerStats| s.profit);

        let report = analyze_sales_data(&ranked_dataset(&[3]), &options).unwrap();
        assert_eq!(report[0].profit, 6.0);
        assert_eq!(report[0].bonus, 6.0);
    }

    #[test]
    fn test_options_debug_hides_policies() {
        let debug = format!("{:?}", AnalysisOptions::standard());
        assert!(debug.contains("calculate_revenue: true"));
        assert!(debug.contains("calculate_bonus: true"));
    }
}
