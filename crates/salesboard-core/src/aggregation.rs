//! # Aggregation Engine
//!
//! Folds purchase records into per-seller running statistics.
//!
//! ## Dual Accounting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PurchaseRecord ────────────────────────► seller.revenue += total     │
//! │       │                                   seller.sales_count += 1     │
//! │       │                                                                │
//! │       └── for each LineItem                                            │
//! │             cost    = purchase_price × quantity                        │
//! │             revenue = RevenuePolicy(item, product)                     │
//! │             seller.profit += revenue - cost                            │
//! │             seller.products_sold[sku] += quantity                      │
//! │                                                                         │
//! │  Revenue comes from the receipt total, profit from the items.          │
//! │  The two are NOT reconciled: receipt totals are what the till said.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are processed in input order, items in receipt order, so the
//! floating-point sums are reproducible.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{AnalysisError, AnalysisResult};
use crate::policy::RevenuePolicy;
use crate::types::{LineItem, Product, Seller, SellerStats};
use crate::validation::ValidatedData;

// =============================================================================
// Seller Stats Map
// =============================================================================

/// Seller statistics keyed by seller id, kept in seller input order.
///
/// Input order is the tie-break when two sellers have equal profit.
#[derive(Debug, Clone, Default)]
pub struct SellerStatsMap {
    stats: Vec<SellerStats>,
    positions: HashMap<String, usize>,
}

impl SellerStatsMap {
    /// One all-zero entry per seller.
    pub fn from_sellers(sellers: &[Seller]) -> Self {
        let mut map = SellerStatsMap {
            stats: Vec::with_capacity(sellers.len()),
            positions: HashMap::with_capacity(sellers.len()),
        };
        for seller in sellers {
            map.positions.insert(seller.id.clone(), map.stats.len());
            map.stats.push(SellerStats::new(seller));
        }
        map
    }

    #[cfg(test)]
    pub(crate) fn get(&self, seller_id: &str) -> Option<&SellerStats> {
        self.positions.get(seller_id).map(|&pos| &self.stats[pos])
    }

    pub fn get_mut(&mut self, seller_id: &str) -> Option<&mut SellerStats> {
        match self.positions.get(seller_id) {
            Some(&pos) => Some(&mut self.stats[pos]),
            None => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.stats.len()
    }

    /// Statistics in seller input order.
    pub fn into_vec(self) -> Vec<SellerStats> {
        self.stats
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Builds per-seller statistics from validated data.
///
/// ## Errors
/// - [`AnalysisError::UnknownProduct`] when an item's SKU is not in `products`
/// - [`AnalysisError::UnknownSeller`] when a record's seller is not in `sellers`
///
/// Either error aborts the whole run; no partial map is returned.
pub fn aggregate_sales(
    data: &ValidatedData<'_>,
    revenue_policy: &dyn RevenuePolicy,
) -> AnalysisResult<SellerStatsMap> {
    let mut stats = SellerStatsMap::from_sellers(data.sellers);
    let products = index_products(data.products);
    let mut items_folded = 0usize;

    for record in data.purchase_records {
        let seller =
            stats
                .get_mut(&record.seller_id)
                .ok_or_else(|| AnalysisError::UnknownSeller {
                    seller_id: record.seller_id.clone(),
                })?;

        seller.sales_count += 1;
        seller.revenue += record.total_amount;

        for item in &record.items {
            let product = products
                .get(item.sku.as_str())
                .copied()
                .ok_or_else(|| AnalysisError::UnknownProduct {
                    sku: item.sku.clone(),
                })?;
            fold_item(seller, item, product, revenue_policy);
            items_folded += 1;
        }
    }

    debug!(
        sellers = stats.len(),
        records = data.purchase_records.len(),
        items = items_folded,
        "Purchase records aggregated"
    );
    Ok(stats)
}

/// SKU → product. A repeated SKU replaces the earlier product.
fn index_products(products: &[Product]) -> HashMap<&str, &Product> {
    products.iter().map(|p| (p.sku.as_str(), p)).collect()
}

fn fold_item(
    seller: &mut SellerStats,
    item: &LineItem,
    product: &Product,
    revenue_policy: &dyn RevenuePolicy,
) {
    let cost = product.purchase_price * f64::from(item.quantity);
    let revenue = revenue_policy.revenue(item, product);
    let profit = revenue - cost;

    trace!(seller_id = %seller.id, sku = %item.sku, revenue, cost, profit, "Line item folded");

    seller.profit += profit;
    seller.products_sold.add(&item.sku, u64::from(item.quantity));
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SimpleRevenue;
    use crate::types::{Customer, PurchaseRecord};

    fn seller(id: &str, first: &str, last: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
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

    struct Fixture {
        sellers: Vec<Seller>,
        products: Vec<Product>,
        customers: Vec<Customer>,
        records: Vec<PurchaseRecord>,
    }

    impl Fixture {
        fn new(records: Vec<PurchaseRecord>) -> Self {
            Fixture {
                sellers: vec![
                    seller("seller_1", "Ivan", "Petrov"),
                    seller("seller_2", "Maria", "Orlova"),
                ],
                products: vec![product("SKU_001", 10.0), product("SKU_002", 4.0)],
                customers: vec![Customer {
                    id: "customer_1".to_string(),
                    first_name: None,
                    last_name: None,
                    phone: None,
                    email: None,
                }],
                records,
            }
        }

        fn data(&self) -> ValidatedData<'_> {
            ValidatedData {
                sellers: &self.sellers,
                products: &self.products,
                customers: &self.customers,
                purchase_records: &self.records,
            }
        }
    }

    #[test]
    fn test_single_item_profit() {
        let fixture = Fixture::new(vec![record(
            "seller_1",
            30.0,
            vec![item("SKU_001", 2, 0.0, 15.0)],
        )]);

        let stats = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap();
        let s1 = stats.get("seller_1").unwrap();
        assert_eq!(s1.name, "Ivan Petrov");
        assert_eq!(s1.revenue, 30.0);
        assert_eq!(s1.profit, 10.0);
        assert_eq!(s1.sales_count, 1);
        assert_eq!(s1.products_sold.get("SKU_001"), Some(2));

        let s2 = stats.get("seller_2").unwrap();
        assert_eq!(s2.sales_count, 0);
        assert_eq!(s2.profit, 0.0);
    }

    #[test]
    fn test_revenue_uses_receipt_total_not_items() {
        // Items would yield 2 × 15 × 0.9 = 27, the receipt says 25.
        let fixture = Fixture::new(vec![record(
            "seller_1",
            25.0,
            vec![item("SKU_001", 2, 10.0, 15.0)],
        )]);

        let stats = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap();
        let s1 = stats.get("seller_1").unwrap();
        assert_eq!(s1.revenue, 25.0);
        assert!((s1.profit - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_quantities_accumulate_across_records() {
        let fixture = Fixture::new(vec![
            record("seller_2", 10.0, vec![item("SKU_002", 1, 0.0, 5.0)]),
            record(
                "seller_2",
                40.0,
                vec![item("SKU_001", 1, 0.0, 20.0), item("SKU_002", 3, 0.0, 5.0)],
            ),
        ]);

        let stats = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap();
        let s2 = stats.get("seller_2").unwrap();
        assert_eq!(s2.sales_count, 2);
        assert_eq!(s2.revenue, 50.0);
        assert_eq!(s2.products_sold.get("SKU_002"), Some(4));
        assert_eq!(s2.products_sold.get("SKU_001"), Some(1));
        // (5-4) + (20-10) + (15-12)
        assert_eq!(s2.profit, 14.0);
    }

    #[test]
    fn test_revenue_policy_called_once_per_item() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let counting = |item: &LineItem, _p: &Product| {
            calls.set(calls.get() + 1);
            f64::from(item.quantity)
        };
        let fixture = Fixture::new(vec![
            record("seller_1", 1.0, vec![item("SKU_001", 1, 0.0, 1.0)]),
            record(
                "seller_2",
                1.0,
                vec![item("SKU_001", 1, 0.0, 1.0), item("SKU_002", 1, 0.0, 1.0)],
            ),
        ]);

        aggregate_sales(&fixture.data(), &counting).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_unknown_seller_aborts() {
        let fixture = Fixture::new(vec![record("seller_9", 1.0, vec![])]);
        let err = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnknownSeller { ref seller_id } if seller_id == "seller_9"
        ));
    }

    #[test]
    fn test_unknown_product_aborts() {
        let fixture = Fixture::new(vec![record(
            "seller_1",
            1.0,
            vec![item("SKU_404", 1, 0.0, 1.0)],
        )]);
        let err = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnknownProduct { ref sku } if sku == "SKU_404"
        ));
    }

    #[test]
    fn test_map_keeps_seller_input_order() {
        let fixture = Fixture::new(vec![]);
        let stats = aggregate_sales(&fixture.data(), &SimpleRevenue).unwrap();
        let ids: Vec<String> = stats.into_vec().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["seller_1", "seller_2"]);
    }
}
