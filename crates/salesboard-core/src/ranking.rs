//! # Ranking
//!
//! Orders sellers by profit, assigns bonuses by rank and picks each seller's
//! best-selling products.

use tracing::debug;

use crate::aggregation::SellerStatsMap;
use crate::policy::BonusPolicy;
use crate::types::{ProductSales, ProductTally, SellerStats};

/// Maximum number of entries in a seller's top products.
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// Sorts sellers by profit (highest first) and finalizes bonus and
/// top products.
///
/// The sort is stable: sellers with equal profit keep their input order.
/// `f64::total_cmp` keeps the sort total even if a policy produced NaN.
pub fn rank_sellers(stats: SellerStatsMap, bonus_policy: &dyn BonusPolicy) -> Vec<SellerStats> {
    let mut ranked = stats.into_vec();
    ranked.sort_by(|a, b| b.profit.total_cmp(&a.profit));

    let total = ranked.len();
    for (index, seller) in ranked.iter_mut().enumerate() {
        let bonus = bonus_policy.bonus(index, total, seller);
        seller.bonus = Some(bonus);
        seller.top_products = top_products(&seller.products_sold);
    }

    debug!(sellers = total, "Sellers ranked by profit");
    ranked
}

/// The [`TOP_PRODUCTS_LIMIT`] SKUs with the highest quantity, highest first.
///
/// Equal quantities keep first-sale order.
pub fn top_products(products_sold: &ProductTally) -> Vec<ProductSales> {
    let mut products: Vec<ProductSales> = products_sold.iter().cloned().collect();
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    products.truncate(TOP_PRODUCTS_LIMIT);
    products
}

// =============================================================================
// Unit Tests
// =============================================================================
