//! # Validation Module
//!
//! Presence and shape checks run before any statistics are built.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. sellers           present, non-empty, unique ids                   │
//! │  2. products          present, non-empty                               │
//! │  3. customers         present, non-empty                               │
//! │  4. purchase_records  present (empty is a valid, all-zero history)     │
//! │  5. calculate_revenue supplied                                         │
//! │  6. calculate_bonus   supplied                                         │
//! │                                                                         │
//! │  First failure wins. Nothing is mutated.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Referential integrity (seller ids on records, SKUs on items) is checked
//! during aggregation, where the lookups happen anyway.

use std::collections::HashSet;

use tracing::debug;

use crate::analysis::AnalysisOptions;
use crate::error::ValidationError;
use crate::policy::{BonusPolicy, RevenuePolicy};
use crate::types::{Customer, Product, PurchaseRecord, SalesData, Seller};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Option name reported when the revenue policy is missing.
pub const REVENUE_OPTION: &str = "calculate_revenue";
/// Option name reported when the bonus policy is missing.
pub const BONUS_OPTION: &str = "calculate_bonus";

/// Dataset collections, proven present.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedData<'a> {
    pub sellers: &'a [Seller],
    pub products: &'a [Product],
    pub customers: &'a [Customer],
    pub purchase_records: &'a [PurchaseRecord],
}

/// Both policies, proven supplied.
#[derive(Clone, Copy)]
pub struct Policies<'a> {
    pub revenue: &'a dyn RevenuePolicy,
    pub bonus: &'a dyn BonusPolicy,
}

impl std::fmt::Debug for Policies<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policies")
            .field("revenue", &"dyn RevenuePolicy")
            .field("bonus", &"dyn BonusPolicy")
            .finish()
    }
}

/// Validates the dataset, then the options.
///
/// ## Example
/// ```rust
/// use salesboard_core::analysis::AnalysisOptions;
/// use salesboard_core::types::SalesData;
/// use salesboard_core::validation::validate_input;
///
/// let err = validate_input(&SalesData::default(), &AnalysisOptions::standard()).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid input: sellers is required");
/// ```
pub fn validate_input<'a>(
    data: &'a SalesData,
    options: &'a AnalysisOptions,
) -> ValidationResult<(ValidatedData<'a>, Policies<'a>)> {
    let data = validate_data(data)?;
    let policies = validate_options(options)?;
    debug!(
        sellers = data.sellers.len(),
        products = data.products.len(),
        purchase_records = data.purchase_records.len(),
        "Sales data validated"
    );
    Ok((data, policies))
}

/// Checks that every collection exists and the reference collections are
/// non-empty.
pub fn validate_data(data: &SalesData) -> ValidationResult<ValidatedData<'_>> {
    let sellers = require_non_empty("sellers", data.sellers.as_deref())?;
    let products = require_non_empty("products", data.products.as_deref())?;
    let customers = require_non_empty("customers", data.customers.as_deref())?;
    let purchase_records = data
        .purchase_records
        .as_deref()
        .ok_or_else(|| ValidationError::missing("purchase_records"))?;

    validate_unique_seller_ids(sellers)?;

    Ok(ValidatedData {
        sellers,
        products,
        customers,
        purchase_records,
    })
}

/// Checks that both policies were supplied.
pub fn validate_options(options: &AnalysisOptions) -> ValidationResult<Policies<'_>> {
    let revenue = options
        .revenue_policy()
        .ok_or_else(|| ValidationError::MissingOption {
            option: REVENUE_OPTION.to_string(),
        })?;
    let bonus = options
        .bonus_policy()
        .ok_or_else(|| ValidationError::MissingOption {
            option: BONUS_OPTION.to_string(),
        })?;

    Ok(Policies { revenue, bonus })
}

fn require_non_empty<'a, T>(field: &str, items: Option<&'a [T]>) -> ValidationResult<&'a [T]> {
    match items {
        None => Err(ValidationError::missing(field)),
        Some([]) => Err(ValidationError::empty(field)),
        Some(items) => Ok(items),
    }
}

fn validate_unique_seller_ids(sellers: &[Seller]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(sellers.len());
    for seller in sellers {
        if !seen.insert(seller.id.as_str()) {
            return Err(ValidationError::InvalidInput {
                field: "sellers".to_string(),
                reason: format!("contains duplicate id '{}'", seller.id),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
