//! # Error Types
//!
//! Domain-specific error types for salesboard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  salesboard-core errors (this file)                                    │
//! │  ├── AnalysisError    - Anything that aborts an analysis run           │
//! │  └── ValidationError  - Input/option checks, raised before aggregation │
//! │                                                                         │
//! │  salesboard-cli errors (app)                                           │
//! │  └── CliError         - File, JSON, config failures + AnalysisError    │
//! │                                                                         │
//! │  Flow: ValidationError → AnalysisError → CliError → exit code          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, seller id, SKU)
//! 3. Errors are enum variants, never String
//! 4. Nothing is retried or swallowed: every error reaches the caller

use thiserror::Error;

// =============================================================================
// Analysis Error
// =============================================================================

/// Errors that abort a sales analysis.
///
/// Validation failures happen before any seller statistics exist. Unknown
/// references are discovered mid-aggregation; the whole run is abandoned
/// because a partial report would misrepresent the ranking.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input or options failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A purchase record points at a seller that is not in `sellers`.
    ///
    /// ## When This Occurs
    /// - Purchase history exported before a seller was removed
    /// - Typo or stale id in hand-edited data
    #[error("Unknown seller: {seller_id}")]
    UnknownSeller { seller_id: String },

    /// A line item points at a SKU that is not in `products`.
    ///
    /// ## User Workflow
    /// ```text
    /// Receipt R-1042
    ///   └── item { sku: "SKU_099", quantity: 2 }
    ///            │
    ///            ▼
    ///   product index lookup: miss
    ///            │
    ///            ▼
    /// UnknownProduct { sku: "SKU_099" } → analysis aborted
    /// ```
    #[error("Unknown product: {sku}")]
    UnknownProduct { sku: String },
}

impl AnalysisError {
    /// True when the error was raised before aggregation started.
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised on the first failing check, before any mutation, so no partial
/// state escapes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required input collection is missing or malformed.
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    /// A required policy was not supplied.
    #[error("Missing option: {option}")]
    MissingOption { option: String },
}

impl ValidationError {
    pub(crate) fn missing(field: &str) -> Self {
        ValidationError::InvalidInput {
            field: field.to_string(),
            reason: "is required".to_string(),
        }
    }

    pub(crate) fn empty(field: &str) -> Self {
        ValidationError::InvalidInput {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AnalysisError.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

// =============================================================================
// Unit Tests
// =============================================================================
