//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── MarketError      - Lookup failures (the NotFound class)           │
//! │  └── ValidationError  - Bad catalog seed data                          │
//! │                                                                         │
//! │  market-cli errors (app crate)                                         │
//! │  └── CliError         - Config, I/O and output failures                │
//! │                                                                         │
//! │  Flow: ValidationError → MarketError → CliError → stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending id in every message
//! 3. Every lookup failure is raised before any state changes

use thiserror::Error;

use crate::types::{ItemId, OrderId};

// =============================================================================
// Market Error
// =============================================================================

/// Errors raised by catalog and order operations.
///
/// Apart from [`MarketError::Validation`], every variant belongs to the
/// NotFound class: the caller asked for something that is not (or no
/// longer) available. Callers decide whether to retry with another id.
#[derive(Debug, Error)]
pub enum MarketError {
    /// No order with this id was ever created by the service.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The catalog has no item with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item exists but every unit has already been taken.
    ///
    /// ## User Workflow
    /// ```text
    /// Catalog: item 7, stock 2
    ///      │
    ///      ▼
    /// add item 7 ──► stock 1
    /// add item 7 ──► stock 0
    /// add item 7 ──► OutOfStock { item_id: 7, .. }
    /// ```
    #[error("Item {item_id} ({name}) is out of stock")]
    OutOfStock { item_id: ItemId, name: String },

    /// Catalog seed data was rejected (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl MarketError {
    /// Returns true for the lookup failures (unknown order, unknown item,
    /// exhausted stock).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MarketError::OrderNotFound(_)
                | MarketError::ItemNotFound(_)
                | MarketError::OutOfStock { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog seed validation errors.
///
/// Only raised while building a catalog from caller-supplied entries;
/// order operations trust their inputs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Duplicate value (e.g., two items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Prefixes the field name with `scope`, e.g. `price` becomes
    /// `catalog[7].price`.
    pub fn scoped(self, scope: &str) -> Self {
        let qualify = |field: String| format!("{scope}.{field}");
        match self {
            ValidationError::Required { field } => ValidationError::Required {
                field: qualify(field),
            },
            ValidationError::TooLong { field, max } => ValidationError::TooLong {
                field: qualify(field),
                max,
            },
            ValidationError::MustNotBeNegative { field } => ValidationError::MustNotBeNegative {
                field: qualify(field),
            },
            ValidationError::NotFinite { field } => ValidationError::NotFinite {
                field: qualify(field),
            },
            ValidationError::Duplicate { field, value } => ValidationError::Duplicate {
                field: qualify(field),
                value,
            },
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MarketError.
pub type MarketResult<T> = Result<T, MarketError>;
