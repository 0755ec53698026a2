//! # Validation Module
//!
//! Checks applied to catalog seed data before a [`Catalog`](crate::Catalog)
//! is built from it.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundary                                │
//! │                                                                         │
//! │  market.toml [[catalog]] ──► Catalog::from_entries ──► THIS MODULE     │
//! │                                                                         │
//! │  MarketService operations ──► no validation (inputs are trusted)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use market_core::validation::{validate_item_name, validate_price};
//!
//! assert!(validate_item_name("Apple iPad Air").is_ok());
//! assert!(validate_price(-1.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest item name accepted in seed data.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite (no NaN, no infinity)
/// - Must be zero or greater (free items are allowed)
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_price;
///
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(12.25).is_ok());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}
