//! # Domain Types
//!
//! Value types shared by the catalog, orders and the service.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │      Item       │   │    PromoCode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (external)  │   │  id (catalog)   │   │  FirstOrder     │       │
//! │  │  name           │   │  name           │   │  HappyNewYear   │       │
//! │  └─────────────────┘   │  category       │   │  HappyHour      │       │
//! │                        │  price (f64)    │   │  BlackFriday    │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ rate()         │
//! │                                              ┌────────▼────────┐       │
//! │                                              │  DiscountRate   │       │
//! │                                              │  fraction [0,1) │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable once built. Prices are plain `f64`; no
//! currency rounding is applied anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Externally assigned client identifier.
pub type ClientId = u64;

/// Catalog item identifier.
pub type ItemId = u64;

/// Order identifier, allocated sequentially by the service.
pub type OrderId = u64;

// =============================================================================
// Client
// =============================================================================

/// The customer an order is placed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
}

impl Client {
    /// Creates a client record.
    pub fn new(id: ClientId, name: impl Into<String>) -> Self {
        Client {
            id,
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> ClientId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// Category
// =============================================================================

/// Catalog category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Smartphones,
    Laptops,
    Tablets,
    Televisions,
    Audio,
    Accessories,
}

impl Category {
    /// Lowercase label, identical to the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Smartphones => "smartphones",
            Category::Laptops => "laptops",
            Category::Tablets => "tablets",
            Category::Televisions => "televisions",
            Category::Audio => "audio",
            Category::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable catalog item.
///
/// ## Identity
/// Two items are equal when every field is equal; the price is compared by
/// bit pattern so `Item` can be `Eq` and `Hash` and serve as a cart key.
/// An item built by hand with the same fields as a catalog item is
/// interchangeable with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: Category,
    price: f64,
}

impl Item {
    /// Creates an item. Inputs are trusted; see
    /// [`Catalog::from_entries`](crate::Catalog::from_entries) for validated
    /// construction.
    pub fn new(id: ItemId, name: impl Into<String>, category: Category, price: f64) -> Self {
        Item {
            id,
            name: name.into(),
            category,
            price,
        }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.category == other.category
            && self.price.to_bits() == other.price.to_bits()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.category.hash(state);
        self.price.to_bits().hash(state);
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Fractional discount, e.g. `0.1` for ten percent off.
///
/// ## Why a fraction and not basis points?
/// Totals are `f64`, and the discounted total must equal
/// `subtotal * (1.0 - rate)` exactly. Keeping the rate as the same `f64`
/// the caller wrote avoids a second rounding step.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// Wraps a fraction. Not range checked.
    #[inline]
    pub const fn from_fraction(fraction: f64) -> Self {
        DiscountRate(fraction)
    }

    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Factor applied to a subtotal: `1 - fraction`.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 - self.0
    }

    /// Rate as a percentage, for display only.
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }
}

impl From<f64> for DiscountRate {
    fn from(fraction: f64) -> Self {
        DiscountRate::from_fraction(fraction)
    }
}

// =============================================================================
// Promo Code
// =============================================================================

/// The fixed table of promotional codes.
///
/// | Code             | Rate |
/// |------------------|------|
/// | `FIRST_ORDER`    | 5%   |
/// | `HAPPY_NEW_YEAR` | 10%  |
/// | `HAPPY_HOUR`     | 20%  |
/// | `BLACK_FRIDAY`   | 30%  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoCode {
    FirstOrder,
    HappyNewYear,
    HappyHour,
    BlackFriday,
}

impl PromoCode {
    /// Every code, in table order.
    pub const ALL: [PromoCode; 4] = [
        PromoCode::FirstOrder,
        PromoCode::HappyNewYear,
        PromoCode::HappyHour,
        PromoCode::BlackFriday,
    ];

    /// The discount this code grants.
    pub fn rate(&self) -> DiscountRate {
        let fraction = match self {
            PromoCode::FirstOrder => 0.05,
            PromoCode::HappyNewYear => 0.1,
            PromoCode::HappyHour => 0.2,
            PromoCode::BlackFriday => 0.3,
        };
        DiscountRate::from_fraction(fraction)
    }

    /// Wire name, as typed by customers.
    pub const fn code(&self) -> &'static str {
        match self {
            PromoCode::FirstOrder => "FIRST_ORDER",
            PromoCode::HappyNewYear => "HAPPY_NEW_YEAR",
            PromoCode::HappyHour => "HAPPY_HOUR",
            PromoCode::BlackFriday => "BLACK_FRIDAY",
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// Returned when a string names no known promo code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown promo code: {0}")]
pub struct ParsePromoCodeError(pub String);

impl FromStr for PromoCode {
    type Err = ParsePromoCodeError;

    /// Case-insensitive; `happy-hour` and `HAPPY_HOUR` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        PromoCode::ALL
            .into_iter()
            .find(|code| code.code() == normalized)
            .ok_or_else(|| ParsePromoCodeError(s.to_string()))
    }
}
