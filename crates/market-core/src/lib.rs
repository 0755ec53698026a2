//! # market-core: Pure Order Management for Market
//!
//! This crate holds every business rule of the market: the catalog and its
//! stock, per-order carts, promo-code discounts, and the service that ties
//! them together. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Market Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    market-cli (binary)                          │   │
//! │  │    config ──► logging ──► catalog / promos / order commands     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │   order   │  │  service  │  │   │
//! │  │   │  Client   │  │  Catalog  │  │   Order   │  │  Market   │  │   │
//! │  │   │   Item    │  │   stock   │  │   Cart    │  │  Service  │  │   │
//! │  │   │ PromoCode │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Value types (Client, Item, Category, PromoCode, DiscountRate)
//! - [`catalog`] - Static item table with bounded stock
//! - [`order`] - Order, cart and pricing
//! - [`service`] - Order registry and orchestration
//! - [`error`] - Domain error types
//! - [`validation`] - Seed data validation
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::{Client, MarketService, PromoCode};
//!
//! let mut service = MarketService::new();
//! let order_id = service.create_order_for(Client::new(1, "Alice"));
//!
//! service.add_item_to_order(7, order_id).unwrap();
//! service.add_item_to_order(10, order_id).unwrap();
//!
//! let total = service
//!     .apply_discount_for_order(order_id, PromoCode::HappyNewYear)
//!     .unwrap();
//! assert_eq!(total, 82790.1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod order;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogEntry};
pub use error::{MarketError, MarketResult, ValidationError};
pub use order::{Cart, CartLine, Order, OrderSummary};
pub use service::MarketService;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Identifier handed out to the first order of every service instance.
pub const FIRST_ORDER_ID: OrderId = 0;
