//! # Market Service
//!
//! Top-level orchestrator: allocates order ids, owns every order, and is
//! the only path by which catalog items reach a cart.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    add_item_to_order(item_id, order_id)                 │
//! │                                                                         │
//! │  1. orders[order_id] exists? ── no ──► Err(OrderNotFound)              │
//! │         │ yes                         (catalog untouched)               │
//! │         ▼                                                               │
//! │  2. catalog.take_item(item_id) ── fails ──► Err(ItemNotFound |         │
//! │         │ ok (stock - 1)                        OutOfStock)            │
//! │         ▼                                   (cart untouched)            │
//! │  3. order.add_item(item)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The service owns the registry and the catalog outright; callers get
//! `&Order` views and mutate only through `&mut self` methods.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{MarketError, MarketResult};
use crate::order::Order;
use crate::types::{Client, ItemId, OrderId, PromoCode};
use crate::FIRST_ORDER_ID;

/// Order registry plus catalog.
#[derive(Debug)]
pub struct MarketService {
    next_order_id: OrderId,
    orders: HashMap<OrderId, Order>,
    catalog: Catalog,
}

impl MarketService {
    /// Creates a service backed by the standard catalog.
    pub fn new() -> Self {
        MarketService::with_catalog(Catalog::standard())
    }

    /// Creates a service backed by `catalog`.
    pub fn with_catalog(catalog: Catalog) -> Self {
        MarketService {
            next_order_id: FIRST_ORDER_ID,
            orders: HashMap::new(),
            catalog,
        }
    }

    /// Opens a new order for `client` and returns its id.
    ///
    /// Ids start at 0 and increase by one per call; they are never reused.
    pub fn create_order_for(&mut self, client: Client) -> OrderId {
        let id = self.next_order_id;
        self.next_order_id += 1;

        info!(order_id = id, client_id = client.id(), "Order created");
        self.orders.insert(id, Order::new(id, client));
        id
    }

    /// Takes one unit of `item_id` from the catalog and adds it to the order.
    ///
    /// ## Errors
    /// - `OrderNotFound` if the order does not exist (no stock is taken)
    /// - `ItemNotFound` / `OutOfStock` from the catalog (the cart is unchanged)
    pub fn add_item_to_order(&mut self, item_id: ItemId, order_id: OrderId) -> MarketResult<()> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(MarketError::OrderNotFound(order_id))?;

        let item = self.catalog.take_item(item_id)?;

        debug!(order_id, item_id, "Adding item to order");
        order.add_item(item);
        Ok(())
    }

    /// Applies `promo_code` to the order and returns the resulting total.
    ///
    /// Only the first code applied to an order takes effect; later codes
    /// leave the total unchanged.
    pub fn apply_discount_for_order(
        &mut self,
        order_id: OrderId,
        promo_code: PromoCode,
    ) -> MarketResult<f64> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(MarketError::OrderNotFound(order_id))?;

        if order.apply_discount(promo_code.rate()) {
            info!(order_id, promo = %promo_code, "Discount applied");
        } else {
            warn!(order_id, promo = %promo_code, "Order already discounted, promo ignored");
        }

        Ok(order.total_price())
    }

    /// Returns the order for inspection.
    pub fn order_info(&self, order_id: OrderId) -> MarketResult<&Order> {
        self.orders
            .get(&order_id)
            .ok_or(MarketError::OrderNotFound(order_id))
    }

    /// The catalog, with its current stock levels.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of orders created so far.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for MarketService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::types::Category;

    fn client() -> Client {
        Client::new(1, "NewClient")
    }

    fn single_item_catalog(id: ItemId, price: f64, stock: u32) -> Catalog {
        Catalog::from_entries(vec![CatalogEntry {
            id,
            name: "Phone".to_string(),
            category: Category::Smartphones,
            price,
            stock,
        }])
        .unwrap()
    }

    #[test]
    fn test_order_ids_start_at_zero_and_increase() {
        let mut service = MarketService::new();

        assert_eq!(service.create_order_for(client()), 0);
        assert_eq!(service.create_order_for(Client::new(2, "Other")), 1);
        assert_eq!(service.create_order_for(client()), 2);
        assert_eq!(service.order_count(), 3);
    }

    #[test]
    fn test_add_item_goes_to_the_right_order() {
        let mut service = MarketService::new();
        let first = service.create_order_for(Client::new(1, "NewClient"));
        let second = service.create_order_for(Client::new(2, "NewClient2"));
        let expected = service.catalog().item(5).cloned().unwrap();

        service.add_item_to_order(5, first).unwrap();

        let first_cart = service.order_info(first).unwrap().cart();
        assert_eq!(first_cart.len(), 1);
        assert_eq!(first_cart.lines()[0].item(), &expected);
        assert!(service.order_info(second).unwrap().cart().is_empty());
    }

    #[test]
    fn test_order_info() {
        let mut service = MarketService::new();
        let order_id = service.create_order_for(client());
        let iphone = service.catalog().item(1).cloned().unwrap();
        let ipad = service.catalog().item(5).cloned().unwrap();

        service.add_item_to_order(1, order_id).unwrap();
        service.add_item_to_order(1, order_id).unwrap();
        service.add_item_to_order(5, order_id).unwrap();

        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.client(), &client());
        assert_eq!(order.total_price(), 285970.0);
        assert!(!order.is_discount_applied());
        assert_eq!(order.cart().len(), 2);
        assert_eq!(order.cart().quantity_of(&iphone), Some(2));
        assert_eq!(order.cart().quantity_of(&ipad), Some(1));
    }

    #[test]
    fn test_stock_exhaustion() {
        let mut service = MarketService::new();
        let order_id = service.create_order_for(client());

        service.add_item_to_order(7, order_id).unwrap();
        service.add_item_to_order(7, order_id).unwrap();

        let err = service.add_item_to_order(7, order_id).unwrap_err();
        assert!(matches!(err, MarketError::OutOfStock { item_id: 7, .. }));
        assert!(err.is_not_found());

        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.cart().total_quantity(), 2);
        assert_eq!(order.total_price(), 69980.0);
    }

    #[test]
    fn test_single_unit_item_end_to_end() {
        let mut service = MarketService::with_catalog(single_item_catalog(5, 12.25, 1));
        let order_id = service.create_order_for(client());

        service.add_item_to_order(5, order_id).unwrap();
        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.total_price(), 12.25);
        assert_eq!(order.cart().len(), 1);

        assert!(service.add_item_to_order(5, order_id).is_err());
        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.cart().len(), 1);
        assert_eq!(order.cart().total_quantity(), 1);
        assert_eq!(order.total_price(), 12.25);
    }

    #[test]
    fn test_unknown_item() {
        let mut service = MarketService::new();
        let order_id = service.create_order_for(client());

        let err = service.add_item_to_order(404, order_id).unwrap_err();
        assert!(matches!(err, MarketError::ItemNotFound(404)));
        assert!(service.order_info(order_id).unwrap().cart().is_empty());
    }

    #[test]
    fn test_unknown_order_does_not_consume_stock() {
        let mut service = MarketService::new();

        let err = service.add_item_to_order(7, 99).unwrap_err();
        assert!(matches!(err, MarketError::OrderNotFound(99)));
        assert_eq!(service.catalog().remaining_stock(7), Some(2));
    }

    #[test]
    fn test_stock_is_shared_across_orders() {
        let mut service = MarketService::new();
        let first = service.create_order_for(client());
        let second = service.create_order_for(client());

        service.add_item_to_order(7, first).unwrap();
        service.add_item_to_order(7, second).unwrap();

        assert!(service.add_item_to_order(7, first).is_err());
        assert_eq!(service.catalog().remaining_stock(7), Some(0));
    }

    #[test]
    fn test_apply_promo_code() {
        let mut service = MarketService::new();
        let order_id = service.create_order_for(client());
        service.add_item_to_order(7, order_id).unwrap();
        service.add_item_to_order(10, order_id).unwrap();

        let total = service
            .apply_discount_for_order(order_id, PromoCode::HappyNewYear)
            .unwrap();

        assert_eq!(total, 82790.1);
        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.total_price(), 82790.1);
        assert!(order.is_discount_applied());
    }

    #[test]
    fn test_only_first_promo_code_counts() {
        let mut service = MarketService::new();
        let order_id = service.create_order_for(client());
        service.add_item_to_order(7, order_id).unwrap();
        service.add_item_to_order(10, order_id).unwrap();

        service
            .apply_discount_for_order(order_id, PromoCode::HappyNewYear)
            .unwrap();
        let total = service
            .apply_discount_for_order(order_id, PromoCode::HappyHour)
            .unwrap();

        assert_eq!(total, 82790.1);
        let order = service.order_info(order_id).unwrap();
        assert_eq!(order.total_price(), 82790.1);
        assert!(order.is_discount_applied());
    }

    #[test]
    fn test_unknown_order_lookups() {
        let mut service = MarketService::new();

        assert!(matches!(
            service.order_info(0),
            Err(MarketError::OrderNotFound(0))
        ));
        assert!(matches!(
            service.apply_discount_for_order(3, PromoCode::FirstOrder),
            Err(MarketError::OrderNotFound(3))
        ));
    }
}
