//! # Orders
//!
//! A single order: who it belongs to, what is in its cart, and whether a
//! promo discount has been applied.
//!
//! ## Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How total_price() is derived                         │
//! │                                                                         │
//! │  cart lines (insertion order)                                          │
//! │    Sony WH-1000XM5        34990.0 × 1 ──┐                              │
//! │    Samsung Galaxy Tab S9  56999.0 × 1 ──┼──► subtotal  91989.0         │
//! │                                         │                              │
//! │  discount: Some(0.1) ───────────────────┴──► × (1 - 0.1)               │
//! │                                                                         │
//! │  total_price = 82790.1                                                 │
//! │                                                                         │
//! │  Nothing is cached: every query recomputes from the cart, so items     │
//! │  added after the discount are discounted too and nothing compounds.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Client, DiscountRate, Item, OrderId};

// =============================================================================
// Cart
// =============================================================================

/// One cart row. `quantity` is never zero.
///
/// Lines are only created by [`Order::add_item`], so callers can read them
/// but never build one with a zero quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    item: Item,
    quantity: u32,
}

impl CartLine {
    #[inline]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> f64 {
        self.item.price() * f64::from(self.quantity)
    }
}

/// Item → quantity mapping for one order.
///
/// ## Invariants
/// - Items are unique (adding an equal item increases its quantity)
/// - Every quantity is ≥ 1; an item not in the cart has no line at all
/// - Lines stay in insertion order, so the subtotal is summed the same way
///   on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `item`, inserting a new line if needed.
    fn add_one(&mut self, item: Item) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item == item) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine { item, quantity: 1 });
    }

    /// Quantity of `item`, or `None` if it was never added.
    pub fn quantity_of(&self, item: &Item) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| &line.item == item)
            .map(|line| line.quantity)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals, before any discount.
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLine> + '_ {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// ## State
/// ```text
/// ┌──────────────┐  apply_discount(rate)  ┌──────────────┐
/// │ undiscounted │───────────────────────►│  discounted  │──┐
/// └──────┬───────┘                        └──────┬───────┘  │ apply_discount
///        │ add_item                              │ add_item │ (no-op)
///        ▼                                       ▼          │
///   cart grows                              cart grows ◄────┘
/// ```
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    client: Client,
    cart: Cart,
    discount: Option<DiscountRate>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order with an empty cart and no discount.
    pub fn new(id: OrderId, client: Client) -> Self {
        Order {
            id,
            client,
            cart: Cart::new(),
            discount: None,
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `item` to the cart.
    ///
    /// The order does not consult the catalog; stock is the service's job.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::{Category, Client, Item, Order};
    ///
    /// let mut order = Order::new(1, Client::new(1, "NewClient"));
    /// let item = Item::new(1, "Phone", Category::Smartphones, 12.25);
    ///
    /// order.add_item(item.clone());
    /// order.add_item(item.clone());
    /// order.add_item(item.clone());
    ///
    /// assert_eq!(order.cart().quantity_of(&item), Some(3));
    /// assert_eq!(order.total_price(), 36.75);
    /// ```
    pub fn add_item(&mut self, item: Item) {
        self.cart.add_one(item);
    }

    /// Applies `rate` if no discount has been applied yet.
    ///
    /// Returns `true` if this call applied the discount. Any later call is a
    /// silent no-op that returns `false`, whatever its rate.
    pub fn apply_discount(&mut self, rate: impl Into<DiscountRate>) -> bool {
        if self.discount.is_some() {
            return false;
        }

        self.discount = Some(rate.into());
        true
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart subtotal before the discount.
    pub fn subtotal(&self) -> f64 {
        self.cart.subtotal()
    }

    /// Subtotal with the discount multiplier applied, if any.
    pub fn total_price(&self) -> f64 {
        let subtotal = self.cart.subtotal();
        match self.discount {
            Some(rate) => subtotal * rate.multiplier(),
            None => subtotal,
        }
    }

    #[inline]
    pub fn is_discount_applied(&self) -> bool {
        self.discount.is_some()
    }

    /// The rate that took effect, if a discount was applied.
    #[inline]
    pub fn discount_rate(&self) -> Option<DiscountRate> {
        self.discount
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Serializable snapshot of the order.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from(self)
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Read-only snapshot of an order, for output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub client: Client,
    pub lines: Vec<CartLine>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: f64,
    pub discount_rate: Option<DiscountRate>,
    pub discount_applied: bool,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        OrderSummary {
            id: order.id,
            client: order.client.clone(),
            lines: order.cart.lines.clone(),
            item_count: order.cart.len(),
            total_quantity: order.cart.total_quantity(),
            subtotal: order.subtotal(),
            discount_rate: order.discount,
            discount_applied: order.is_discount_applied(),
            total_price: order.total_price(),
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ItemId};

    fn client() -> Client {
        Client::new(1, "NewClient")
    }

    fn phone() -> Item {
        Item::new(1, "New item", Category::Smartphones, 12.25)
    }

    fn laptop() -> Item {
        Item::new(2, "New item 2", Category::Laptops, 78.52)
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new(1, client());

        assert_eq!(order.id(), 1);
        assert_eq!(order.client(), &client());
        assert_eq!(order.total_price(), 0.0);
        assert!(order.cart().is_empty());
        assert!(!order.is_discount_applied());
        assert_eq!(order.discount_rate(), None);
    }

    #[test]
    fn test_orders_keep_their_own_client() {
        let first = Order::new(1, Client::new(1, "NewClient1"));
        let second = Order::new(2, Client::new(2, "NewClient2"));

        assert_eq!(first.client().id(), 1);
        assert_eq!(second.client().id(), 2);
    }

    #[test]
    fn test_add_single_item() {
        let mut order = Order::new(1, client());
        order.add_item(phone());

        assert_eq!(order.total_price(), 12.25);
        assert_eq!(order.cart().len(), 1);
        assert_eq!(order.cart().quantity_of(&phone()), Some(1));
        assert_eq!(order.cart().lines()[0].item(), &phone());
    }

    #[test]
    fn test_add_same_item_accumulates_quantity() {
        let mut order = Order::new(1, client());
        for _ in 0..3 {
            order.add_item(phone());
        }

        assert_eq!(order.total_price(), 36.75);
        assert_eq!(order.cart().len(), 1);
        assert_eq!(order.cart().quantity_of(&phone()), Some(3));
        assert_eq!(order.cart().total_quantity(), 3);
    }

    #[test]
    fn test_add_distinct_items() {
        let mut order = Order::new(1, client());
        order.add_item(phone());
        order.add_item(laptop());
        order.add_item(laptop());

        let expected = phone().price() + laptop().price() * 2.0;
        assert_eq!(order.total_price(), expected);
        assert_eq!(order.cart().len(), 2);
        assert_eq!(order.cart().quantity_of(&phone()), Some(1));
        assert_eq!(order.cart().quantity_of(&laptop()), Some(2));
    }

    #[test]
    fn test_absent_item_has_no_line() {
        let mut order = Order::new(1, client());
        order.add_item(phone());
        assert_eq!(order.cart().quantity_of(&laptop()), None);
        assert!(order.cart().iter().all(|line| line.quantity() >= 1));
    }

    #[test]
    fn test_cart_lines_are_read_only_views() {
        let mut order = Order::new(1, client());
        order.add_item(laptop());
        order.add_item(phone());
        order.add_item(laptop());

        let lines: Vec<(ItemId, u32)> = order
            .cart()
            .into_iter()
            .map(|line| (line.item().id(), line.quantity()))
            .collect();
        assert_eq!(lines, vec![(2, 2), (1, 1)]);
        assert_eq!(order.cart().lines()[0].line_total(), 78.52 * 2.0);
    }

    #[test]
    fn test_apply_discount_once() {
        let mut order = Order::new(1, client());
        order.add_item(phone());

        assert!(order.apply_discount(0.2));

        assert_eq!(order.total_price(), 9.8);
        assert!(order.is_discount_applied());
    }

    #[test]
    fn test_second_discount_is_ignored() {
        let mut order = Order::new(1, client());
        order.add_item(phone());

        assert!(order.apply_discount(0.2));
        assert!(!order.apply_discount(0.3));

        assert_eq!(order.total_price(), 9.8);
        assert!(order.is_discount_applied());
        assert_eq!(order.discount_rate(), Some(DiscountRate::from_fraction(0.2)));
    }

    #[test]
    fn test_discount_applies_to_current_sum() {
        let a = Item::new(1, "A", Category::Accessories, 3.0);
        let b = Item::new(2, "B", Category::Accessories, 4.0);
        let mut order = Order::new(0, client());
        order.add_item(a.clone());
        order.add_item(a);
        order.add_item(b.clone());
        assert_eq!(order.total_price(), 10.0);

        order.apply_discount(0.5);
        assert_eq!(order.total_price(), 5.0);

        order.apply_discount(0.9);
        assert_eq!(order.total_price(), 5.0);

        // Later additions are discounted at the same rate, not compounded
        order.add_item(b);
        assert_eq!(order.subtotal(), 14.0);
        assert_eq!(order.total_price(), 7.0);
    }

    #[test]
    fn test_summary_snapshot() {
        let mut order = Order::new(4, client());
        order.add_item(phone());
        order.add_item(phone());
        order.apply_discount(0.5);

        let summary = order.summary();
        assert_eq!(summary.id, 4);
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.subtotal, 24.5);
        assert_eq!(summary.total_price, 12.25);
        assert!(summary.discount_applied);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalPrice"], 12.25);
        assert_eq!(json["discountRate"], 0.5);
        assert_eq!(json["lines"][0]["quantity"], 2);
        assert_eq!(json["client"]["name"], "NewClient");
    }
}
