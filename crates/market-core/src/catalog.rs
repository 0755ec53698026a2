//! # Catalog
//!
//! The static table of purchasable items and their remaining stock.
//!
//! ## Stock Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Stock Lifecycle                              │
//! │                                                                         │
//! │  construction ──► stock seeded per item (never replenished)            │
//! │                                                                         │
//! │  take_item(7) ──► stock 2 → 1   Ok(Item 7)                             │
//! │  take_item(7) ──► stock 1 → 0   Ok(Item 7)                             │
//! │  take_item(7) ──► stock 0       Err(OutOfStock)                        │
//! │  take_item(99)──► no such id    Err(ItemNotFound)                      │
//! │                                                                         │
//! │  Lookup and decrement are ONE call: there is no way to observe an      │
//! │  item as available and then fail to reserve it.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{MarketError, MarketResult, ValidationError};
use crate::types::{Category, Item, ItemId};
use crate::validation::{validate_item_name, validate_price, ValidationResult};

/// Built-in seed table: (id, name, category, price, stock).
const STANDARD_SEED: &[(ItemId, &str, Category, f64, u32)] = &[
    (1, "Apple iPhone 15 Pro", Category::Smartphones, 119990.0, 10),
    (2, "Samsung Galaxy S24", Category::Smartphones, 89990.0, 8),
    (3, "Apple MacBook Air 13", Category::Laptops, 129990.0, 5),
    (4, "Lenovo ThinkPad X1 Carbon", Category::Laptops, 159990.0, 3),
    (5, "Apple iPad Air", Category::Tablets, 45990.0, 7),
    (6, "LG OLED C3 55", Category::Televisions, 139990.0, 4),
    (7, "Sony WH-1000XM5", Category::Audio, 34990.0, 2),
    (8, "Apple AirPods Pro", Category::Audio, 24990.0, 12),
    (9, "Anker PowerCore 20000", Category::Accessories, 4990.0, 25),
    (10, "Samsung Galaxy Tab S9", Category::Tablets, 56999.0, 6),
];

// =============================================================================
// Catalog Entry
// =============================================================================

/// One row of seed data: an item plus its initial stock.
///
/// Flat so it reads naturally in a config file:
/// ```toml
/// [[catalog]]
/// id = 5
/// name = "Apple iPad Air"
/// category = "tablets"
/// price = 45990.0
/// stock = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub stock: u32,
}

impl CatalogEntry {
    /// The item this row describes.
    pub fn item(&self) -> Item {
        Item::new(self.id, self.name.clone(), self.category, self.price)
    }

    /// Scope used in error messages, e.g. `catalog[7]`.
    fn scope(&self) -> String {
        format!("catalog[{}]", self.id)
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_item_name(&self.name)
            .and_then(|()| validate_price(self.price))
            .map_err(|err| err.scoped(&self.scope()))
    }
}

#[derive(Debug, Clone)]
struct StockSlot {
    item: Item,
    remaining: u32,
}

// =============================================================================
// Catalog
// =============================================================================

/// Item table with bounded, monotonically decreasing stock.
#[derive(Debug, Clone)]
pub struct Catalog {
    slots: BTreeMap<ItemId, StockSlot>,
}

impl Catalog {
    /// Builds the built-in ten-item electronics catalog.
    pub fn standard() -> Self {
        let slots = STANDARD_SEED
            .iter()
            .map(|&(id, name, category, price, stock)| {
                let slot = StockSlot {
                    item: Item::new(id, name, category, price),
                    remaining: stock,
                };
                (id, slot)
            })
            .collect();

        Catalog { slots }
    }

    /// Builds a catalog from caller-supplied seed rows.
    ///
    /// ## Errors
    /// - `ValidationError::Duplicate` if two rows share an id
    /// - name or price errors from [`crate::validation`]
    ///
    /// Every error names the offending row, e.g. `catalog[7].price`.
    ///
    /// ## Example
    /// ```rust
    /// use market_core::{Catalog, CatalogEntry, Category};
    ///
    /// let catalog = Catalog::from_entries(vec![CatalogEntry {
    ///     id: 5,
    ///     name: "Phone".to_string(),
    ///     category: Category::Smartphones,
    ///     price: 12.25,
    ///     stock: 1,
    /// }])
    /// .unwrap();
    /// assert_eq!(catalog.remaining_stock(5), Some(1));
    /// ```
    pub fn from_entries<I>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut slots = BTreeMap::new();

        for entry in entries {
            entry.validate()?;

            if slots.contains_key(&entry.id) {
                let err = ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: entry.id.to_string(),
                };
                return Err(err.scoped(&entry.scope()));
            }

            let slot = StockSlot {
                item: entry.item(),
                remaining: entry.stock,
            };
            slots.insert(entry.id, slot);
        }

        debug!(items = slots.len(), "Catalog built from seed entries");
        Ok(Catalog { slots })
    }

    /// Takes one unit of `id` and returns its item.
    ///
    /// This is the only way an item leaves the catalog. It is not a pure
    /// read: every success lowers the remaining stock by one.
    ///
    /// ## Errors
    /// - `ItemNotFound` if the id is unknown
    /// - `OutOfStock` if the stock is already zero (stock is left at zero)
    pub fn take_item(&mut self, id: ItemId) -> MarketResult<Item> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(MarketError::ItemNotFound(id))?;

        if slot.remaining == 0 {
            warn!(item_id = id, "Item is out of stock");
            return Err(MarketError::OutOfStock {
                item_id: id,
                name: slot.item.name().to_string(),
            });
        }

        slot.remaining -= 1;
        debug!(item_id = id, remaining = slot.remaining, "Took one unit from catalog");
        Ok(slot.item.clone())
    }

    /// Looks an item up without touching its stock.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(&id).map(|slot| &slot.item)
    }

    /// Units still available, or `None` for an unknown id.
    pub fn remaining_stock(&self, id: ItemId) -> Option<u32> {
        self.slots.get(&id).map(|slot| slot.remaining)
    }

    /// Items with their remaining stock, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, u32)> + '_ {
        self.slots.values().map(|slot| (&slot.item, slot.remaining))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: ItemId, price: f64, stock: u32) -> CatalogEntry {
        CatalogEntry {
            id,
            name: format!("Item {id}"),
            category: Category::Accessories,
            price,
            stock,
        }
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.remaining_stock(7), Some(2));
        assert_eq!(catalog.item(5).map(Item::price), Some(45990.0));

        let ids: Vec<ItemId> = catalog.iter().map(|(item, _)| item.id()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<ItemId>>());
    }

    #[test]
    fn test_take_item_decrements_stock() {
        let mut catalog = Catalog::from_entries(vec![entry(1, 3.0, 2)]).unwrap();

        let item = catalog.take_item(1).unwrap();
        assert_eq!(item.id(), 1);
        assert_eq!(catalog.remaining_stock(1), Some(1));

        catalog.take_item(1).unwrap();
        assert_eq!(catalog.remaining_stock(1), Some(0));
    }

    #[test]
    fn test_take_item_out_of_stock() {
        let mut catalog = Catalog::from_entries(vec![entry(1, 3.0, 1)]).unwrap();
        catalog.take_item(1).unwrap();

        let err = catalog.take_item(1).unwrap_err();
        assert!(matches!(err, MarketError::OutOfStock { item_id: 1, .. }));
        assert!(err.is_not_found());
        assert_eq!(catalog.remaining_stock(1), Some(0));
    }

    #[test]
    fn test_take_unknown_item() {
        let mut catalog = Catalog::standard();
        let err = catalog.take_item(99).unwrap_err();
        assert!(matches!(err, MarketError::ItemNotFound(99)));
        assert_eq!(catalog.remaining_stock(99), None);
    }

    #[test]
    fn test_peek_does_not_take_stock() {
        let catalog = Catalog::standard();
        assert!(catalog.item(7).is_some());
        assert!(catalog.item(7).is_some());
        assert_eq!(catalog.remaining_stock(7), Some(2));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let err = Catalog::from_entries(vec![entry(1, 3.0, 1), entry(1, 4.0, 1)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Duplicate {
                field: "catalog[1].id".to_string(),
                value: "1".to_string()
            }
        );
    }

    #[test]
    fn test_from_entries_names_the_bad_row() {
        let err =
            Catalog::from_entries(vec![entry(1, 3.0, 1), entry(8, -5.0, 1)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustNotBeNegative {
                field: "catalog[8].price".to_string()
            }
        );
        assert_eq!(err.to_string(), "catalog[8].price must not be negative");
    }

    #[test]
    fn test_from_entries_rejects_bad_rows() {
        assert!(Catalog::from_entries(vec![entry(1, -1.0, 1)]).is_err());

        let mut unnamed = entry(2, 1.0, 1);
        unnamed.name = String::new();
        assert!(matches!(
            Catalog::from_entries(vec![unnamed]),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_zero_stock_entry_is_listed_but_not_takeable() {
        let mut catalog = Catalog::from_entries(vec![entry(3, 1.0, 0)]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.take_item(3).is_err());
    }
}
