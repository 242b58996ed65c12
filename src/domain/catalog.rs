use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::{Category, Item, ItemCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("No item with code {0}")]
    NotFound(ItemCode),

    #[error("Insufficient stock for item {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: ItemCode,
        available: u32,
        requested: u32,
    },

    #[error("Duplicate item code: {0}")]
    DuplicateCode(ItemCode),

    #[error("Item code {0} does not belong to any category")]
    Uncategorized(ItemCode),
}

/// The machine's product slots, keyed by code.
///
/// Backed by a `BTreeMap` so every listing comes out in ascending code order.
/// Items are fixed at construction; only their stock changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: BTreeMap<ItemCode, Item>,
}

impl Catalog {
    /// Build a catalog from a seed list.
    /// Every code must be unique and fall inside a category range.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for item in items {
            if item.category().is_none() {
                return Err(CatalogError::Uncategorized(item.code));
            }
            if map.contains_key(&item.code) {
                return Err(CatalogError::DuplicateCode(item.code));
            }
            map.insert(item.code, item);
        }
        Ok(Self { items: map })
    }

    /// The stock the machine ships with.
    pub fn with_default_items() -> Self {
        let items = [
            Item::new(101, "Chocolate Bar", 150, 5),
            Item::new(102, "Gummy Bears", 100, 10),
            Item::new(103, "Lollipop", 75, 15),
            Item::new(201, "Coca-Cola", 200, 5),
            Item::new(202, "Pepsi", 175, 5),
            Item::new(203, "Sprite", 150, 5),
            Item::new(301, "Chips", 250, 5),
            Item::new(302, "Pretzels", 200, 5),
            Item::new(303, "Cookies", 150, 5),
        ];
        Self {
            items: items.into_iter().map(|item| (item.code, item)).collect(),
        }
    }

    pub fn lookup(&self, code: ItemCode) -> Result<&Item, CatalogError> {
        self.items.get(&code).ok_or(CatalogError::NotFound(code))
    }

    pub fn contains(&self, code: ItemCode) -> bool {
        self.items.contains_key(&code)
    }

    /// All entries with `min <= code <= max`, in ascending code order.
    /// An inverted range yields nothing.
    pub fn items_in_range(
        &self,
        min: ItemCode,
        max: ItemCode,
    ) -> impl Iterator<Item = (ItemCode, &Item)> + '_ {
        let entries = if min <= max {
            Some(self.items.range(min..=max))
        } else {
            None
        };
        entries
            .into_iter()
            .flatten()
            .map(|(code, item)| (*code, item))
    }

    pub fn items_in_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (ItemCode, &Item)> + '_ {
        let range = category.range();
        self.items_in_range(*range.start(), *range.end())
    }

    /// Remove `amount` units from the slot. Leaves the stock untouched on failure.
    pub fn reduce_stock(&mut self, code: ItemCode, amount: u32) -> Result<(), CatalogError> {
        let item = self
            .items
            .get_mut(&code)
            .ok_or(CatalogError::NotFound(code))?;
        if item.stock < amount {
            return Err(CatalogError::InsufficientStock {
                code,
                available: item.stock,
                requested: amount,
            });
        }
        item.stock -= amount;
        debug!(code, amount, remaining = item.stock, "stock reduced");
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
