use serde::{Deserialize, Serialize};

use super::{Category, Cents};

/// Externally assigned product code. The code range decides the category.
pub type ItemCode = u32;

/// A purchasable product slot in the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub code: ItemCode,
    pub name: String,
    /// Unit price in cents
    pub price: Cents,
    /// Units left in the slot
    pub stock: u32,
}

impl Item {
    pub fn new(code: ItemCode, name: impl Into<String>, price: Cents, stock: u32) -> Self {
        Self {
            code,
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::for_code(self.code)
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock == 0
    }

    /// Price of `quantity` units, or `None` if it does not fit in `Cents`.
    pub fn cost_of(&self, quantity: u32) -> Option<Cents> {
        self.price.checked_mul(Cents::from(quantity))
    }
}
