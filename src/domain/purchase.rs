use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Catalog, CatalogError, Cents, ItemCode, Ledger};

/// Why a purchase was refused. Each variant maps to its own customer message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("Quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    #[error("Invalid selection: {0}")]
    InvalidSelection(ItemCode),

    #[error("Not enough stock for item {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: ItemCode,
        available: u32,
        requested: i64,
    },

    #[error("Insufficient funds: balance {balance}, required {required:?}")]
    InsufficientFunds {
        balance: Cents,
        /// `None` when the total does not fit in `Cents`
        required: Option<Cents>,
    },
}

/// A committed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispensed {
    pub code: ItemCode,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Cents,
    pub total: Cents,
}

/// Exchange funds for stock, all or nothing.
///
/// Checks run in a fixed order and stop at the first failure:
/// quantity, selection, stock, funds. Nothing is mutated unless all pass.
pub fn purchase(
    catalog: &mut Catalog,
    ledger: &mut Ledger,
    code: ItemCode,
    quantity: i64,
) -> Result<Dispensed, PurchaseError> {
    if quantity <= 0 {
        return Err(PurchaseError::InvalidQuantity(quantity));
    }

    let item = catalog
        .lookup(code)
        .map_err(|_| PurchaseError::InvalidSelection(code))?;

    // A request larger than u32 can never be covered by stock
    let units = match u32::try_from(quantity) {
        Ok(units) if units <= item.stock => units,
        _ => {
            return Err(PurchaseError::InsufficientStock {
                code,
                available: item.stock,
                requested: quantity,
            });
        }
    };

    let total = item.cost_of(units);
    let total = match total {
        Some(total) if ledger.can_afford(total) => total,
        _ => {
            return Err(PurchaseError::InsufficientFunds {
                balance: ledger.balance(),
                required: total,
            });
        }
    };

    let dispensed = Dispensed {
        code,
        name: item.name.clone(),
        quantity: units,
        unit_price: item.price,
        total,
    };

    commit(catalog, ledger, code, units, total)?;

    Ok(dispensed)
}

/// Debit the ledger and take the units out of the slot as one step.
/// If the stock reduction fails the ledger is restored, so either both
/// changes land or neither does.
fn commit(
    catalog: &mut Catalog,
    ledger: &mut Ledger,
    code: ItemCode,
    units: u32,
    total: Cents,
) -> Result<(), PurchaseError> {
    let ledger_before = ledger.clone();

    ledger.debit(total).map_err(|_| PurchaseError::InsufficientFunds {
        balance: ledger.balance(),
        required: Some(total),
    })?;

    if let Err(err) = catalog.reduce_stock(code, units) {
        *ledger = ledger_before;
        return Err(match err {
            CatalogError::InsufficientStock { available, .. } => PurchaseError::InsufficientStock {
                code,
                available,
                requested: i64::from(units),
            },
            _ => PurchaseError::InvalidSelection(code),
        });
    }

    Ok(())
}
