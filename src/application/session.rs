use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    Catalog, Category, Cents, Dispensed, Item, ItemCode, Ledger, PurchaseError, purchase,
};

use super::AppError;

pub type SessionId = Uuid;
pub type SaleId = Uuid;

/// One committed purchase, as recorded on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub code: ItemCode,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Cents,
    pub total: Cents,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    fn from_dispensed(dispensed: &Dispensed) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: dispensed.code,
            name: dispensed.name.clone(),
            quantity: dispensed.quantity,
            unit_price: dispensed.unit_price,
            total: dispensed.total,
            sold_at: Utc::now(),
        }
    }
}

/// Display row for a catalog listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: ItemCode,
    pub name: String,
    pub price: Cents,
    pub stock: u32,
}

impl From<&Item> for CatalogEntry {
    fn from(item: &Item) -> Self {
        Self {
            code: item.code,
            name: item.name.clone(),
            price: item.price,
            stock: item.stock,
        }
    }
}

/// Summary of a session, suitable for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub inserted: Cents,
    pub spent: Cents,
    pub refunded: Cents,
    pub sales: Vec<Sale>,
}

/// A customer's session at the machine.
///
/// Owns the catalog and the ledger exclusively; this is the only interface
/// the console loop (or any other client) talks to.
pub struct VendingSession {
    id: SessionId,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    catalog: Catalog,
    ledger: Ledger,
    sales: Vec<Sale>,
    inserted: Cents,
    refunded: Cents,
    takings: Cents,
}

impl VendingSession {
    pub fn new(catalog: Catalog) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            catalog,
            ledger: Ledger::new(),
            sales: Vec::new(),
            inserted: 0,
            refunded: 0,
            takings: 0,
        };
        debug!(session_id = %session.id, items = session.catalog.len(), "session started");
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn balance(&self) -> Cents {
        self.ledger.balance()
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Money the machine has kept from committed purchases.
    pub fn takings(&self) -> Cents {
        self.takings
    }

    pub fn insert_funds(&mut self, amount: Cents) -> Result<Cents, AppError> {
        self.ledger.credit(amount)?;
        self.inserted = self.inserted.saturating_add(amount);
        info!(session_id = %self.id, amount, balance = self.ledger.balance(), "funds inserted");
        Ok(self.ledger.balance())
    }

    pub fn list_category(&self, category: Category) -> Vec<CatalogEntry> {
        self.catalog
            .items_in_category(category)
            .map(|(_, item)| CatalogEntry::from(item))
            .collect()
    }

    pub fn list_range(&self, min: ItemCode, max: ItemCode) -> Vec<CatalogEntry> {
        self.catalog
            .items_in_range(min, max)
            .map(|(_, item)| CatalogEntry::from(item))
            .collect()
    }

    pub fn purchase(&mut self, code: ItemCode, quantity: i64) -> Result<Dispensed, PurchaseError> {
        match purchase(&mut self.catalog, &mut self.ledger, code, quantity) {
            Ok(dispensed) => {
                self.takings = self.takings.saturating_add(dispensed.total);
                self.sales.push(Sale::from_dispensed(&dispensed));
                info!(
                    session_id = %self.id,
                    code,
                    quantity = dispensed.quantity,
                    total = dispensed.total,
                    balance = self.ledger.balance(),
                    "dispensed"
                );
                Ok(dispensed)
            }
            Err(err) => {
                warn!(session_id = %self.id, code, quantity, error = %err, "purchase rejected");
                Err(err)
            }
        }
    }

    /// Refund everything left. Returns the refunded amount, zero if nothing was left.
    pub fn end_session(&mut self) -> Cents {
        let refunded = self.ledger.drain();
        self.refunded = self.refunded.saturating_add(refunded);
        self.ended_at.get_or_insert_with(Utc::now);
        if refunded > 0 {
            info!(session_id = %self.id, refunded, "refund issued");
        } else {
            debug!(session_id = %self.id, "nothing to refund");
        }
        refunded
    }

    pub fn receipt(&self) -> Receipt {
        Receipt {
            session_id: self.id,
            started_at: self.started_at,
            ended_at: self.ended_at,
            inserted: self.inserted,
            spent: self.sales.iter().map(|sale| sale.total).sum(),
            refunded: self.refunded,
            sales: self.sales.clone(),
        }
    }
}
