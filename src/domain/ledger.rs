use thiserror::Error;
use tracing::debug;

use super::Cents;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: Cents, required: Cents },

    #[error("Balance overflow: cannot add {amount} to {balance}")]
    Overflow { balance: Cents, amount: Cents },
}

/// Funds inserted by the customer and not yet spent or refunded.
/// The balance can never go below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: Cents,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// Insert funds.
    pub fn credit(&mut self, amount: Cents) -> Result<(), LedgerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow {
                balance: self.balance,
                amount,
            })?;
        debug!(amount, balance = self.balance, "ledger credited");
        Ok(())
    }

    pub fn can_afford(&self, amount: Cents) -> bool {
        self.balance >= amount
    }

    /// Take `amount` out of the balance. Refuses instead of going negative.
    pub fn debit(&mut self, amount: Cents) -> Result<(), LedgerError> {
        if !self.can_afford(amount) {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        debug!(amount, balance = self.balance, "ledger debited");
        Ok(())
    }

    /// Hand back everything left and reset to zero.
    pub fn drain(&mut self) -> Cents {
        std::mem::take(&mut self.balance)
    }
}
