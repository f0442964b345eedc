//! In-memory implementation of [`CreditLedger`].
//!
//! Balances in a `HashMap` behind a `tokio::sync::RwLock`; the write lock
//! makes check-and-debit atomic. For tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ledger::{CreditLedger, LedgerError};

/// In-memory credit ledger for testing and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCreditLedger {
    balances: Arc<RwLock<HashMap<String, i64>>>,
}

impl InMemoryCreditLedger {
    /// Creates a new ledger with no accounts.
    pub fn new() -> Self {
        Self {
            balances: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError> {
        let balances = self.balances.read().await;
        Ok(balances.get(user_id).copied().unwrap_or(0))
    }

    async fn debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let mut balances = self.balances.write().await;
        let available = balances.get(user_id).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientCredits {
                needed: amount,
                available,
            });
        }
        let updated = available - amount;
        balances.insert(user_id.to_string(), updated);
        Ok(updated)
    }

    async fn credit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let mut balances = self.balances.write().await;
        let entry = balances.entry(user_id.to_string()).or_insert(0);
        *entry += amount;
        Ok(*entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_user_has_zero_balance() {
        let ledger = InMemoryCreditLedger::new();
        assert_eq!(ledger.balance("nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_credit_then_debit() {
        let ledger = InMemoryCreditLedger::new();
        assert_eq!(ledger.credit("u1", 10).await.unwrap(), 10);
        assert_eq!(ledger.debit("u1", 4).await.unwrap(), 6);
        assert_eq!(ledger.balance("u1").await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_debit_insufficient_leaves_balance_untouched() {
        let ledger = InMemoryCreditLedger::new();
        ledger.credit("u1", 3).await.unwrap();

        let err = ledger.debit("u1", 5).await.unwrap_err();
        match err {
            LedgerError::InsufficientCredits { needed, available } => {
                assert_eq!(needed, 5);
                assert_eq!(available, 3);
            }
            other => panic!("Expected InsufficientCredits, got {other:?}"),
        }
        assert_eq!(ledger.balance("u1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_negative_amounts_rejected() {
        let ledger = InMemoryCreditLedger::new();
        assert!(matches!(
            ledger.credit("u1", -1).await,
            Err(LedgerError::InvalidAmount(-1))
        ));
        assert!(matches!(
            ledger.debit("u1", -1).await,
            Err(LedgerError::InvalidAmount(-1))
        ));
    }
}
