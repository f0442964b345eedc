//! Credit ledger interface and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when using ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: i64, available: i64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::Database(e.to_string())
    }
}

/// Trait for per-user credit accounting.
///
/// Debits are atomic per user: a debit either moves the full amount off a
/// sufficient balance or fails with [`LedgerError::InsufficientCredits`]
/// leaving the balance untouched. Unknown users have a balance of zero.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Returns the user's current balance (0 for unknown users).
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError>;

    /// Atomically removes `amount` credits; returns the new balance.
    async fn debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError>;

    /// Adds `amount` credits, creating the account if needed; returns the
    /// new balance.
    async fn credit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError>;
}
