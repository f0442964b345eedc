//! SQLite implementation of [`CreditLedger`].
//!
//! Atomicity comes from conditional single-statement updates: debits run
//! `UPDATE ... WHERE balance >= ?` and treat zero affected rows as
//! insufficient funds, so concurrent debits can never drive a balance
//! negative.

use async_trait::async_trait;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::ledger::{CreditLedger, LedgerError};

/// Persistent credit ledger backed by SQLite.
#[derive(Clone)]
pub struct SqliteCreditLedger {
    pool: SqlitePool,
}

impl SqliteCreditLedger {
    /// Opens (creating if missing) the database and bootstraps the schema.
    pub async fn new(database_path: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_path);
        let pool = SqlitePool::connect_with(options).await?;
        let ledger = Self { pool };
        ledger.init().await?;
        Ok(ledger)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating credits table if not exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credits (
                user_id TEXT PRIMARY KEY,
                balance INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CreditLedger for SqliteCreditLedger {
    async fn balance(&self, user_id: &str) -> Result<i64, LedgerError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT balance FROM credits WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.0).unwrap_or(0))
    }

    async fn debit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let result = sqlx::query(
            "UPDATE credits SET balance = balance - ? WHERE user_id = ? AND balance >= ?",
        )
        .bind(amount)
        .bind(user_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let available = self.balance(user_id).await?;
            return Err(LedgerError::InsufficientCredits {
                needed: amount,
                available,
            });
        }

        let updated = self.balance(user_id).await?;
        info!(user_id, amount, balance = updated, "Debited credits");
        Ok(updated)
    }

    async fn credit(&self, user_id: &str, amount: i64) -> Result<i64, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        sqlx::query(
            r#"
            INSERT INTO credits (user_id, balance) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET balance = balance + excluded.balance
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        let updated = self.balance(user_id).await?;
        info!(user_id, amount, balance = updated, "Credited credits");
        Ok(updated)
    }
}
