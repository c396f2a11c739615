//! Database connection management

use std::str::FromStr;

use jiff::Timestamp;
use sqlx::{
    Row, Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteRow},
};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// The transaction rolls back when dropped without an explicit commit, so an early `?`
    /// return abandons every write made through it.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Connect to `SQLite`, creating the database file when missing.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePool::connect_with(options).await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Encode a timestamp the way it is stored (microseconds since the Unix epoch).
pub(crate) fn encode_timestamp(timestamp: Timestamp) -> i64 {
    timestamp.as_microsecond()
}

pub(crate) fn try_get_timestamp(row: &SqliteRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    let micros: i64 = row.try_get(col)?;

    Timestamp::from_microsecond(micros).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn encode_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// A money total left the range an amount column can hold.
#[derive(Debug, Error)]
#[error("amount out of range")]
pub(crate) struct AmountOverflow;

impl From<AmountOverflow> for sqlx::Error {
    fn from(overflow: AmountOverflow) -> Self {
        Self::Decode(Box::new(overflow))
    }
}

/// `SQLite` turns an overflowing integer product into a REAL and aborts an overflowing `SUM`.
pub(crate) fn is_amount_overflow(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Decode(source) => source.is::<AmountOverflow>(),
        sqlx::Error::Database(database_error) => database_error.message() == "integer overflow",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn timestamps_round_trip_at_microsecond_precision() -> TestResult {
        let timestamp: Timestamp = "2026-03-01T09:30:00.123456Z".parse()?;

        let encoded = encode_timestamp(timestamp);

        assert_eq!(Timestamp::from_microsecond(encoded)?, timestamp);

        Ok(())
    }

    #[test]
    fn overflow_is_recognised_only_for_amounts() {
        assert!(is_amount_overflow(&sqlx::Error::from(AmountOverflow)));
        assert!(!is_amount_overflow(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn amounts_above_i64_are_rejected() {
        assert!(encode_amount(u64::MAX, "unit_price").is_err());
        assert!(matches!(encode_amount(1_999, "unit_price"), Ok(1_999)));
    }
}
