//! Isolated test databases.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tempfile::TempDir;

use crate::database;

/// A freshly migrated `SQLite` database in its own temporary directory.
///
/// The directory, and the database with it, is removed when the `TestDb` is dropped.
pub struct TestDb {
    pool: SqlitePool,

    /// Database file location
    pub url: String,

    _dir: TempDir,
}

impl TestDb {
    /// Create an isolated, migrated test database.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");

        let url = format!("sqlite://{}", dir.path().join("storefront.db").display());

        let pool = database::connect(&url)
            .await
            .expect("Failed to create pool for database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self {
            pool,
            url,
            _dir: dir,
        }
    }

    /// Begin a transaction against the test database.
    ///
    /// The transaction rolls back automatically when dropped, which suits low-level repository
    /// tests that want to inspect intermediate state without committing.
    #[allow(dead_code)]
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Sqlite> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;

    use super::*;

    #[tokio::test]
    async fn migrations_create_the_schema() {
        let db = TestDb::new().await;

        let tables: Vec<String> = query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' AND name NOT LIKE '_sqlx_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .expect("Failed to list tables");

        for table in ["collections", "products", "orders", "order_items", "tagged_items"] {
            assert!(tables.iter().any(|name| name == table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        sqlx::query("INSERT INTO users (username) VALUES ('ada')")
            .execute(first.pool())
            .await
            .expect("Failed to insert user");

        let count: i64 = query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(count, 0, "second database should not see the first one's rows");
        assert_ne!(first.url, second.url);
    }

    #[tokio::test]
    async fn dropped_transactions_roll_back() {
        let db = TestDb::new().await;

        {
            let mut tx = db.begin_test_transaction().await;

            sqlx::query("INSERT INTO users (username) VALUES ('grace')")
                .execute(&mut *tx)
                .await
                .expect("Failed to insert user");
        }

        let count: i64 = query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(count, 0, "uncommitted insert should be rolled back");
    }
}
