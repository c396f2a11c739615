//! Reports service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::records::ProductField,
        query::Predicate,
        reports::{
            data::{Aggregate, GroupBy},
            errors::ReportsServiceError,
            records::{GroupSummary, ProductStats, RawRow},
            repository::SqliteReportsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqliteReportsService {
    db: Db,
    repository: SqliteReportsRepository,
}

impl SqliteReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteReportsRepository::new(),
        }
    }
}

/// `SELECT` or `WITH`, ignoring case and leading whitespace.
fn is_read_statement(sql: &str) -> bool {
    sql.split_whitespace()
        .next()
        .is_some_and(|keyword| {
            keyword.eq_ignore_ascii_case("select") || keyword.eq_ignore_ascii_case("with")
        })
}

/// At most one statement, allowing a trailing `;`. Semicolons inside quotes do not count.
fn is_single_statement(sql: &str) -> bool {
    let mut quote = None;

    let body = sql.trim_end().trim_end_matches(';');

    for ch in body.chars() {
        match (quote, ch) {
            (None, '\'' | '"' | '`') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            (None, ';') => return false,
            _ => {}
        }
    }

    true
}

#[async_trait]
impl ReportsService for SqliteReportsService {
    async fn summarize(
        &self,
        group_by: GroupBy,
        aggregate: Aggregate,
    ) -> Result<Vec<GroupSummary>, ReportsServiceError> {
        if aggregate
            .metric()
            .is_some_and(|metric| !metric.applies_to(group_by))
        {
            return Err(ReportsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let summaries = self
            .repository
            .summarize(&mut tx, group_by, aggregate)
            .await?;

        tx.commit().await?;

        Ok(summaries)
    }

    async fn product_stats(
        &self,
        filter: Option<Predicate<ProductField>>,
    ) -> Result<ProductStats, ReportsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = self
            .repository
            .product_stats(&mut tx, filter.as_ref())
            .await?;

        tx.commit().await?;

        Ok(stats)
    }

    async fn raw_query(&self, sql: String) -> Result<Vec<RawRow>, ReportsServiceError> {
        if !is_read_statement(&sql) || !is_single_statement(&sql) {
            return Err(ReportsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows = self.repository.raw_query(&mut tx, &sql).await?;

        tx.rollback().await?;

        Ok(rows)
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// One aggregate per group. Groups with no rows are still listed.
    async fn summarize(
        &self,
        group_by: GroupBy,
        aggregate: Aggregate,
    ) -> Result<Vec<GroupSummary>, ReportsServiceError>;

    /// Price and inventory statistics over the products matching `filter`.
    async fn product_stats(
        &self,
        filter: Option<Predicate<ProductField>>,
    ) -> Result<ProductStats, ReportsServiceError>;

    /// Runs a read statement verbatim. Anything it writes is rolled back.
    async fn raw_query(&self, sql: String) -> Result<Vec<RawRow>, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::reports::{data::Metric, records::AggregateValue},
        test::{
            TestContext,
            helpers::{create_collection, create_customer, create_product, place_order},
        },
    };

    use super::*;

    #[test]
    fn read_statements_are_recognised_by_leading_keyword() {
        assert!(is_read_statement("  select 1"));
        assert!(is_read_statement("WITH t AS (SELECT 1) SELECT * FROM t"));
        assert!(!is_read_statement("DELETE FROM products"));
        assert!(!is_read_statement(""));
    }

    #[test]
    fn only_single_statements_are_accepted() {
        assert!(is_single_statement("SELECT 1"));
        assert!(is_single_statement("SELECT 1;  "));
        assert!(is_single_statement("SELECT ';' AS semi, \"a;b\" FROM products"));
        assert!(!is_single_statement("SELECT 1; COMMIT; DELETE FROM products"));
        assert!(!is_single_statement("SELECT 1;;SELECT 2"));
    }

    #[tokio::test]
    async fn count_per_collection_includes_empty_collections() -> TestResult {
        let ctx = TestContext::new().await;
        let books = create_collection(&ctx, "Books").await?;
        let games = create_collection(&ctx, "Games").await?;

        create_product(&ctx, books.id, "SICP", 45_00, 3).await?;
        create_product(&ctx, books.id, "TAOCP", 180_00, 1).await?;

        let summaries = ctx
            .reports
            .summarize(GroupBy::Collection, Aggregate::Count)
            .await?;

        assert_eq!(
            summaries,
            vec![
                GroupSummary {
                    group_id: books.id.into_i64(),
                    label: "Books".to_string(),
                    value: Some(AggregateValue::Int(2)),
                },
                GroupSummary {
                    group_id: games.id.into_i64(),
                    label: "Games".to_string(),
                    value: Some(AggregateValue::Int(0)),
                },
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn metric_aggregates_are_null_for_empty_groups() -> TestResult {
        let ctx = TestContext::new().await;
        let books = create_collection(&ctx, "Books").await?;
        create_collection(&ctx, "Games").await?;

        create_product(&ctx, books.id, "SICP", 40_00, 3).await?;
        create_product(&ctx, books.id, "TAOCP", 60_00, 1).await?;

        let averages = ctx
            .reports
            .summarize(GroupBy::Collection, Aggregate::Avg(Metric::UnitPrice))
            .await?;

        let values: Vec<_> = averages.iter().map(|summary| summary.value).collect();

        assert_eq!(values, vec![Some(AggregateValue::Float(50_00.0)), None]);

        let maxima = ctx
            .reports
            .summarize(GroupBy::Collection, Aggregate::Max(Metric::Inventory))
            .await?;

        assert_eq!(maxima.first().and_then(|summary| summary.value), Some(AggregateValue::Int(3)));

        Ok(())
    }

    #[tokio::test]
    async fn orders_per_customer_counts_distinct_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;
        let sicp = create_product(&ctx, collection.id, "SICP", 45_00, 3).await?;
        let taocp = create_product(&ctx, collection.id, "TAOCP", 180_00, 1).await?;
        let alan = create_customer(&ctx, "Alan", "Turing", "alan@example.com").await?;
        let grace = create_customer(&ctx, "Grace", "Hopper", "grace@example.com").await?;

        place_order(&ctx, alan.id, &[(sicp.id, 2), (taocp.id, 1)]).await?;
        place_order(&ctx, alan.id, &[(sicp.id, 1)]).await?;

        let counts = ctx
            .reports
            .summarize(GroupBy::Customer, Aggregate::Count)
            .await?;

        assert_eq!(
            counts,
            vec![
                GroupSummary {
                    group_id: alan.id.into_i64(),
                    label: "Alan Turing".to_string(),
                    value: Some(AggregateValue::Int(2)),
                },
                GroupSummary {
                    group_id: grace.id.into_i64(),
                    label: "Grace Hopper".to_string(),
                    value: Some(AggregateValue::Int(0)),
                },
            ]
        );

        let spent = ctx
            .reports
            .summarize(GroupBy::Customer, Aggregate::Sum(Metric::LineTotal))
            .await?;

        assert_eq!(
            spent.first().and_then(|summary| summary.value),
            Some(AggregateValue::Int(3 * 45_00 + 180_00))
        );

        Ok(())
    }

    #[tokio::test]
    async fn line_totals_beyond_the_amount_range_are_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Jewels").await?;
        let crown = create_product(&ctx, collection.id, "Crown", i64::MAX.unsigned_abs(), 5).await?;
        let alan = create_customer(&ctx, "Alan", "Turing", "alan@example.com").await?;

        place_order(&ctx, alan.id, &[(crown.id, 2)]).await?;

        let result = ctx
            .reports
            .summarize(GroupBy::Customer, Aggregate::Sum(Metric::LineTotal))
            .await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn metric_from_another_grouping_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .reports
            .summarize(GroupBy::Customer, Aggregate::Sum(Metric::Inventory))
            .await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_stats_respect_the_filter() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;

        create_product(&ctx, collection.id, "Cheap", 10_00, 4).await?;
        create_product(&ctx, collection.id, "Middling", 20_00, 5).await?;
        create_product(&ctx, collection.id, "Dear", 90_00, 6).await?;

        let stats = ctx
            .reports
            .product_stats(Some(Predicate::lt(ProductField::UnitPrice, 50_00_i64)))
            .await?;

        assert_eq!(
            stats,
            ProductStats {
                count: 2,
                min_price: Some(10_00),
                max_price: Some(20_00),
                avg_price: Some(15_00.0),
                total_inventory: 9,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_stats_over_nothing_are_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let stats = ctx.reports.product_stats(None).await?;

        assert_eq!(
            stats,
            ProductStats {
                count: 0,
                min_price: None,
                max_price: None,
                avg_price: None,
                total_inventory: 0,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn raw_query_returns_named_columns_in_order() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;

        create_product(&ctx, collection.id, "SICP", 45_00, 3).await?;

        let rows = ctx
            .reports
            .raw_query("SELECT title, unit_price, slug FROM products".to_string())
            .await?;

        assert_eq!(
            rows,
            vec![vec![
                ("title".to_string(), json!("SICP")),
                ("unit_price".to_string(), json!(45_00)),
                ("slug".to_string(), json!(null)),
            ]]
        );

        Ok(())
    }

    #[tokio::test]
    async fn raw_query_rejects_writes() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;

        create_product(&ctx, collection.id, "SICP", 45_00, 3).await?;

        let result = ctx
            .reports
            .raw_query("DELETE FROM products".to_string())
            .await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let remaining: i64 = query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 1);

        Ok(())
    }

    #[tokio::test]
    async fn raw_query_rejects_trailing_statements() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;

        create_product(&ctx, collection.id, "SICP", 45_00, 3).await?;

        let result = ctx
            .reports
            .raw_query("SELECT 1; COMMIT; DELETE FROM products".to_string())
            .await;

        assert!(
            matches!(result, Err(ReportsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let remaining: i64 = query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 1);

        Ok(())
    }

    #[tokio::test]
    async fn raw_query_cannot_write_through_a_common_table_expression() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Books").await?;

        create_product(&ctx, collection.id, "SICP", 45_00, 3).await?;

        let result = ctx
            .reports
            .raw_query(
                "WITH doomed AS (SELECT id FROM products) \
                 DELETE FROM products WHERE id IN (SELECT id FROM doomed)"
                    .to_string(),
            )
            .await;

        assert!(result.is_err(), "expected the write to be refused, got {result:?}");

        create_product(&ctx, collection.id, "TAOCP", 180_00, 1).await?;

        let remaining: i64 = query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 2);

        Ok(())
    }
}
