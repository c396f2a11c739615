//! Reports Repository

use serde_json::{Number, Value as JsonValue};
use sqlx::{
    Column, FromRow, QueryBuilder, Row, Sqlite, Transaction, TypeInfo, ValueRef, query,
    sqlite::SqliteRow,
};
use tracing::debug;

use crate::{
    database::AmountOverflow,
    domain::{
        products::records::ProductField,
        query::{Predicate, compile::push_where},
        reports::{
            data::{Aggregate, GroupBy},
            records::{AggregateValue, GroupSummary, ProductStats, RawRow},
        },
    },
};

const SUMMARIZE_COLLECTIONS_SQL: &str = include_str!("sql/summarize_collections.sql");
const SUMMARIZE_CUSTOMERS_SQL: &str = include_str!("sql/summarize_customers.sql");
const PRODUCT_STATS_SQL: &str = include_str!("sql/product_stats.sql");
const QUERY_ONLY_ON_SQL: &str = "PRAGMA query_only = ON";
const QUERY_ONLY_OFF_SQL: &str = "PRAGMA query_only = OFF";

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReportsRepository;

impl SqliteReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Metrics must already be checked against the grouping.
    #[tracing::instrument(
        name = "reports.repository.summarize",
        skip(self, tx),
        fields(group_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn summarize(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        group_by: GroupBy,
        aggregate: Aggregate,
    ) -> Result<Vec<GroupSummary>, sqlx::Error> {
        let (select, from) = match group_by {
            GroupBy::Collection => (
                "SELECT collections.id AS group_id, collections.title AS label, ",
                SUMMARIZE_COLLECTIONS_SQL,
            ),
            GroupBy::Customer => (
                "SELECT customers.id AS group_id, \
                 customers.first_name || ' ' || customers.last_name AS label, ",
                SUMMARIZE_CUSTOMERS_SQL,
            ),
        };

        let mut builder = QueryBuilder::<Sqlite>::new(select);

        push_aggregate(&mut builder, group_by, aggregate);

        builder.push(" AS value ");
        builder.push(from);

        let rows = builder.build().fetch_all(&mut **tx).await?;

        let summaries = rows
            .iter()
            .map(|row| {
                let value = match aggregate {
                    Aggregate::Avg(_) => row
                        .try_get::<Option<f64>, _>("value")?
                        .map(AggregateValue::Float),
                    _ => try_get_integer_aggregate(row)?.map(AggregateValue::Int),
                };

                Ok(GroupSummary {
                    group_id: row.try_get("group_id")?,
                    label: row.try_get("label")?,
                    value,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let group_count = summaries.len();

        tracing::Span::current().record("group_count", group_count);

        debug!(group_count, %aggregate, "summarized groups");

        Ok(summaries)
    }

    pub(crate) async fn product_stats(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        filter: Option<&Predicate<ProductField>>,
    ) -> Result<ProductStats, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(PRODUCT_STATS_SQL);

        push_where(&mut builder, filter);

        builder
            .build_query_as::<ProductStats>()
            .fetch_one(&mut **tx)
            .await
    }

    /// Run a caller-supplied statement and return every row as JSON values.
    ///
    /// The connection is read-only while the statement runs.
    #[tracing::instrument(
        name = "reports.repository.raw_query",
        skip(self, tx, sql),
        fields(row_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn raw_query(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sql: &str,
    ) -> Result<Vec<RawRow>, sqlx::Error> {
        query(QUERY_ONLY_ON_SQL).execute(&mut **tx).await?;

        let result = query(sql).fetch_all(&mut **tx).await;

        query(QUERY_ONLY_OFF_SQL).execute(&mut **tx).await?;

        let rows = result?;

        let raw_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|column| {
                        let value = decode_column(row, column.ordinal())?;

                        Ok((column.name().to_owned(), value))
                    })
                    .collect::<Result<RawRow, sqlx::Error>>()
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let row_count = raw_rows.len();

        tracing::Span::current().record("row_count", row_count);

        debug!(row_count, "ran raw query");

        Ok(raw_rows)
    }
}

fn push_aggregate(builder: &mut QueryBuilder<'_, Sqlite>, group_by: GroupBy, aggregate: Aggregate) {
    let (function, metric) = match aggregate {
        Aggregate::Count => {
            builder.push(match group_by {
                GroupBy::Collection => "COUNT(products.id)",
                GroupBy::Customer => "COUNT(DISTINCT orders.id)",
            });

            return;
        }
        Aggregate::Min(metric) => ("MIN(", metric),
        Aggregate::Max(metric) => ("MAX(", metric),
        Aggregate::Avg(metric) => ("AVG(", metric),
        Aggregate::Sum(metric) => ("SUM(", metric),
    };

    builder.push(function);
    builder.push(metric.expression());
    builder.push(")");
}

/// Integer aggregates come back as REAL once a product or sum leaves the `i64` range.
fn try_get_integer_aggregate(row: &SqliteRow) -> Result<Option<i64>, sqlx::Error> {
    if row.try_get_raw("value")?.type_info().name() == "REAL" {
        return Err(AmountOverflow.into());
    }

    row.try_get("value")
}

/// Decode by the storage class SQLite reports for the value.
fn decode_column(row: &SqliteRow, index: usize) -> Result<JsonValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;

    if raw.is_null() {
        return Ok(JsonValue::Null);
    }

    let storage_class = raw.type_info().name().to_owned();

    match storage_class.as_str() {
        "INTEGER" => Ok(JsonValue::from(row.try_get::<i64, _>(index)?)),
        "REAL" => Ok(float_value(row.try_get::<f64, _>(index)?)),
        "TEXT" => Ok(JsonValue::String(row.try_get::<String, _>(index)?)),
        "BLOB" => Ok(JsonValue::from(row.try_get::<Vec<u8>, _>(index)?)),
        _ => row
            .try_get::<i64, _>(index)
            .map(JsonValue::from)
            .or_else(|_| row.try_get::<f64, _>(index).map(float_value))
            .or_else(|_| row.try_get::<String, _>(index).map(JsonValue::String)),
    }
}

fn float_value(value: f64) -> JsonValue {
    Number::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}

impl<'r> FromRow<'r, SqliteRow> for ProductStats {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let count: i64 = row.try_get("count")?;
        let min_price: Option<i64> = row.try_get("min_price")?;
        let max_price: Option<i64> = row.try_get("max_price")?;
        let total_inventory: i64 = row.try_get("total_inventory")?;

        Ok(Self {
            count: u64::try_from(count).unwrap_or_default(),
            min_price: min_price.and_then(|price| u64::try_from(price).ok()),
            max_price: max_price.and_then(|price| u64::try_from(price).ok()),
            avg_price: row.try_get("avg_price")?,
            total_inventory: u64::try_from(total_inventory).unwrap_or_default(),
        })
    }
}
