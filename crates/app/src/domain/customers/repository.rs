//! Customers Repository

use sqlx::{FromRow, QueryBuilder, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    customers::{
        data::CustomerQuery,
        records::{CustomerId, CustomerRecord, Membership},
    },
    query::compile::push_query,
};

const SELECT_CUSTOMERS_SQL: &str = include_str!("sql/select_customers.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const DELETE_CUSTOMER_SQL: &str = include_str!("sql/delete_customer.sql");

/// Column values shared by inserts and updates.
pub(crate) struct CustomerColumns<'a> {
    pub(crate) first_name: &'a str,
    pub(crate) last_name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) phone: Option<&'a str>,
    pub(crate) membership: Membership,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCustomersRepository;

impl SqliteCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer_query: &CustomerQuery,
    ) -> Result<Vec<CustomerRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_CUSTOMERS_SQL);

        push_query(&mut builder, customer_query);

        builder
            .build_query_as::<CustomerRecord>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Sqlite, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        columns: CustomerColumns<'_>,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Sqlite, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(columns.first_name)
            .bind(columns.last_name)
            .bind(columns.email)
            .bind(columns.phone)
            .bind(columns.membership.code())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        columns: CustomerColumns<'_>,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Sqlite, CustomerRecord>(UPDATE_CUSTOMER_SQL)
            .bind(columns.first_name)
            .bind(columns.last_name)
            .bind(columns.email)
            .bind(columns.phone)
            .bind(columns.membership.code())
            .bind(customer.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CUSTOMER_SQL)
            .bind(customer.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CustomerRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let membership: String = row.try_get("membership")?;

        Ok(Self {
            id: CustomerId::from_i64(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            membership: membership
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "membership".to_string(),
                    source: Box::new(e),
                })?,
        })
    }
}
