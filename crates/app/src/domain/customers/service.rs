//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        customers::{
            data::{CustomerQuery, CustomerUpdate, NewCustomer},
            errors::CustomersServiceError,
            records::{CustomerId, CustomerRecord},
            repository::{CustomerColumns, SqliteCustomersRepository},
        },
        tags::{EntityRef, SqliteTagsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCustomersService {
    db: Db,
    repository: SqliteCustomersRepository,
    tags: SqliteTagsRepository,
}

impl SqliteCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCustomersRepository::new(),
            tags: SqliteTagsRepository::new(),
        }
    }
}

fn validate(
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), CustomersServiceError> {
    if [first_name, last_name, email]
        .iter()
        .any(|value| value.trim().is_empty())
    {
        return Err(CustomersServiceError::MissingRequiredData);
    }

    if !email.contains('@') {
        return Err(CustomersServiceError::InvalidData);
    }

    Ok(())
}

#[async_trait]
impl CustomersService for SqliteCustomersService {
    async fn list_customers(
        &self,
        query: CustomerQuery,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customers = self.repository.list_customers(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(customers)
    }

    async fn get_customer(
        &self,
        customer: CustomerId,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        validate(&customer.first_name, &customer.last_name, &customer.email)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_customer(
                &mut tx,
                CustomerColumns {
                    first_name: &customer.first_name,
                    last_name: &customer.last_name,
                    email: &customer.email,
                    phone: customer.phone.as_deref(),
                    membership: customer.membership,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_customer(
        &self,
        customer: CustomerId,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        validate(&update.first_name, &update.last_name, &update.email)?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_customer(
                &mut tx,
                customer,
                CustomerColumns {
                    first_name: &update.first_name,
                    last_name: &update.last_name,
                    email: &update.email,
                    phone: update.phone.as_deref(),
                    membership: update.membership,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_customer(&self, customer: CustomerId) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_customer(&mut tx, customer).await?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        self.tags
            .delete_entity_references(&mut tx, &[EntityRef::Customer(customer)])
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieves the customers matching a query.
    async fn list_customers(
        &self,
        query: CustomerQuery,
    ) -> Result<Vec<CustomerRecord>, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerId,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Creates a customer. Emails are unique.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Replaces every mutable field of a customer.
    async fn update_customer(
        &self,
        customer: CustomerId,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Deletes a customer that has never placed an order.
    async fn delete_customer(&self, customer: CustomerId) -> Result<(), CustomersServiceError>;
}
