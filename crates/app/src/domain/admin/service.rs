//! Admin service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        admin::{
            data::{
                AUTOCOMPLETE_LIMIT, CollectionChangeField, DEFAULT_PAGE_SIZE, PRODUCT_PAGE_SIZE,
                ProductChangeListParams,
            },
            errors::AdminServiceError,
            records::{
                ActionOutcome, AutocompleteOption, CollectionChangeRow, OrderChangeRow, Page,
                ProductChangeRow,
            },
            repository::SqliteAdminRepository,
        },
        collections::records::CollectionField,
        customers::{
            SqliteCustomersRepository,
            data::CustomerQuery,
            records::{CustomerField, CustomerRecord},
        },
        products::{
            SqliteProductsRepository,
            data::ProductQuery,
            records::{ProductField, ProductId},
        },
        query::{OrderBy, Predicate, Query},
    },
};

const COLLECTION_CHOICES_SQL: &str =
    "SELECT collections.id AS id, collections.title AS text FROM collections";
const PRODUCT_CHOICES_SQL: &str = "SELECT products.id AS id, products.title AS text FROM products";
const CUSTOMER_CHOICES_SQL: &str = "SELECT customers.id AS id, \
     customers.first_name || ' ' || customers.last_name AS text FROM customers";

#[derive(Debug, Clone)]
pub struct SqliteAdminService {
    db: Db,
    repository: SqliteAdminRepository,
    products: SqliteProductsRepository,
    customers: SqliteCustomersRepository,
}

impl SqliteAdminService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteAdminRepository::new(),
            products: SqliteProductsRepository::new(),
            customers: SqliteCustomersRepository::new(),
        }
    }
}

/// Offset of a 1-based page; page 0 is treated as the first page.
fn page_offset(page: u32, page_size: u32) -> (u32, u32) {
    let page = page.max(1);

    (page, (page - 1).saturating_mul(page_size))
}

fn product_filter(
    params: &ProductChangeListParams,
) -> Result<Option<Predicate<ProductField>>, AdminServiceError> {
    let mut clauses = Vec::new();

    if let Some(collection) = params.collection {
        clauses.push(Predicate::eq(
            ProductField::CollectionId,
            collection.into_i64(),
        ));
    }

    if let Some(last_update) = params.last_update {
        clauses.push(last_update.predicate(params.now)?);
    }

    if let Some(inventory) = params.inventory {
        clauses.push(inventory.predicate());
    }

    Ok(clauses.into_iter().reduce(|all, clause| all & clause))
}

/// Every search term must prefix the first or the last name.
fn customer_search(search: Option<&str>) -> Option<Predicate<CustomerField>> {
    search?
        .split_whitespace()
        .map(|term| {
            Predicate::istarts_with(CustomerField::FirstName, term)
                | Predicate::istarts_with(CustomerField::LastName, term)
        })
        .reduce(|all, term| all & term)
}

#[async_trait]
impl AdminService for SqliteAdminService {
    async fn product_changelist(
        &self,
        params: ProductChangeListParams,
    ) -> Result<Page<ProductChangeRow>, AdminServiceError> {
        let (page, offset) = page_offset(params.page, PRODUCT_PAGE_SIZE);

        let mut product_query = ProductQuery::new().limit(PRODUCT_PAGE_SIZE).offset(offset);

        product_query.filter = product_filter(&params)?;

        if params.ordering.is_empty() {
            product_query = product_query.asc(ProductField::Title);
        } else {
            product_query.order_by.extend(params.ordering);
        }

        let mut tx = self.db.begin_transaction().await?;

        let total_count = self
            .products
            .count_products(&mut tx, product_query.filter.as_ref())
            .await?;

        let items = self
            .repository
            .list_product_rows(&mut tx, &product_query)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            page,
            page_size: PRODUCT_PAGE_SIZE,
            total_count,
        })
    }

    async fn clear_inventory(
        &self,
        products: Vec<ProductId>,
    ) -> Result<ActionOutcome, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.products.clear_inventory(&mut tx, &products).await?;

        tx.commit().await?;

        info!(updated, "cleared product inventory");

        Ok(ActionOutcome::products_updated(updated))
    }

    async fn update_unit_price(
        &self,
        product: ProductId,
        unit_price: u64,
    ) -> Result<ProductChangeRow, AdminServiceError> {
        if i64::try_from(unit_price).is_err() {
            return Err(AdminServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .products
            .update_unit_price(&mut tx, product, unit_price, Timestamp::now())
            .await?;

        if updated == 0 {
            return Err(AdminServiceError::NotFound);
        }

        let row_query = ProductQuery::new()
            .filter(Predicate::eq(ProductField::Id, product.into_i64()))
            .limit(1);

        let row = self
            .repository
            .list_product_rows(&mut tx, &row_query)
            .await?
            .into_iter()
            .next()
            .ok_or(AdminServiceError::NotFound)?;

        tx.commit().await?;

        info!(product_id = product.into_i64(), unit_price, "updated unit price");

        Ok(row)
    }

    async fn collection_changelist(
        &self,
        ordering: Vec<OrderBy<CollectionChangeField>>,
    ) -> Result<Vec<CollectionChangeRow>, AdminServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows = self
            .repository
            .list_collection_rows(&mut tx, &ordering)
            .await?;

        tx.commit().await?;

        Ok(rows)
    }

    async fn customer_changelist(
        &self,
        search: Option<String>,
        page: u32,
    ) -> Result<Page<CustomerRecord>, AdminServiceError> {
        let (page, offset) = page_offset(page, DEFAULT_PAGE_SIZE);

        let mut customer_query = CustomerQuery::new()
            .asc(CustomerField::FirstName)
            .asc(CustomerField::LastName)
            .limit(DEFAULT_PAGE_SIZE)
            .offset(offset);

        customer_query.filter = customer_search(search.as_deref());

        let mut tx = self.db.begin_transaction().await?;

        let total_count = self
            .repository
            .count_customers(&mut tx, customer_query.filter.as_ref())
            .await?;

        let items = self
            .customers
            .list_customers(&mut tx, &customer_query)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            page,
            page_size: DEFAULT_PAGE_SIZE,
            total_count,
        })
    }

    async fn order_changelist(&self, page: u32) -> Result<Page<OrderChangeRow>, AdminServiceError> {
        let (page, offset) = page_offset(page, DEFAULT_PAGE_SIZE);

        let mut tx = self.db.begin_transaction().await?;

        let total_count = self.repository.count_orders(&mut tx).await?;

        let items = self
            .repository
            .list_order_rows(&mut tx, DEFAULT_PAGE_SIZE, offset)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            page,
            page_size: DEFAULT_PAGE_SIZE,
            total_count,
        })
    }

    async fn autocomplete_collections(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError> {
        let lookup = Query::new()
            .filter(Predicate::icontains(CollectionField::Title, term))
            .asc(CollectionField::Title)
            .limit(AUTOCOMPLETE_LIMIT);

        let mut tx = self.db.begin_transaction().await?;

        let options = self
            .repository
            .autocomplete(&mut tx, COLLECTION_CHOICES_SQL, &lookup)
            .await?;

        tx.commit().await?;

        Ok(options)
    }

    async fn autocomplete_products(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError> {
        let lookup = ProductQuery::new()
            .filter(Predicate::icontains(ProductField::Title, term))
            .asc(ProductField::Title)
            .limit(AUTOCOMPLETE_LIMIT);

        let mut tx = self.db.begin_transaction().await?;

        let options = self
            .repository
            .autocomplete(&mut tx, PRODUCT_CHOICES_SQL, &lookup)
            .await?;

        tx.commit().await?;

        Ok(options)
    }

    async fn autocomplete_customers(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError> {
        let lookup = CustomerQuery::new()
            .filter(
                Predicate::icontains(CustomerField::FirstName, term.as_str())
                    | Predicate::icontains(CustomerField::LastName, term),
            )
            .asc(CustomerField::FirstName)
            .asc(CustomerField::LastName)
            .limit(AUTOCOMPLETE_LIMIT);

        let mut tx = self.db.begin_transaction().await?;

        let options = self
            .repository
            .autocomplete(&mut tx, CUSTOMER_CHOICES_SQL, &lookup)
            .await?;

        tx.commit().await?;

        Ok(options)
    }
}

#[automock]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// A page of products with their derived stock status and collection columns.
    async fn product_changelist(
        &self,
        params: ProductChangeListParams,
    ) -> Result<Page<ProductChangeRow>, AdminServiceError>;

    /// Zeroes the inventory of the selected products.
    async fn clear_inventory(
        &self,
        products: Vec<ProductId>,
    ) -> Result<ActionOutcome, AdminServiceError>;

    /// Inline edit of a product's unit price from the change list. Refreshes its last update.
    async fn update_unit_price(
        &self,
        product: ProductId,
        unit_price: u64,
    ) -> Result<ProductChangeRow, AdminServiceError>;

    /// Every collection with its product count.
    async fn collection_changelist(
        &self,
        ordering: Vec<OrderBy<CollectionChangeField>>,
    ) -> Result<Vec<CollectionChangeRow>, AdminServiceError>;

    /// Customers ordered by first then last name, optionally narrowed by a name prefix search.
    async fn customer_changelist(
        &self,
        search: Option<String>,
        page: u32,
    ) -> Result<Page<CustomerRecord>, AdminServiceError>;

    /// Orders newest first with their customer's name.
    async fn order_changelist(&self, page: u32) -> Result<Page<OrderChangeRow>, AdminServiceError>;

    async fn autocomplete_collections(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError>;

    async fn autocomplete_products(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError>;

    async fn autocomplete_customers(
        &self,
        term: String,
    ) -> Result<Vec<AutocompleteOption>, AdminServiceError>;
}
