//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, NewPromotion, ProductQuery, ProductUpdate},
            errors::ProductsServiceError,
            records::{
                DiscountedProduct, ProductId, ProductRecord, ProductWithCollection, PromotionId,
                PromotionRecord,
            },
            repository::{ProductColumns, SqliteProductsRepository},
        },
        tags::{EntityRef, SqliteTagsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
    tags: SqliteTagsRepository,
}

impl SqliteProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
            tags: SqliteTagsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, &query).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn first_product(&self, query: ProductQuery) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .repository
            .list_products(&mut tx, &query.limit(1))
            .await?
            .into_iter()
            .next()
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products_with_collection(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductWithCollection>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_products_with_collection(&mut tx, &query)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_discounted_products(
        &self,
        query: ProductQuery,
        discount: f64,
    ) -> Result<Vec<DiscountedProduct>, ProductsServiceError> {
        if !(0.0..=1.0).contains(&discount) {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_discounted_products(&mut tx, &query, discount)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_ordered_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_ordered_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.title.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                ProductColumns {
                    title: &product.title,
                    slug: product.slug.as_deref(),
                    description: product.description.as_deref(),
                    unit_price: product.unit_price,
                    inventory: product.inventory,
                    last_update: Timestamp::now(),
                    collection: product.collection,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.title.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                ProductColumns {
                    title: &update.title,
                    slug: update.slug.as_deref(),
                    description: update.description.as_deref(),
                    unit_price: update.unit_price,
                    inventory: update.inventory,
                    last_update: Timestamp::now(),
                    collection: update.collection,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        self.tags
            .delete_entity_references(&mut tx, &[EntityRef::Product(product)])
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear_inventory(&self, products: Vec<ProductId>) -> Result<u64, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.clear_inventory(&mut tx, &products).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, ProductsServiceError> {
        if !(0.0..=1.0).contains(&promotion.discount) {
            return Err(ProductsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_promotion(&mut tx, &promotion.description, promotion.discount)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_promotion(
        &self,
        product: ProductId,
        promotion: PromotionId,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .add_promotion(&mut tx, product, promotion)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn promotions_for(
        &self,
        products: Vec<ProductId>,
    ) -> Result<FxHashMap<ProductId, Vec<PromotionRecord>>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let promotions = self.repository.promotions_for(&mut tx, &products).await?;

        tx.commit().await?;

        Ok(promotions)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the products matching a query.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves the first product of a query.
    ///
    /// Ordering ascending or descending on a timestamp gives the earliest or latest product.
    async fn first_product(&self, query: ProductQuery) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieves the products matching a query together with their collection titles.
    async fn list_products_with_collection(
        &self,
        query: ProductQuery,
    ) -> Result<Vec<ProductWithCollection>, ProductsServiceError>;

    /// Products matching a query, each with its price after `discount` (a fraction between 0
    /// and 1) is taken off.
    async fn list_discounted_products(
        &self,
        query: ProductQuery,
        discount: f64,
    ) -> Result<Vec<DiscountedProduct>, ProductsServiceError>;

    /// Products that appear in at least one order, sorted by title.
    async fn list_ordered_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces every mutable field of a product.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product along with its tags and likes.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;

    /// Sets the inventory of exactly the given products to zero, returning the number updated.
    async fn clear_inventory(&self, products: Vec<ProductId>) -> Result<u64, ProductsServiceError>;

    /// Creates a new promotion.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, ProductsServiceError>;

    /// Attaches a promotion to a product. Attaching twice is a no-op.
    async fn add_promotion(
        &self,
        product: ProductId,
        promotion: PromotionId,
    ) -> Result<(), ProductsServiceError>;

    /// Loads the promotions of several products at once.
    async fn promotions_for(
        &self,
        products: Vec<ProductId>,
    ) -> Result<FxHashMap<ProductId, Vec<PromotionRecord>>, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            collections::records::CollectionId,
            products::records::ProductField,
            query::Predicate,
        },
        test::{
            TestContext,
            helpers::{
                create_collection, create_customer, create_product, place_order, set_last_update,
            },
        },
    };

    use super::*;

    fn titles(products: &[ProductRecord]) -> Vec<&str> {
        products.iter().map(|product| product.title.as_str()).collect()
    }

    #[tokio::test]
    async fn create_product_returns_all_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Beverages").await?;

        let product = ctx
            .products
            .create_product(NewProduct {
                title: "Coffee".to_string(),
                slug: Some("coffee".to_string()),
                description: None,
                unit_price: 12_50,
                inventory: 40,
                collection: collection.id,
            })
            .await?;

        assert_eq!(product.title, "Coffee");
        assert_eq!(product.slug.as_deref(), Some("coffee"));
        assert_eq!(product.unit_price, 12_50);
        assert_eq!(product.inventory, 40);
        assert_eq!(product.collection, collection.id);

        let fetched = ctx.products.get_product(product.id).await?;

        assert_eq!(fetched, product);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_in_unknown_collection_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                title: "Orphan".to_string(),
                slug: None,
                description: None,
                unit_price: 1_00,
                inventory: 1,
                collection: CollectionId::from_i64(404),
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_requires_title() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Beverages").await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                title: "   ".to_string(),
                slug: None,
                description: None,
                unit_price: 1_00,
                inventory: 1,
                collection: collection.id,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::from_i64(1)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_replaces_fields_and_refreshes_last_update() -> TestResult {
        let ctx = TestContext::new().await;
        let beverages = create_collection(&ctx, "Beverages").await?;
        let pantry = create_collection(&ctx, "Pantry").await?;
        let product = create_product(&ctx, beverages.id, "Tea", 4_00, 12).await?;

        let updated = ctx
            .products
            .update_product(
                product.id,
                ProductUpdate {
                    title: "Green tea".to_string(),
                    slug: Some("green-tea".to_string()),
                    description: Some("Loose leaf".to_string()),
                    unit_price: 5_25,
                    inventory: 3,
                    collection: pantry.id,
                },
            )
            .await?;

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.title, "Green tea");
        assert_eq!(updated.description.as_deref(), Some("Loose leaf"));
        assert_eq!(updated.unit_price, 5_25);
        assert_eq!(updated.inventory, 3);
        assert_eq!(updated.collection, pantry.id);
        assert!(updated.last_update >= product.last_update);

        Ok(())
    }

    #[tokio::test]
    async fn price_range_returns_exactly_the_products_within_bounds() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Stationery").await?;

        for (title, price) in [("A", 5_u64), ("B", 10), ("C", 15), ("D", 20), ("E", 25)] {
            create_product(&ctx, collection.id, title, price, 1).await?;
        }

        let between = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::between(ProductField::UnitPrice, 10_i64, 20_i64))
                    .asc(ProductField::UnitPrice),
            )
            .await?;

        assert_eq!(titles(&between), ["B", "C", "D"]);

        let bounded = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::gte(ProductField::UnitPrice, 10_i64))
                    .filter(Predicate::lte(ProductField::UnitPrice, 20_i64)),
            )
            .await?;

        assert_eq!(titles(&bounded), titles(&between));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_combines_or_not_and_field_comparisons() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Toys").await?;

        create_product(&ctx, collection.id, "Kite", 30, 30).await?;
        create_product(&ctx, collection.id, "Yo-yo", 5, 2).await?;
        create_product(&ctx, collection.id, "Puzzle", 40, 50).await?;

        let low_stock_or_cheap = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(
                        Predicate::lt(ProductField::Inventory, 10_i64)
                            | !Predicate::gte(ProductField::UnitPrice, 20_i64),
                    )
                    .asc(ProductField::Title),
            )
            .await?;

        assert_eq!(titles(&low_stock_or_cheap), ["Yo-yo"]);

        let inventory_equals_price = ctx
            .products
            .list_products(ProductQuery::new().filter(Predicate::compare_fields(
                ProductField::Inventory,
                crate::domain::query::CompareOp::Eq,
                ProductField::UnitPrice,
            )))
            .await?;

        assert_eq!(titles(&inventory_equals_price), ["Kite"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_supports_text_matching_and_windows() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Pantry").await?;

        for title in ["Coffee beans", "Decaf coffee", "Tea", "Cocoa"] {
            create_product(&ctx, collection.id, title, 1_00, 1).await?;
        }

        let coffees = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::icontains(ProductField::Title, "COFFEE"))
                    .asc(ProductField::Title),
            )
            .await?;

        assert_eq!(titles(&coffees), ["Coffee beans", "Decaf coffee"]);

        let starting_with_co = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::starts_with(ProductField::Title, "Co"))
                    .asc(ProductField::Title),
            )
            .await?;

        assert_eq!(titles(&starting_with_co), ["Cocoa", "Coffee beans"]);

        let second_page = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .asc(ProductField::Title)
                    .limit(2)
                    .offset(2),
            )
            .await?;

        assert_eq!(titles(&second_page), ["Decaf coffee", "Tea"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_matches_missing_descriptions() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Pantry").await?;

        ctx.products
            .create_product(NewProduct {
                title: "Coffee beans".to_string(),
                slug: None,
                description: Some("Whole roasted beans".to_string()),
                unit_price: 12_00,
                inventory: 4,
                collection: collection.id,
            })
            .await?;

        create_product(&ctx, collection.id, "Tea", 4_00, 9).await?;
        create_product(&ctx, collection.id, "Cocoa", 6_00, 2).await?;

        let undescribed = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::is_null(ProductField::Description))
                    .asc(ProductField::Title),
            )
            .await?;

        assert_eq!(titles(&undescribed), ["Cocoa", "Tea"]);

        let described = ctx
            .products
            .list_products(
                ProductQuery::new().filter(!Predicate::is_null(ProductField::Description)),
            )
            .await?;

        assert_eq!(titles(&described), ["Coffee beans"]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_collection_membership() -> TestResult {
        let ctx = TestContext::new().await;
        let pantry = create_collection(&ctx, "Pantry").await?;
        let garden = create_collection(&ctx, "Garden").await?;
        let toys = create_collection(&ctx, "Toys").await?;

        create_product(&ctx, pantry.id, "Tea", 4_00, 9).await?;
        create_product(&ctx, garden.id, "Rake", 9_00, 1).await?;
        create_product(&ctx, toys.id, "Kite", 15_00, 2).await?;

        let selected = ctx
            .products
            .list_products(
                ProductQuery::new()
                    .filter(Predicate::in_(
                        ProductField::CollectionId,
                        [pantry.id.into_i64(), garden.id.into_i64()],
                    ))
                    .asc(ProductField::Title),
            )
            .await?;

        assert_eq!(titles(&selected), ["Rake", "Tea"]);

        let none = ctx
            .products
            .list_products(
                ProductQuery::new().filter(Predicate::in_(
                    ProductField::CollectionId,
                    Vec::<i64>::new(),
                )),
            )
            .await?;

        assert!(none.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn case_sensitive_contains_respects_case() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Pantry").await?;

        create_product(&ctx, collection.id, "Coffee beans", 12_00, 4).await?;
        create_product(&ctx, collection.id, "Decaf coffee", 11_00, 3).await?;

        let lower = ctx
            .products
            .list_products(
                ProductQuery::new().filter(Predicate::contains(ProductField::Title, "coffee")),
            )
            .await?;

        assert_eq!(titles(&lower), ["Decaf coffee"]);

        let capitalised = ctx
            .products
            .list_products(
                ProductQuery::new().filter(Predicate::contains(ProductField::Title, "Coffee")),
            )
            .await?;

        assert_eq!(titles(&capitalised), ["Coffee beans"]);

        Ok(())
    }

    #[tokio::test]
    async fn in_year_keeps_only_products_updated_that_year() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Garden").await?;

        let rake = create_product(&ctx, collection.id, "Rake", 9_00, 1).await?;
        let hoe = create_product(&ctx, collection.id, "Hoe", 7_00, 2).await?;
        let spade = create_product(&ctx, collection.id, "Spade", 11_00, 3).await?;

        set_last_update(&ctx, rake.id, "2021-06-01T12:00:00Z").await?;
        set_last_update(&ctx, hoe.id, "2020-12-31T23:59:59Z").await?;
        set_last_update(&ctx, spade.id, "2022-01-01T00:00:00Z").await?;

        let updated_in_2021 = ctx
            .products
            .list_products(
                ProductQuery::new().filter(Predicate::in_year(ProductField::LastUpdate, 2021)?),
            )
            .await?;

        assert_eq!(titles(&updated_in_2021), ["Rake"]);

        Ok(())
    }

    #[tokio::test]
    async fn discounted_prices_are_rounded_to_minor_units() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Pantry").await?;

        create_product(&ctx, collection.id, "Coffee beans", 10_00, 4).await?;
        create_product(&ctx, collection.id, "Tea", 2_49, 9).await?;

        let discounted = ctx
            .products
            .list_discounted_products(ProductQuery::new().asc(ProductField::Title), 0.2)
            .await?;

        let prices: Vec<_> = discounted
            .iter()
            .map(|row| (row.product.title.as_str(), row.product.unit_price, row.discounted_price))
            .collect();

        assert_eq!(prices, [("Coffee beans", 10_00, 8_00), ("Tea", 2_49, 1_99)]);

        let undiscounted = ctx
            .products
            .list_discounted_products(
                ProductQuery::new().filter(Predicate::eq(ProductField::Title, "Tea")),
                0.0,
            )
            .await?;

        assert_eq!(
            undiscounted.first().map(|row| row.discounted_price),
            Some(2_49)
        );

        Ok(())
    }

    #[tokio::test]
    async fn discount_outside_zero_to_one_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .list_discounted_products(ProductQuery::new(), 1.5)
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn first_product_gives_earliest_and_latest() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Garden").await?;

        create_product(&ctx, collection.id, "Rake", 9_00, 1).await?;
        create_product(&ctx, collection.id, "Hose", 19_00, 1).await?;
        create_product(&ctx, collection.id, "Shovel", 14_00, 1).await?;

        let cheapest = ctx
            .products
            .first_product(ProductQuery::new().asc(ProductField::UnitPrice))
            .await?;

        let dearest = ctx
            .products
            .first_product(ProductQuery::new().asc(ProductField::UnitPrice).reversed())
            .await?;

        assert_eq!(cheapest.title, "Rake");
        assert_eq!(dearest.title, "Hose");

        Ok(())
    }

    #[tokio::test]
    async fn first_product_of_empty_result_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.first_product(ProductQuery::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn products_with_collection_carry_collection_title() -> TestResult {
        let ctx = TestContext::new().await;
        let audio = create_collection(&ctx, "Audio").await?;

        create_product(&ctx, audio.id, "Headphones", 99_00, 4).await?;

        let products = ctx
            .products
            .list_products_with_collection(ProductQuery::new())
            .await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product.title, "Headphones");
        assert_eq!(products[0].collection_title, "Audio");

        Ok(())
    }

    #[tokio::test]
    async fn ordered_products_are_distinct_and_sorted() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Snacks").await?;
        let pretzels = create_product(&ctx, collection.id, "Pretzels", 2_00, 10).await?;
        let almonds = create_product(&ctx, collection.id, "Almonds", 6_00, 10).await?;

        create_product(&ctx, collection.id, "Never ordered", 1_00, 10).await?;

        let customer = create_customer(&ctx, "Ada", "Lovelace", "ada@example.com").await?;

        place_order(&ctx, customer.id, &[(pretzels.id, 1), (almonds.id, 2)]).await?;
        place_order(&ctx, customer.id, &[(pretzels.id, 3)]).await?;

        let ordered = ctx.products.list_ordered_products().await?;

        assert_eq!(titles(&ordered), ["Almonds", "Pretzels"]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductId::from_i64(77)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn ordered_product_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Snacks").await?;
        let product = create_product(&ctx, collection.id, "Pretzels", 2_00, 10).await?;
        let customer = create_customer(&ctx, "Ada", "Lovelace", "ada@example.com").await?;

        place_order(&ctx, customer.id, &[(product.id, 1)]).await?;

        let result = ctx.products.delete_product(product.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        ctx.products.get_product(product.id).await?;

        Ok(())
    }

    #[tokio::test]
    async fn clear_inventory_touches_exactly_the_selected_products() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Hardware").await?;
        let hammer = create_product(&ctx, collection.id, "Hammer", 15_00, 8).await?;
        let nails = create_product(&ctx, collection.id, "Nails", 3_00, 500).await?;
        let saw = create_product(&ctx, collection.id, "Saw", 25_00, 4).await?;

        let updated = ctx
            .products
            .clear_inventory(vec![hammer.id, saw.id, ProductId::from_i64(9_999)])
            .await?;

        assert_eq!(updated, 2);
        assert_eq!(ctx.products.get_product(hammer.id).await?.inventory, 0);
        assert_eq!(ctx.products.get_product(saw.id).await?.inventory, 0);
        assert_eq!(ctx.products.get_product(nails.id).await?.inventory, 500);

        Ok(())
    }

    #[tokio::test]
    async fn clear_inventory_with_no_selection_updates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Hardware").await?;
        let hammer = create_product(&ctx, collection.id, "Hammer", 15_00, 8).await?;

        let updated = ctx.products.clear_inventory(Vec::new()).await?;

        assert_eq!(updated, 0);
        assert_eq!(ctx.products.get_product(hammer.id).await?.inventory, 8);

        Ok(())
    }

    #[tokio::test]
    async fn promotions_are_attached_once_and_loaded_per_product() -> TestResult {
        let ctx = TestContext::new().await;
        let collection = create_collection(&ctx, "Kitchen").await?;
        let kettle = create_product(&ctx, collection.id, "Kettle", 30_00, 5).await?;
        let toaster = create_product(&ctx, collection.id, "Toaster", 25_00, 5).await?;

        let spring = ctx
            .products
            .create_promotion(NewPromotion {
                description: "Spring sale".to_string(),
                discount: 0.2,
            })
            .await?;

        ctx.products.add_promotion(kettle.id, spring.id).await?;
        ctx.products.add_promotion(kettle.id, spring.id).await?;

        let promotions = ctx
            .products
            .promotions_for(vec![kettle.id, toaster.id])
            .await?;

        assert_eq!(promotions.get(&kettle.id).map(Vec::len), Some(1));
        assert_eq!(promotions.get(&toaster.id).map(Vec::len), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn promotion_discount_must_be_a_fraction() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_promotion(NewPromotion {
                description: "Too generous".to_string(),
                discount: 1.5,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }
}
