//! Collections service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        collections::{
            data::{CollectionUpdate, NewCollection},
            errors::CollectionsServiceError,
            records::{CollectionId, CollectionRecord},
            repository::SqliteCollectionsRepository,
        },
        tags::{EntityRef, SqliteTagsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCollectionsService {
    db: Db,
    repository: SqliteCollectionsRepository,
    tags: SqliteTagsRepository,
}

impl SqliteCollectionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCollectionsRepository::new(),
            tags: SqliteTagsRepository::new(),
        }
    }
}

#[async_trait]
impl CollectionsService for SqliteCollectionsService {
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>, CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let collections = self.repository.list_collections(&mut tx).await?;

        tx.commit().await?;

        Ok(collections)
    }

    async fn get_collection(
        &self,
        collection: CollectionId,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let collection = self.repository.get_collection(&mut tx, collection).await?;

        tx.commit().await?;

        Ok(collection)
    }

    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        if collection.title.trim().is_empty() {
            return Err(CollectionsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_collection(&mut tx, &collection.title, collection.featured_product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_collection(
        &self,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<CollectionRecord, CollectionsServiceError> {
        if update.title.trim().is_empty() {
            return Err(CollectionsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_collection(&mut tx, collection, &update.title, update.featured_product)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_collection(
        &self,
        collection: CollectionId,
    ) -> Result<(), CollectionsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_collection(&mut tx, collection)
            .await?;

        if rows_affected == 0 {
            return Err(CollectionsServiceError::NotFound);
        }

        self.tags
            .delete_entity_references(&mut tx, &[EntityRef::Collection(collection)])
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CollectionsService: Send + Sync {
    /// Retrieves all collections ordered by title.
    async fn list_collections(&self) -> Result<Vec<CollectionRecord>, CollectionsServiceError>;

    /// Retrieve a single collection.
    async fn get_collection(
        &self,
        collection: CollectionId,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Creates a new collection, optionally featuring a product.
    async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Replaces the title and featured product of a collection.
    async fn update_collection(
        &self,
        collection: CollectionId,
        update: CollectionUpdate,
    ) -> Result<CollectionRecord, CollectionsServiceError>;

    /// Deletes a collection. Collections that still hold products cannot be deleted.
    async fn delete_collection(
        &self,
        collection: CollectionId,
    ) -> Result<(), CollectionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, records::ProductId},
        test::{
            TestContext,
            helpers::{create_collection, create_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_collection_without_featured_product() -> TestResult {
        let ctx = TestContext::new().await;

        let collection = ctx
            .collections
            .create_collection(NewCollection {
                title: "video games".to_string(),
                featured_product: None,
            })
            .await?;

        assert_eq!(collection.title, "video games");
        assert!(collection.featured_product.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn featured_product_need_not_belong_to_collection() -> TestResult {
        let ctx = TestContext::new().await;

        let beverages = create_collection(&ctx, "Beverages").await?;
        let coffee = create_product(&ctx, beverages.id, "Coffee", 12_00, 40).await?;

        let games = ctx
            .collections
            .create_collection(NewCollection {
                title: "Games".to_string(),
                featured_product: Some(coffee.id),
            })
            .await?;

        assert_eq!(games.featured_product, Some(coffee.id));

        Ok(())
    }

    #[tokio::test]
    async fn create_collection_with_unknown_featured_product_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .collections
            .create_collection(NewCollection {
                title: "Games".to_string(),
                featured_product: Some(ProductId::from_i64(999)),
            })
            .await;

        assert!(
            matches!(result, Err(CollectionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_collection_clears_featured_product() -> TestResult {
        let ctx = TestContext::new().await;

        let collection = create_collection(&ctx, "Games").await?;
        let product = create_product(&ctx, collection.id, "Chess", 20_00, 5).await?;

        ctx.collections
            .update_collection(
                collection.id,
                CollectionUpdate {
                    title: "Games".to_string(),
                    featured_product: Some(product.id),
                },
            )
            .await?;

        let updated = ctx
            .collections
            .update_collection(
                collection.id,
                CollectionUpdate {
                    title: "Board games".to_string(),
                    featured_product: None,
                },
            )
            .await?;

        assert_eq!(updated.title, "Board games");
        assert!(updated.featured_product.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_collection_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .collections
            .update_collection(
                CollectionId::from_i64(404),
                CollectionUpdate {
                    title: "Nothing".to_string(),
                    featured_product: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CollectionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleting_featured_product_keeps_collection() -> TestResult {
        let ctx = TestContext::new().await;

        let home = create_collection(&ctx, "Home").await?;
        let games = create_collection(&ctx, "Games").await?;
        let lamp = create_product(&ctx, home.id, "Lamp", 35_00, 3).await?;

        ctx.collections
            .update_collection(
                games.id,
                CollectionUpdate {
                    title: "Games".to_string(),
                    featured_product: Some(lamp.id),
                },
            )
            .await?;

        ctx.products.delete_product(lamp.id).await?;

        let games = ctx.collections.get_collection(games.id).await?;

        assert!(
            games.featured_product.is_none(),
            "featured product reference should be nullified"
        );

        Ok(())
    }

    #[tokio::test]
    async fn collection_with_products_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;

        let collection = create_collection(&ctx, "Snacks").await?;

        create_product(&ctx, collection.id, "Crisps", 1_50, 100).await?;

        let result = ctx.collections.delete_collection(collection.id).await;

        assert!(
            matches!(result, Err(CollectionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        ctx.collections.get_collection(collection.id).await?;

        Ok(())
    }

    #[tokio::test]
    async fn list_collections_is_sorted_by_title() -> TestResult {
        let ctx = TestContext::new().await;

        create_collection(&ctx, "Toys").await?;
        create_collection(&ctx, "Audio").await?;
        create_collection(&ctx, "Garden").await?;

        let titles: Vec<String> = ctx
            .collections
            .list_collections()
            .await?
            .into_iter()
            .map(|collection| collection.title)
            .collect();

        assert_eq!(titles, ["Audio", "Garden", "Toys"]);

        Ok(())
    }
}
