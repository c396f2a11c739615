//! Test Helpers

use jiff::Timestamp;
use sqlx::query;
use testresult::TestResult;

use crate::{
    database::encode_timestamp,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCart,
            records::{CartRecord, CartUuid},
        },
        collections::{
            CollectionsService, CollectionsServiceError,
            data::NewCollection,
            records::{CollectionId, CollectionRecord},
        },
        customers::{
            CustomersService, CustomersServiceError,
            data::NewCustomer,
            records::{CustomerId, CustomerRecord, Membership},
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::{NewOrder, NewOrderItem},
            records::OrderWithItems,
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductId, ProductRecord},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_collection(
    ctx: &TestContext,
    title: &str,
) -> Result<CollectionRecord, CollectionsServiceError> {
    ctx.collections
        .create_collection(NewCollection {
            title: title.to_string(),
            featured_product: None,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    collection: CollectionId,
    title: &str,
    unit_price: u64,
    inventory: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            title: title.to_string(),
            slug: None,
            description: None,
            unit_price,
            inventory,
            collection,
        })
        .await
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<CustomerRecord, CustomersServiceError> {
    ctx.customers
        .create_customer(NewCustomer {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: None,
            membership: Membership::default(),
        })
        .await
}

pub(crate) async fn place_order(
    ctx: &TestContext,
    customer: CustomerId,
    items: &[(ProductId, u32)],
) -> Result<OrderWithItems, OrdersServiceError> {
    ctx.orders
        .place_order(NewOrder {
            customer,
            items: items
                .iter()
                .map(|&(product, quantity)| NewOrderItem { product, quantity })
                .collect(),
        })
        .await
}

pub(crate) async fn create_cart(ctx: &TestContext) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .create_cart(NewCart {
            uuid: CartUuid::new(),
        })
        .await
}

/// Backdate a product without going through the service, which always stamps `now`.
pub(crate) async fn set_last_update(
    ctx: &TestContext,
    product: ProductId,
    last_update: &str,
) -> TestResult {
    let last_update: Timestamp = last_update.parse()?;

    query("UPDATE products SET last_update = ? WHERE id = ?")
        .bind(encode_timestamp(last_update))
        .bind(product.into_i64())
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}
