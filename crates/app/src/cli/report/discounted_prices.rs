use clap::Args;
use storefront_app::domain::{
    products::{data::ProductQuery, records::ProductField},
    query::Predicate,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DiscountedPricesArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Fraction taken off every unit price, between 0 and 1
    #[arg(long, default_value_t = 0.2)]
    discount: f64,

    /// Only products of this collection
    #[arg(long)]
    collection_id: Option<i64>,
}

pub(crate) async fn run(args: DiscountedPricesArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let mut query = ProductQuery::new().asc(ProductField::Title);

    if let Some(collection) = args.collection_id {
        query = query.filter(Predicate::eq(ProductField::CollectionId, collection));
    }

    let products = context
        .products
        .list_discounted_products(query, args.discount)
        .await
        .map_err(|error| format!("failed to list discounted prices: {error}"))?;

    for row in products {
        println!(
            "{}\t{}\t{}\t{}",
            row.product.id, row.product.title, row.product.unit_price, row.discounted_price
        );
    }

    Ok(())
}
