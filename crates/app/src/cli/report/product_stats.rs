use clap::Args;
use storefront_app::domain::{
    products::records::ProductField,
    query::{Predicate, Value},
    reports::records::ProductStats,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ProductStatsArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Only products of this collection
    #[arg(long)]
    collection_id: Option<i64>,

    /// Only products priced at or above this many minor units
    #[arg(long)]
    min_price: Option<u64>,

    /// Only products priced at or below this many minor units
    #[arg(long)]
    max_price: Option<u64>,
}

impl ProductStatsArgs {
    fn filter(&self) -> Option<Predicate<ProductField>> {
        [
            self.collection_id
                .map(|collection| Predicate::eq(ProductField::CollectionId, collection)),
            self.min_price
                .map(|price| Predicate::gte(ProductField::UnitPrice, Value::amount(price))),
            self.max_price
                .map(|price| Predicate::lte(ProductField::UnitPrice, Value::amount(price))),
        ]
        .into_iter()
        .flatten()
        .reduce(|all, clause| all & clause)
    }
}

pub(crate) async fn run(args: ProductStatsArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let ProductStats {
        count,
        min_price,
        max_price,
        avg_price,
        total_inventory,
    } = context
        .reports
        .product_stats(args.filter())
        .await
        .map_err(|error| format!("failed to compute product stats: {error}"))?;

    let show = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |price| price.to_string());

    println!("count: {count}");
    println!("min_price: {}", show(min_price));
    println!("max_price: {}", show(max_price));
    println!(
        "avg_price: {}",
        avg_price.map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"))
    );
    println!("total_inventory: {total_inventory}");

    Ok(())
}
