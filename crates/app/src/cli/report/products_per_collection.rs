use clap::{Args, ValueEnum};
use storefront_app::domain::reports::data::{Aggregate, GroupBy, Metric};

use crate::cli::DatabaseArgs;

use super::print_summaries;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollectionAggregate {
    Count,
    MinPrice,
    MaxPrice,
    AvgPrice,
    TotalInventory,
}

impl From<CollectionAggregate> for Aggregate {
    fn from(aggregate: CollectionAggregate) -> Self {
        match aggregate {
            CollectionAggregate::Count => Self::Count,
            CollectionAggregate::MinPrice => Self::Min(Metric::UnitPrice),
            CollectionAggregate::MaxPrice => Self::Max(Metric::UnitPrice),
            CollectionAggregate::AvgPrice => Self::Avg(Metric::UnitPrice),
            CollectionAggregate::TotalInventory => Self::Sum(Metric::Inventory),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ProductsPerCollectionArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Value reported for each collection
    #[arg(long, value_enum, default_value = "count")]
    aggregate: CollectionAggregate,
}

pub(crate) async fn run(args: ProductsPerCollectionArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let summaries = context
        .reports
        .summarize(GroupBy::Collection, args.aggregate.into())
        .await
        .map_err(|error| format!("failed to summarize collections: {error}"))?;

    print_summaries(&summaries);

    Ok(())
}
