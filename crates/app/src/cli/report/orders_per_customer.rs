use clap::{Args, ValueEnum};
use storefront_app::domain::reports::data::{Aggregate, GroupBy, Metric};

use crate::cli::DatabaseArgs;

use super::print_summaries;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CustomerAggregate {
    Count,
    ItemsBought,
    TotalSpent,
}

impl From<CustomerAggregate> for Aggregate {
    fn from(aggregate: CustomerAggregate) -> Self {
        match aggregate {
            CustomerAggregate::Count => Self::Count,
            CustomerAggregate::ItemsBought => Self::Sum(Metric::Quantity),
            CustomerAggregate::TotalSpent => Self::Sum(Metric::LineTotal),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrdersPerCustomerArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Value reported for each customer
    #[arg(long, value_enum, default_value = "count")]
    aggregate: CustomerAggregate,
}

pub(crate) async fn run(args: OrdersPerCustomerArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let summaries = context
        .reports
        .summarize(GroupBy::Customer, args.aggregate.into())
        .await
        .map_err(|error| format!("failed to summarize customers: {error}"))?;

    print_summaries(&summaries);

    Ok(())
}
