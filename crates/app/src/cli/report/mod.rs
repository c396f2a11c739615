use clap::{Args, Subcommand};
use storefront_app::domain::reports::records::GroupSummary;

mod discounted_prices;
mod orders_per_customer;
mod product_stats;
mod products_per_collection;

#[derive(Debug, Args)]
pub(crate) struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReportSubcommand {
    ProductsPerCollection(products_per_collection::ProductsPerCollectionArgs),
    OrdersPerCustomer(orders_per_customer::OrdersPerCustomerArgs),
    ProductStats(product_stats::ProductStatsArgs),
    DiscountedPrices(discounted_prices::DiscountedPricesArgs),
}

pub(crate) async fn run(command: ReportCommand) -> Result<(), String> {
    match command.command {
        ReportSubcommand::ProductsPerCollection(args) => products_per_collection::run(args).await,
        ReportSubcommand::OrdersPerCustomer(args) => orders_per_customer::run(args).await,
        ReportSubcommand::ProductStats(args) => product_stats::run(args).await,
        ReportSubcommand::DiscountedPrices(args) => discounted_prices::run(args).await,
    }
}

fn print_summaries(summaries: &[GroupSummary]) {
    for summary in summaries {
        let value = summary
            .value
            .map_or_else(|| "-".to_string(), |value| value.to_string());

        println!("{}\t{}\t{value}", summary.group_id, summary.label);
    }
}
