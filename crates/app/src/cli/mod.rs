use clap::{Args, Parser, Subcommand};
use storefront_app::{
    context::AppContext,
    database::{self, Db},
};

mod content_types;
mod db;
mod raw;
mod report;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    ContentTypes(content_types::ContentTypesCommand),
    Report(report::ReportCommand),
    Raw(raw::RawArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::ContentTypes(command) => content_types::run(command).await,
            Commands::Report(command) => report::run(command).await,
            Commands::Raw(args) => raw::run(args).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// SQLite connection string, e.g. `sqlite://storefront.db`
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    /// Connect without touching the schema.
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(Db::new(pool))
    }

    /// Connect, migrate and register content types.
    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("failed to initialise storefront: {error}"))
    }
}
