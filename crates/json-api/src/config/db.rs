//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `SQLite` connection string, e.g. `sqlite://storefront.db`
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}
