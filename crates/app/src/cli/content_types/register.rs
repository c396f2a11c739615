use clap::Args;
use storefront_app::domain::tags::{SqliteTagsService, TagsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: RegisterArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let registered = SqliteTagsService::new(db)
        .register_all_content_types()
        .await
        .map_err(|error| format!("failed to register content types: {error}"))?;

    for record in registered {
        println!("{}\t{}", record.id, record.content_type);
    }

    Ok(())
}
