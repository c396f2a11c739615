use clap::Args;
use serde_json::Value;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RawArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Read-only statement (`SELECT` or `WITH`); any writes are rolled back
    #[arg(long)]
    sql: String,
}

pub(crate) async fn run(args: RawArgs) -> Result<(), String> {
    let context = args.database.context().await?;

    let rows = context
        .reports
        .raw_query(args.sql)
        .await
        .map_err(|error| format!("failed to run query: {error}"))?;

    if let Some(first) = rows.first() {
        let header: Vec<&str> = first.iter().map(|(column, _)| column.as_str()).collect();

        println!("{}", header.join("\t"));
    }

    for row in &rows {
        let values: Vec<String> = row.iter().map(|(_, value)| cell(value)).collect();

        println!("{}", values.join("\t"));
    }

    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
