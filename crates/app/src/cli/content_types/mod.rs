use clap::{Args, Subcommand};

mod register;

#[derive(Debug, Args)]
pub(crate) struct ContentTypesCommand {
    #[command(subcommand)]
    command: ContentTypesSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContentTypesSubcommand {
    Register(register::RegisterArgs),
}

pub(crate) async fn run(command: ContentTypesCommand) -> Result<(), String> {
    match command.command {
        ContentTypesSubcommand::Register(args) => register::run(args).await,
    }
}
