use anyhow::Result;
use clap::Parser;

use standup_picker::cli::commands::init::InitCommand;
use standup_picker::cli::commands::roster::RosterCommand;
use standup_picker::cli::commands::run::RunCommand;
use standup_picker::cli::commands::Command;
use standup_picker::cli::{Cli, Commands};
use standup_picker::{init_telemetry, PickerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    PickerConfig::load_env_file()?;
    let config = PickerConfig::load()?;
    init_telemetry(&config.observability)?;

    match cli.command.unwrap_or_default() {
        Commands::Run { json, yes, seed } => {
            RunCommand::new(config)
                .with_json(json)
                .with_yes(yes)
                .with_seed(seed)
                .execute()
                .await
        }
        Commands::Init { force, dry_run } => InitCommand::new(force, dry_run).execute().await,
        Commands::Roster { reveal } => RosterCommand::new(config).with_reveal(reveal).execute().await,
    }
}
