use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "standup-picker")]
#[command(about = "Round-robin presenter queue for standup meetings")]
#[command(long_about = "Standup Picker calls on every team exactly once, in a hidden order, while the \
                       board is shown shuffled so nobody can guess who is next. Run it with no \
                       subcommand to start an interactive session.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive standup session (default)
    Run {
        /// Emit board snapshots as JSON lines instead of text
        #[arg(long, help = "Write one JSON snapshot per line to stdout for an external renderer")]
        json: bool,
        /// Skip the reset confirmation prompt
        #[arg(short = 'y', long, help = "Reset the board without asking for confirmation")]
        yes: bool,
        /// Seed for the board's display shuffle
        #[arg(long, help = "Fix the display order (overrides selection.shuffle_seed)")]
        seed: Option<u64>,
    },
    /// Write a default standup-picker.toml
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, help = "Overwrite standup-picker.toml if it already exists")]
        force: bool,
        /// Show what would be written without touching the filesystem
        #[arg(long, help = "Print the configuration instead of writing it")]
        dry_run: bool,
    },
    /// List the configured teams
    Roster {
        /// Show teams in their hidden presentation order
        #[arg(long, help = "Print the hidden order instead of an alphabetical list")]
        reveal: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            json: false,
            yes: false,
            seed: None,
        }
    }
}
