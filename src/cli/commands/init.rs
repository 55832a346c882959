use anyhow::{anyhow, Result};
use std::path::PathBuf;

use super::Command;
use crate::config::{PickerConfig, CONFIG_FILE};

/// Writes a default configuration so the roster can be edited by hand
pub struct InitCommand {
    pub force: bool,
    pub dry_run: bool,
    path: PathBuf,
}

impl InitCommand {
    pub fn new(force: bool, dry_run: bool) -> Self {
        Self {
            force,
            dry_run,
            path: PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

impl Command for InitCommand {
    async fn execute(&self) -> Result<()> {
        let config = PickerConfig::default();

        if self.dry_run {
            println!("📝 Would write {}:", self.path.display());
            println!();
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }

        if self.path.exists() && !self.force {
            return Err(anyhow!(
                "{} already exists. Use --force to overwrite it.",
                self.path.display()
            ));
        }

        config.save_to_file(&self.path)?;
        tracing::info!(path = %self.path.display(), "Configuration written");
        println!("✅ Wrote {}", self.path.display());
        println!("   Edit [roster] teams to set the hidden presentation order.");
        Ok(())
    }
}
