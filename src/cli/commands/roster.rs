use anyhow::Result;

use super::Command;
use crate::config::PickerConfig;

pub struct RosterCommand {
    pub reveal: bool,
    config: PickerConfig,
}

impl RosterCommand {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            reveal: false,
            config,
        }
    }

    pub fn with_reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }

    /// Lines to print; alphabetical unless the hidden order was asked for
    pub fn listing(&self) -> Result<Vec<String>> {
        let roster = self.config.roster()?;
        let mut names: Vec<String> = roster.ids().iter().map(|id| id.to_string()).collect();

        if self.reveal {
            Ok(names
                .into_iter()
                .enumerate()
                .map(|(i, name)| format!("{:>3}. {name}", i + 1))
                .collect())
        } else {
            names.sort_by_key(|name| name.to_lowercase());
            Ok(names.into_iter().map(|name| format!("   • {name}")).collect())
        }
    }
}

impl Command for RosterCommand {
    async fn execute(&self) -> Result<()> {
        let listing = self.listing()?;
        if self.reveal {
            println!("🤫 Hidden presentation order ({} teams):", listing.len());
        } else {
            println!("👥 {} teams on the roster:", listing.len());
        }
        for line in listing {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(teams: &[&str]) -> PickerConfig {
        let mut config = PickerConfig::default();
        config.roster.teams = teams.iter().map(|t| t.to_string()).collect();
        config
    }

    #[test]
    fn test_listing_hides_order_by_default() {
        let command = RosterCommand::new(config(&["UI", "core", "AI"]));
        assert_eq!(command.listing().unwrap(), vec!["   • AI", "   • core", "   • UI"]);
    }

    #[test]
    fn test_reveal_keeps_hidden_order() {
        let command = RosterCommand::new(config(&["UI", "Core"])).with_reveal(true);
        assert_eq!(command.listing().unwrap(), vec!["  1. UI", "  2. Core"]);
    }

    #[test]
    fn test_invalid_roster_fails() {
        let command = RosterCommand::new(config(&[]));
        assert!(command.listing().is_err());
    }
}
