use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::roster::{Roster, DEFAULT_TEAMS};

pub const CONFIG_FILE: &str = "standup-picker.toml";
const RC_FILE: &str = ".standup-picker-rc";

/// Main configuration structure for the standup picker
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    /// Hidden presentation order
    pub roster: RosterConfig,
    /// Pick workflow settings
    pub selection: SelectionConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterConfig {
    /// Team names, first presents first
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Pause between asking for a team and revealing it
    pub thinking_delay_ms: u64,
    /// Fixed seed for the display shuffle (random when unset)
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log filter directive, e.g. "info" or "standup_picker=debug"
    pub log_level: String,
    /// Emit logs as JSON
    pub json_logs: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig {
                teams: DEFAULT_TEAMS.iter().map(|name| name.to_string()).collect(),
            },
            selection: SelectionConfig {
                thinking_delay_ms: 800,
                shuffle_seed: None,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: false,
            },
        }
    }
}

impl SelectionConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl PickerConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (standup-picker.toml, .standup-picker-rc)
    /// 3. Environment variables (prefixed with STANDUP_PICKER_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&PickerConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new(CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(CONFIG_FILE));
        }

        if Path::new(RC_FILE).exists() {
            builder = builder.add_source(File::new(RC_FILE, config::FileFormat::Toml));
        }

        // Double underscore separates sections: STANDUP_PICKER_SELECTION__THINKING_DELAY_MS
        builder = builder.add_source(
            Environment::with_prefix("STANDUP_PICKER")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("roster.teams")
                .try_parsing(true),
        );

        let config: PickerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validated roster built from `roster.teams`
    pub fn roster(&self) -> Result<Roster> {
        Ok(Roster::new(&self.roster.teams)?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
