//! Bot settings loaded from `feedbackbot.toml` and the environment.
//!
//! Every field has a default, so the settings file is optional. Environment variables
//! (including ones loaded from `.env`) override the file for the paths the service unit
//! usually wants to change.

use crate::core::feedback::FeedbackRouting;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file read when `FEEDBACKBOT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "feedbackbot.toml";
/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "FEEDBACKBOT_CONFIG";
/// Environment variable overriding [`Settings::token_file`].
pub const TOKEN_FILE_VAR: &str = "FEEDBACKBOT_TOKEN_FILE";
/// Environment variable overriding [`Settings::log_file`].
pub const LOG_FILE_VAR: &str = "FEEDBACKBOT_LOG_FILE";

/// The settings file to read: `FEEDBACKBOT_CONFIG` if set, otherwise the default path.
pub fn config_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(CONFIG_PATH_VAR)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// File holding the Discord bot token
    pub token_file: PathBuf,
    /// Append-only operational log
    pub log_file: PathBuf,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Recognized guilds and their feedback channels
    pub guilds: GuildSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from("discord.token"),
            log_file: PathBuf::from("feedbackbot.log"),
            log_filter: "info".to_string(),
            guilds: GuildSettings::default(),
        }
    }
}

/// The `[guilds]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuildSettings {
    /// The public community server
    pub public_guild_id: u64,
    /// The private server used for bot development
    pub private_guild_id: u64,
    /// `#feedback` in the public server
    pub public_channel_id: u64,
    /// `#feedback` in the private server
    pub private_channel_id: u64,
}

impl Default for GuildSettings {
    fn default() -> Self {
        Self {
            public_guild_id: 528_728_694_680_715_324,
            private_guild_id: 882_164_794_566_791_179,
            public_channel_id: 1_082_557_504_887_730_268,
            private_channel_id: 1_082_090_578_067_607_632,
        }
    }
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        match std::fs::read_to_string(path_ref) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config {
                message: format!("Failed to read settings file {path_ref:?}: {e}"),
            }),
        }
    }

    /// Loads settings from the file named by `FEEDBACKBOT_CONFIG` (or the default path) and
    /// applies environment overrides.
    pub fn load_from_env() -> Result<Self> {
        let mut settings = Self::load(config_path(|key| std::env::var(key).ok()))?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Applies path overrides. `lookup` maps a variable name to its value, if set.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token_file) = lookup(TOKEN_FILE_VAR).filter(|v| !v.is_empty()) {
            self.token_file = PathBuf::from(token_file);
        }
        if let Some(log_file) = lookup(LOG_FILE_VAR).filter(|v| !v.is_empty()) {
            self.log_file = PathBuf::from(log_file);
        }
    }

    /// Checks the invariants the Discord layer relies on.
    ///
    /// Ids must be non-zero (serenity ids cannot be zero) and the two guilds must differ,
    /// otherwise channel selection would be ambiguous.
    pub fn validate(&self) -> Result<()> {
        let g = &self.guilds;
        let ids = [
            ("public_guild_id", g.public_guild_id),
            ("private_guild_id", g.private_guild_id),
            ("public_channel_id", g.public_channel_id),
            ("private_channel_id", g.private_channel_id),
        ];
        if let Some((name, _)) = ids.iter().find(|(_, id)| *id == 0) {
            return Err(Error::Config {
                message: format!("guilds.{name} must be non-zero"),
            });
        }
        if g.public_guild_id == g.private_guild_id {
            return Err(Error::Config {
                message: "guilds.public_guild_id and guilds.private_guild_id must differ"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// The routing table derived from the `[guilds]` table.
    #[must_use]
    pub const fn routing(&self) -> FeedbackRouting {
        FeedbackRouting {
            public_guild: self.guilds.public_guild_id,
            private_guild: self.guilds.private_guild_id,
            public_channel: self.guilds.public_channel_id,
            private_channel: self.guilds.private_channel_id,
        }
    }
}
