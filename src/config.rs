use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DYNAMIC_CHANNEL_NAME: &str = "Lounge";
const DEFAULT_COMMAND_PATH: &str = "config";
const DEFAULT_LOG_FILE: &str = "rocket-.log";

pub struct Config {
    pub discord_bot_token: String,

    /// Name given to voice channels created by the dynamic voice pool.
    pub dynamic_channel_name: String,
    /// Directory holding the slash command JSON descriptors.
    pub command_path: PathBuf,
    /// Base path of the daily rolling log file; the date is inserted before the
    /// extension.
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            discord_bot_token: var("ROCKET_DISCORD_TOKEN")
                .ok_or_else(|| ConfigError::MissingEnvVar("ROCKET_DISCORD_TOKEN".to_string()))?,
            dynamic_channel_name: var("ROCKET_DYNAMIC_CHANNEL_NAME")
                .unwrap_or_else(|| DEFAULT_DYNAMIC_CHANNEL_NAME.to_string()),
            command_path: var("ROCKET_COMMAND_PATH")
                .unwrap_or_else(|| DEFAULT_COMMAND_PATH.to_string())
                .into(),
            log_file: var("ROCKET_LOG_FILE")
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
                .into(),
        })
    }
}
