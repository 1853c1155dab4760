//! Error types for the bot.
//!
//! `AppError` is the top-level error returned by services and the Discord adapter.
//! Nothing in the event handlers propagates it further: every handler logs the error
//! and carries on, so a failed reconciliation or command never takes the gateway
//! connection down.

pub mod command;
pub mod config;

use thiserror::Error;

use crate::error::{command::CommandConfigError, config::ConfigError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Slash command descriptors could not be loaded.
    #[error(transparent)]
    CommandConfigErr(#[from] CommandConfigError),

    /// The rolling log file could not be opened.
    #[error("Failed to open log file: {0}")]
    LogFileErr(#[from] tracing_appender::rolling::InitError),

    /// A global logger is already installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingErr(String),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Covers HTTP failures, rate limits that exhausted
    /// serenity's own retries, and gateway errors.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// A Discord resource the operation depends on does not exist.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Unexpected state indicating a bug or malformed Discord payload.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
