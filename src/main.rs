mod bot;
mod config;
mod data;
mod error;
mod logging;
mod model;
mod service;

use dioxus_logger::tracing;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Flushes the log file on shutdown
    let _log_guard = logging::init(&config.log_file)?;

    tracing::info!(
        "Logging to {}, dynamic voice channels will be named '{}'",
        config.log_file.display(),
        config.dynamic_channel_name
    );

    bot::start::start_bot(&config).await
}
