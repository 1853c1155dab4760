use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Whitespace-only values
    /// are treated as unset. Check the `.env` file or the process environment.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}
