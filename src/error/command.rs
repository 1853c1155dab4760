use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading slash command descriptors from disk.
#[derive(Error, Debug)]
pub enum CommandConfigError {
    /// The descriptor directory or one of its files could not be read.
    #[error("Failed to read command descriptors from '{path}': {source}")]
    Read {
        /// Directory or file that failed to read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor file is not valid JSON or does not match the descriptor shape.
    #[error("Invalid command descriptor '{path}': {source}")]
    Parse {
        /// File containing the invalid descriptor
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
