//! CLI error type.

/// Errors surfaced to the CLI user.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    /// Input could not be read or output could not be written.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Configuration failed to load.
    #[error("configuration error")]
    Config(#[from] azb_config::ConfigError),

    /// The response could not be encoded.
    #[error("failed to encode response")]
    Json(#[from] serde_json::Error),
}
