use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that abort the client.
///
/// Per-request failures are `client::ClientError` and land in view
/// state; this enum is for errors with no screen to land on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("terminal: {0}")]
    Terminal(String),
}
