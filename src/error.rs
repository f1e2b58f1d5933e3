use thiserror::Error;

/// Main error type for the explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Caller handed in a record that breaks the input contract
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SPARQL endpoint answered with a failure
    #[error("Endpoint error ({status}): {message}")]
    Endpoint { status: u16, message: String },

    /// Entity unknown to the resolver
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl ExplorerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ExplorerError::InvalidInput(message.into())
    }
}

impl From<String> for ExplorerError {
    fn from(s: String) -> Self {
        ExplorerError::Other(s)
    }
}

impl From<&str> for ExplorerError {
    fn from(s: &str) -> Self {
        ExplorerError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ExplorerError>;
