use thiserror::Error;

/// Common errors raised by collaborators of the core (search endpoint, storage)
#[derive(Error, Debug)]
pub enum RepomarkError {
    #[error("Authentication failed")]
    Unauthorized,

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RepomarkError {
    fn from(err: std::io::Error) -> Self {
        RepomarkError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RepomarkError {
    fn from(err: serde_json::Error) -> Self {
        RepomarkError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepomarkError>;
