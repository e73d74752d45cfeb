use repomark_core::RepomarkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for RepomarkError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => RepomarkError::Http(e.to_string()),
            GitHubError::Parse(e) => RepomarkError::Parse(e.to_string()),
            GitHubError::RepositoryNotFound(id) => RepomarkError::NotFound(id),
            GitHubError::Unauthorized => RepomarkError::Unauthorized,
            GitHubError::RateLimited => RepomarkError::RateLimited,
            GitHubError::Validation(msg) => RepomarkError::InvalidInput(msg),
            GitHubError::Api { status, message } => RepomarkError::Api { status, message },
        }
    }
}
