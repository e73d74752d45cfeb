pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;

#[cfg(test)]
mod client_tests;

pub use client::{GitHubClient, DEFAULT_BASE_URL, DEFAULT_PER_PAGE};
pub use error::{GitHubError, Result};
pub use models::*;

// Re-export core types for convenience
pub use repomark_core::{RepomarkError, RepositorySearch};
