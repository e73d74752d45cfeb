//! Implementation of repomark-core traits for GitHubClient

use repomark_core::{RepomarkError, RepositorySearch, RepositorySummary, Result};

use crate::client::GitHubClient;
use crate::convert::github_repo_to_core;

impl RepositorySearch for GitHubClient {
    fn search_repositories(&self, query: &str, per_page: usize) -> Result<Vec<RepositorySummary>> {
        let result = self
            .search_repositories(query, per_page)
            .map_err(RepomarkError::from)?;

        Ok(result.items.into_iter().map(github_repo_to_core).collect())
    }

    fn get_repository(&self, id: u64) -> Result<RepositorySummary> {
        let repo = self.get_repository(id).map_err(RepomarkError::from)?;
        Ok(github_repo_to_core(repo))
    }
}
