//! Model conversions from GitHub types to repomark-core types

use repomark_core::RepositorySummary;

use crate::models::GitHubRepo;

/// Convert a GitHub repository to a core summary
pub fn github_repo_to_core(repo: GitHubRepo) -> RepositorySummary {
    RepositorySummary {
        id: repo.id,
        name: repo.name,
        url: repo.html_url,
        description: repo.description,
        star_count: repo.stargazers_count,
        primary_language: repo.language,
        owner_login: repo.owner.login,
        owner_avatar_url: repo.owner.avatar_url,
    }
}
