use serde::{Deserialize, Serialize};

/// Repository owner (user or organization)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubOwner {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
}

/// GitHub repository as returned by the search and repository endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub owner: GitHubOwner,
}

/// Response of `GET /search/repositories`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubRepoSearchResult {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    /// Absent on some error-ish 200 responses; treated as no results
    #[serde(default)]
    pub items: Vec<GitHubRepo>,
}
