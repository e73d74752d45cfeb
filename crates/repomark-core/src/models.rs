use serde::{Deserialize, Serialize};

/// Repository as returned by a search, snapshotted as-is when bookmarked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Stable numeric ID, the only identity key
    pub id: u64,
    /// Repository name
    pub name: String,
    /// Browser URL of the repository
    pub url: String,
    /// Free-form description
    pub description: Option<String>,
    /// Number of stargazers
    pub star_count: u64,
    /// Dominant language detected by the host
    pub primary_language: Option<String>,
    /// Login of the owning user or organization
    pub owner_login: String,
    /// Avatar of the owner
    pub owner_avatar_url: String,
}

impl RepositorySummary {
    /// `owner/name`, as shown on the hosting platform
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_login, self.name)
    }
}
