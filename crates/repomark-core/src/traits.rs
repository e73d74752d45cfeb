use crate::error::Result;
use crate::models::RepositorySummary;

/// Remote repository search endpoint
///
/// Implementations perform one blocking request per call. Any failure is
/// reported as an error; callers do not distinguish between causes.
pub trait RepositorySearch: Send + Sync {
    /// Search repositories by keyword, returning at most `per_page` items in API order
    fn search_repositories(&self, query: &str, per_page: usize) -> Result<Vec<RepositorySummary>>;

    /// Look up a single repository by its numeric ID
    fn get_repository(&self, id: u64) -> Result<RepositorySummary>;
}

/// Persistent key-value store holding raw string payloads
pub trait KeyValueStore {
    /// Read the payload stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`
    fn set(&mut self, key: &str, payload: &str) -> Result<()>;
}
