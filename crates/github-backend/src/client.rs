use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;
use ureq::http::Response;

use crate::error::{GitHubError, Result};
use crate::models::*;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Result-size bound used when the caller has no preference
pub const DEFAULT_PER_PAGE: usize = 30;

/// GitHub REST API client for repository search
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    ///
    /// The token is optional; anonymous requests work with a lower rate limit.
    pub fn new(token: Option<&str>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform an authenticated (if a token is set) GET and decode the JSON body
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "repomark");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request.call().map_err(GitHubError::Http)?;
        let mut response = self.check_response(response)?;
        let body = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Check response status and return error if not successful
    fn check_response(&self, mut response: Response<ureq::Body>) -> Result<Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // Detect rate limiting: 403 with x-ratelimit-remaining: 0
        if status == 403 {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining.to_str().unwrap_or("") == "0" {
                    return Err(GitHubError::RateLimited);
                }
            }
        }
        if status == 429 {
            return Err(GitHubError::RateLimited);
        }

        // Try to read error body
        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Try to parse as GitHub error response
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        match status {
            401 => Err(GitHubError::Unauthorized),
            422 => Err(GitHubError::Validation(message)),
            _ => Err(GitHubError::Api { status, message }),
        }
    }

    /// Search repositories by keyword
    ///
    /// `per_page` is clamped to the API's 1..=100 range. Items come back in
    /// the API's own (best match) order.
    pub fn search_repositories(&self, query: &str, per_page: usize) -> Result<GitHubRepoSearchResult> {
        let url = format!(
            "{}/search/repositories?q={}&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            per_page.clamp(1, 100)
        );

        let result: GitHubRepoSearchResult = self.get_json(&url)?;
        debug!(
            total = result.total_count,
            returned = result.items.len(),
            "Repository search completed"
        );
        Ok(result)
    }

    /// Get a repository by its numeric ID
    pub fn get_repository(&self, id: u64) -> Result<GitHubRepo> {
        let url = format!("{}/repositories/{}", self.base_url, id);

        self.get_json(&url).map_err(|e| match e {
            GitHubError::Api { status: 404, .. } => GitHubError::RepositoryNotFound(id.to_string()),
            other => other,
        })
    }
}
