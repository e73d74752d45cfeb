//! Unit tests for GitHubClient using wiremock

#[cfg(test)]
mod tests {
    use crate::client::GitHubClient;
    use crate::error::GitHubError;
    use repomark_core::{RepomarkError, RepositorySearch};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Helper to create a mock GitHub repository response
    fn mock_github_repo(id: u64, owner: &str, name: &str, stars: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "full_name": format!("{}/{}", owner, name),
            "html_url": format!("https://github.com/{}/{}", owner, name),
            "description": format!("{} description", name),
            "stargazers_count": stars,
            "language": "TypeScript",
            "owner": {
                "login": owner,
                "id": 1,
                "avatar_url": format!("https://avatars.githubusercontent.com/{}", owner)
            }
        })
    }

    #[tokio::test]
    async fn test_search_repositories() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "react"))
            .and(query_param("per_page", "30"))
            .and(header("Accept", "application/vnd.github+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [
                    mock_github_repo(10270250, "facebook", "react", 230000),
                    mock_github_repo(29028775, "facebook", "react-native", 120000)
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client.search_repositories("react", 30).unwrap();

        assert_eq!(result.total_count, 2);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].name, "react");
        assert_eq!(result.items[1].name, "react-native");
    }

    #[tokio::test]
    async fn test_search_sends_token_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 0,
                "incomplete_results": false,
                "items": []
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), Some("test-token"));
        let result = client.search_repositories("anything", 30).unwrap();

        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_encodes_query_and_clamps_page_size() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "language:rust stars:>100"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 1,
                "incomplete_results": false,
                "items": [mock_github_repo(1, "tokio-rs", "tokio", 25000)]
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client
            .search_repositories("language:rust stars:>100", 500)
            .unwrap();

        assert_eq!(result.items[0].full_name, "tokio-rs/tokio");
    }

    #[tokio::test]
    async fn test_search_missing_items_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client.search_repositories("react", 30).unwrap();

        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_malformed_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client.search_repositories("react", 30);

        assert!(matches!(result, Err(GitHubError::Parse(_))));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_json(serde_json::json!({
                        "message": "API rate limit exceeded"
                    })),
            )
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client.search_repositories("react", 30);

        assert!(matches!(result, Err(GitHubError::RateLimited)));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials"
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), Some("bad-token"));
        let result = client.search_repositories("react", 30);

        assert!(matches!(result, Err(GitHubError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_invalid_query_reports_validation_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Validation Failed"
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        match client.search_repositories("stars:>>", 30) {
            Err(GitHubError::Validation(message)) => assert_eq!(message, "Validation Failed"),
            other => panic!("expected validation error, got {:?}", other.map(|r| r.items.len())),
        }
    }

    #[tokio::test]
    async fn test_server_error_uses_status_when_body_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        match client.search_repositories("react", 30) {
            Err(GitHubError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "HTTP 502");
            }
            other => panic!("expected API error, got {:?}", other.map(|r| r.items.len())),
        }
    }

    #[tokio::test]
    async fn test_get_repository() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repositories/42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_github_repo(42, "deep", "thought", 42)),
            )
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let repo = client.get_repository(42).unwrap();

        assert_eq!(repo.id, 42);
        assert_eq!(repo.full_name, "deep/thought");
        assert_eq!(repo.owner.login, "deep");
    }

    #[tokio::test]
    async fn test_get_repository_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repositories/404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found"
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let result = client.get_repository(404);

        assert!(matches!(result, Err(GitHubError::RepositoryNotFound(id)) if id == "404"));
    }

    #[tokio::test]
    async fn test_trait_search_converts_to_core() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [
                    mock_github_repo(2, "b", "second", 1),
                    mock_github_repo(1, "a", "first", 1000)
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let search: &dyn RepositorySearch = &client;
        let items = search.search_repositories("x", 30).unwrap();

        // API order is preserved, not re-sorted by stars
        assert_eq!(items[0].id, 2);
        assert_eq!(items[1].id, 1);
        assert_eq!(items[1].url, "https://github.com/a/first");
        assert_eq!(items[1].owner_avatar_url, "https://avatars.githubusercontent.com/a");
    }

    #[tokio::test]
    async fn test_trait_errors_map_to_core() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = GitHubClient::with_base_url(&mock_server.uri(), None);
        let search: &dyn RepositorySearch = &client;

        assert!(matches!(
            search.search_repositories("x", 30),
            Err(RepomarkError::RateLimited)
        ));
    }

    #[test]
    fn test_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = GitHubClient::with_base_url("http://127.0.0.1:9", None);
        let result = client.search_repositories("react", 30);

        assert!(matches!(result, Err(GitHubError::Http(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GitHubClient::with_base_url("https://ghe.example.com/api/v3/", None);
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }
}
