// GitHub API HTTP client.
// Unauthenticated requests with a fixed client identity, a request
// timeout, and cooperative cancellation.

use std::time::Duration;

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::cancel::CancelToken;
use crate::error::{FolioError, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";
const CLIENT_USER_AGENT: &str = "kxrim-dev-portfolio";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// GitHub API client. Anonymous, so every call counts against the
/// per-address rate limit (historically 60 requests per hour).
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new client with the default request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API root (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str, cancel: &CancelToken) -> Result<Response> {
        let request = self.client.get(self.url(endpoint));
        self.send(request, cancel).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
        cancel: &CancelToken,
    ) -> Result<Response> {
        let request = self.client.get(self.url(endpoint)).query(params);
        self.send(request, cancel).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request, racing it against the cancellation token.
    async fn send(&self, request: RequestBuilder, cancel: &CancelToken) -> Result<Response> {
        if cancel.is_cancelled() {
            return Err(FolioError::Cancelled);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(FolioError::Cancelled),
            result = request.send() => result.map_err(FolioError::Api)?,
        };

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::FORBIDDEN => Err(FolioError::RateLimited {
                message: "GitHub API rate limit exceeded (anonymous requests are \
                          limited to 60 per hour per address); try again later"
                    .to_string(),
            }),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(FolioError::NotFound(url))
            }
            status => Err(FolioError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_on_cancelled_token_is_a_no_op() {
        let client = GitHubClient::new().unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        // Returns before any network IO happens.
        let err = client.get("/users/nobody", &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/nobody")
            .with_status(403)
            .create_async()
            .await;

        let client = GitHubClient::new().unwrap().with_base_url(server.url());
        let err = client
            .get("/users/nobody", &CancelToken::new())
            .await
            .unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/nobody")
            .with_status(404)
            .create_async()
            .await;

        let client = GitHubClient::new().unwrap().with_base_url(server.url());
        let err = client
            .get("/users/nobody", &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/nobody")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = GitHubClient::new().unwrap().with_base_url(server.url());
        let err = client
            .get("/users/nobody", &CancelToken::new())
            .await
            .unwrap_err();
        match err {
            FolioError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
