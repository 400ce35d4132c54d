//! HTTP client for the Cloudflare v4 API
//!
//! Handles authentication headers, the response envelope, the plain-text
//! BIND export body, and bounded retries for transient failures.

use super::api::CloudflareApi;
use super::models::{ApiEnvelope, Page, PageParams, Resource};
use crate::config::CloudflareConfig;
use crate::domain::{ApiError, BackupError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Cloudflare API client
///
/// # Example
///
/// ```no_run
/// use cfbackup::adapters::cloudflare::CloudflareClient;
/// use cfbackup::config::{secret_string, CloudflareConfig};
///
/// # fn example() -> cfbackup::domain::Result<()> {
/// let config = CloudflareConfig {
///     token: Some(secret_string("api-token".to_string())),
///     ..Default::default()
/// };
/// let client = CloudflareClient::new(config)?;
/// # Ok(())
/// # }
/// ```
pub struct CloudflareClient {
    /// API base URL without trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Cloudflare configuration (credentials, retry policy)
    config: CloudflareConfig,
}

impl CloudflareClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: CloudflareConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("cfbackup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BackupError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach token or email/key authentication headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.config.token {
            return request.bearer_auth(token.expose_secret());
        }

        match (&self.config.email, &self.config.key) {
            (Some(email), Some(key)) => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key.expose_secret().to_string()),
            _ => request,
        }
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient errors (connection failures, timeouts, 429, 5xx) are
    /// retried.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, ApiError>>,
    {
        let max_retries = self.config.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !e.is_retryable() {
                        return Err(e.into());
                    }

                    let factor = self
                        .config
                        .retry
                        .backoff_multiplier
                        .powi((attempt - 1) as i32);
                    let delay_ms = ((self.config.retry.initial_delay_ms as f64) * factor) as u64;
                    let delay_ms = delay_ms.min(self.config.retry.max_delay_ms);

                    crate::log_retry_attempt!(attempt, max_retries, e);
                    tracing::debug!(delay_ms = delay_ms, "Backing off before retry");

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> std::result::Result<Page, ApiError> {
        let request = self.authorize(self.client.get(url).query(query));

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(e.to_string())
            } else {
                ApiError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);

        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::ConnectionFailed(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        if !is_json {
            // The BIND export endpoint answers with the zone file as text/plain
            return Ok(Page::single(Value::String(body)));
        }

        let envelope: ApiEnvelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        if !envelope.success {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message: envelope.error_message(),
            });
        }

        Ok(envelope.into_page())
    }
}

/// Map a non-2xx response to an [`ApiError`]
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiEnvelope>(body)
        .map(|envelope| envelope.error_message())
        .unwrap_or_else(|_| body.chars().take(512).collect());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::AuthenticationFailed(format!("{status}: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(message),
        s if s.is_server_error() => ApiError::ServerError {
            status: s.as_u16(),
            message,
        },
        s => ApiError::RequestFailed {
            status: s.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl CloudflareApi for CloudflareClient {
    async fn get(&self, resource: &Resource, params: &PageParams) -> Result<Page> {
        let url = format!("{}{}", self.base_url, resource.path());
        let query = params.to_query(resource.is_paginated());

        tracing::debug!(
            resource = %resource,
            page = params.page,
            per_page = params.per_page,
            "GET {}",
            url
        );

        self.retry_request(|| self.fetch_once(&url, &query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::config::RetryConfig;
    use crate::domain::{ResourceCategory, ZoneId};
    use mockito::Matcher;
    use serde_json::json;

    fn test_config(base_url: String) -> CloudflareConfig {
        CloudflareConfig {
            token: Some(secret_string("test-token".to_string())),
            base_url,
            retry: RetryConfig {
                max_retries: 2,
                initial_delay_ms: 1,
                max_delay_ms: 5,
                backoff_multiplier: 2.0,
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_paginated_zones() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/zones")
            .match_header("authorization", "Bearer test-token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "50".into()),
                Matcher::UrlEncoded("name".into(), "foo.com".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "errors": [],
                    "result": [{"id": "z1", "name": "foo.com"}],
                    "result_info": {"page": 1, "per_page": 50, "total_pages": 1, "count": 1, "total_count": 1}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = CloudflareClient::new(test_config(server.url())).unwrap();
        let page = client
            .get(&Resource::Zones, &PageParams::new(1, 50).with_name("foo.com"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.result, json!([{"id": "z1", "name": "foo.com"}]));
        assert_eq!(page.result_info.unwrap().total_pages(), 1);
    }

    #[tokio::test]
    async fn test_get_bind_export_text() {
        let mut server = mockito::Server::new_async().await;
        let zone_file = "example.com.\t3600\tIN\tSOA\tns.example.com. admin.example.com. 1 2 3 4 5\n";
        let mock = server
            .mock("GET", "/zones/z1/dns_records/export")
            .with_status(200)
            .with_header("content-type", "text/plain; charset=utf-8")
            .with_body(zone_file)
            .create_async()
            .await;

        let client = CloudflareClient::new(test_config(server.url())).unwrap();
        let resource = Resource::Zone(ZoneId::new("z1").unwrap(), ResourceCategory::BindExport);
        let page = client.get(&resource, &PageParams::new(1, 50)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.result, Value::String(zone_file.to_string()));
        assert!(page.result_info.is_none());
    }

    #[tokio::test]
    async fn test_get_envelope_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/zones")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": false,
                    "errors": [{"code": 1003, "message": "Invalid or missing zone id."}],
                    "result": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = CloudflareClient::new(test_config(server.url())).unwrap();
        let result = client.get(&Resource::Zones, &PageParams::new(1, 50)).await;

        match result {
            Err(BackupError::Api(ApiError::RequestFailed { message, .. })) => {
                assert!(message.contains("Invalid or missing zone id."));
            }
            other => panic!("Expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_unauthorized_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/zones")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": false,
                    "errors": [{"code": 9109, "message": "Invalid access token"}]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = CloudflareClient::new(test_config(server.url())).unwrap();
        let result = client.get(&Resource::Zones, &PageParams::new(1, 50)).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(BackupError::Api(ApiError::AuthenticationFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_server_error_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/zones")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("bad gateway")
            .expect(2)
            .create_async()
            .await;

        let client = CloudflareClient::new(test_config(server.url())).unwrap();
        let result = client.get(&Resource::Zones, &PageParams::new(1, 50)).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(BackupError::Api(ApiError::ServerError { status: 502, .. }))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            CloudflareClient::new(test_config("https://api.example.com/v4/".to_string())).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v4");
    }
}
