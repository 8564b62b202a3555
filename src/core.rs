use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::DownloaderConfig;
use crate::error::{DownloadError, Result};
use crate::search::{SearchRequest, SearchResponse};
use crate::traits::EdgarTransport;
use async_trait::async_trait;

const MAX_RETRIES: u32 = 5;
const INITIAL_BACKOFF_MS: u64 = 1000; // 1 second

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// HTTP transport for the SEC EDGAR services with built-in rate limiting
/// and retry logic.
///
/// The client enforces SEC fair-access guidelines with a token bucket (at
/// most `rate_limit` requests per second; requests wait for a token before
/// going out) and retries transient failures with exponential backoff and
/// jitter. The user agent supplied at construction identifies the caller on
/// every request, and response bodies are transparently decompressed, so
/// each request advertises `Accept-Encoding: gzip, deflate` and carries the
/// `Host` of whichever endpoint it targets.
#[derive(Debug, Clone)]
pub struct EdgarClient {
    /// HTTP client for making requests
    client: reqwest::Client,

    /// Token bucket rate limiter for SEC compliance
    rate_limiter: Arc<Governor>,

    /// Full-text search endpoint
    search_url: String,
}

impl EdgarClient {
    /// Creates a client with default configuration and the given user agent.
    ///
    /// The SEC requires a descriptive user agent of the form
    /// `"AppName/Version (contact@email.com)"` so they can reach you if your
    /// application causes issues.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(&DownloaderConfig::new(user_agent))
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::ConfigError` if the user agent is malformed,
    /// the rate limit is zero, or the HTTP client cannot be built.
    pub fn with_config(config: &DownloaderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| DownloadError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DownloadError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                DownloadError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        Ok(EdgarClient {
            client,
            rate_limiter,
            search_url: config.base_urls.search.clone(),
        })
    }

    /// Wait duration before the next retry attempt: `(2^retry × 1000ms) ± 20%`.
    fn calculate_backoff(retry: u32) -> Duration {
        let backoff_ms = INITIAL_BACKOFF_MS * (2_u64.pow(retry));
        let jitter = (backoff_ms as f64 * 0.2 * (fastrand::f64() - 0.5)) as i64;
        Duration::from_millis((backoff_ms as i64 + jitter) as u64)
    }

    /// Executes one full-text search request.
    ///
    /// Rate limit responses (429) and network failures are retried with
    /// backoff. Any other failure is terminal: the error body is probed for
    /// the structured `error.root_cause[0].reason` the search API returns,
    /// and when present the failure carries that reason together with the
    /// serialized request payload for diagnosis.
    pub async fn post_search(&self, payload: &SearchRequest) -> Result<SearchResponse> {
        let mut retries = 0;

        loop {
            self.rate_limiter.until_ready().await;

            let response = match self.client.post(&self.search_url).json(payload).send().await {
                Ok(response) => response,
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        return Err(DownloadError::RequestError(e));
                    }
                    let backoff = Self::calculate_backoff(retries);
                    tracing::warn!(
                        "Search request failed: {:?}. Attempt {}/{}. Retrying in {:?}.",
                        e,
                        retries + 1,
                        MAX_RETRIES + 1,
                        backoff
                    );
                    sleep(backoff).await;
                    retries += 1;
                    continue;
                }
            };

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await.map_err(DownloadError::RequestError)?;
                    return Ok(serde_json::from_str(&body)?);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    if retries >= MAX_RETRIES {
                        return Err(DownloadError::RateLimitExceeded);
                    }
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Self::calculate_backoff(retries));

                    tracing::warn!(
                        "Rate limit hit (429) on search. Attempt {}/{}. Waiting for {:?} before retry.",
                        retries + 1,
                        MAX_RETRIES + 1,
                        retry_after
                    );
                    sleep(retry_after).await;
                    retries += 1;
                    continue;
                }
                status => {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    return Err(Self::search_api_error(status, &body, payload));
                }
            }
        }
    }

    /// Maps a failed search response to an error, preferring the structured
    /// reason the search API embeds in its error body.
    fn search_api_error(status: StatusCode, body: &str, payload: &SearchRequest) -> DownloadError {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(reason) = value
                .pointer("/error/root_cause/0/reason")
                .and_then(|reason| reason.as_str())
            {
                return DownloadError::SearchApiError {
                    reason: reason.to_string(),
                    payload: serde_json::to_string(payload).unwrap_or_default(),
                };
            }
        }

        DownloadError::InvalidResponse(format!(
            "Unexpected status code: {} from search. Response preview: {}",
            status,
            body.chars().take(200).collect::<String>()
        ))
    }

    /// Fetches binary data from a URL with rate limiting and retry logic.
    ///
    /// Retries up to 5 times on rate limit responses (429) and network
    /// failures, using exponential backoff with jitter. Other HTTP errors
    /// are returned immediately.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let mut retries = 0;

        loop {
            self.rate_limiter.until_ready().await;

            let response = match self.client.get(url).send().await {
                Ok(response) => response,
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        return Err(DownloadError::RequestError(e));
                    }
                    let backoff = Self::calculate_backoff(retries);
                    tracing::warn!(
                        "Request failed for {}: {:?}. Attempt {}/{}. Retrying in {:?}.",
                        url,
                        e,
                        retries + 1,
                        MAX_RETRIES + 1,
                        backoff
                    );
                    sleep(backoff).await;
                    retries += 1;
                    continue;
                }
            };

            match response.status() {
                StatusCode::OK => {
                    return response
                        .bytes()
                        .await
                        .map(|b| b.to_vec())
                        .map_err(DownloadError::RequestError);
                }
                StatusCode::NOT_FOUND => {
                    return Err(DownloadError::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    if retries >= MAX_RETRIES {
                        return Err(DownloadError::RateLimitExceeded);
                    }
                    let retry_after = Self::calculate_backoff(retries);
                    sleep(retry_after).await;
                    retries += 1;
                    continue;
                }
                status => {
                    return Err(DownloadError::InvalidResponse(format!(
                        "Unexpected status code: {} for URL: {}",
                        status, url
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl EdgarTransport for EdgarClient {
    async fn post_search(&self, payload: &SearchRequest) -> Result<SearchResponse> {
        EdgarClient::post_search(self, payload).await
    }

    async fn get_document(&self, url: &str) -> Result<Vec<u8>> {
        self.get_bytes(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidatedRequest;

    fn payload() -> SearchRequest {
        let request = ValidatedRequest {
            filing_type: "10-K".to_string(),
            ticker_or_cik: "AAPL".to_string(),
            amount: 1,
            after_date: "2022-01-01".to_string(),
            before_date: "2023-01-01".to_string(),
            include_amends: false,
            query: String::new(),
        };
        SearchRequest::new(&request, 0)
    }

    #[test]
    fn test_calculate_backoff() {
        let backoff0 = EdgarClient::calculate_backoff(0);
        let backoff1 = EdgarClient::calculate_backoff(1);
        let backoff2 = EdgarClient::calculate_backoff(2);

        assert!(backoff0 < backoff1);
        assert!(backoff1 < backoff2);

        assert!(backoff0.as_millis() >= 800 && backoff0.as_millis() <= 1200);
        assert!(backoff1.as_millis() >= 1600 && backoff1.as_millis() <= 2400);
        assert!(backoff2.as_millis() >= 3200 && backoff2.as_millis() <= 4800);
    }

    #[test]
    fn search_error_body_reason_is_extracted() {
        let body = r#"{"error":{"root_cause":[{"type":"parse_exception","reason":"failed to parse date field"}]}}"#;
        let error = EdgarClient::search_api_error(StatusCode::BAD_REQUEST, body, &payload());

        match error {
            DownloadError::SearchApiError { reason, payload } => {
                assert_eq!(reason, "failed to parse date field");
                assert!(payload.contains("\"entityName\":\"AAPL\""));
            }
            other => panic!("expected SearchApiError, got {other:?}"),
        }
    }

    #[test]
    fn unstructured_error_body_falls_back_to_invalid_response() {
        let error =
            EdgarClient::search_api_error(StatusCode::BAD_GATEWAY, "<html>bad</html>", &payload());
        assert!(matches!(error, DownloadError::InvalidResponse(_)));
    }

    #[test]
    fn zero_rate_limit_is_a_config_error() {
        let mut config = DownloaderConfig::new("test_agent example@example.com");
        config.rate_limit = 0;
        assert!(matches!(
            EdgarClient::with_config(&config),
            Err(DownloadError::ConfigError(_))
        ));
    }
}
