use super::types::{
    ArticleDetail, ArticleSummary, ArticlesEnvelope, CategoriesEnvelope, Category, DetailEnvelope,
};
use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Public instance of the news API.
pub const DEFAULT_BASE_URL: &str = "https://news-api-fs.vercel.app";

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Follow at most 3 redirects and refuse loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Client for the three read-only endpoints of the news API.
///
/// Every call is a single attempt: there is no retry loop. Cloning is cheap
/// (the inner `reqwest::Client` is reference counted), so background tasks
/// take their own copy.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl NewsClient {
    /// Build a client for `base_url` with the given per-request timeout.
    ///
    /// The base URL must be an absolute `http` or `https` URL. A path prefix
    /// (e.g. `https://host/v1`) is kept and the endpoint paths are appended to it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                tracing::warn!(base_url = %parsed, "Using non-HTTPS news API base URL");
            }
            other => {
                return Err(ApiError::InvalidBaseUrl(format!(
                    "unsupported scheme '{}'",
                    other
                )));
            }
        }
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: parsed,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/categories`
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: CategoriesEnvelope = self.get_json(&["api", "categories"]).await?;
        Ok(envelope.categories)
    }

    /// `GET /api/categories/{id}`
    pub async fn fetch_articles(&self, category_id: &str) -> Result<Vec<ArticleSummary>, ApiError> {
        let envelope: ArticlesEnvelope = self
            .get_json(&["api", "categories", category_id])
            .await?;
        Ok(envelope.articles)
    }

    /// `GET /api/news/{id}`
    pub async fn fetch_article_detail(&self, article_id: &str) -> Result<ArticleDetail, ApiError> {
        let envelope: DetailEnvelope = self.get_json(&["api", "news", article_id]).await?;
        Ok(envelope.article)
    }

    /// Resolve endpoint path segments against the base URL.
    ///
    /// Segments are percent-encoded, so an id containing `/` or `?` stays a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let timeout_secs = self.timeout.as_secs();
        tracing::debug!(url = %url, "Sending news API request");

        let response = tokio::time::timeout(self.timeout, self.http.get(url.clone()).send())
            .await
            .map_err(|_| ApiError::Timeout(timeout_secs))?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            tracing::debug!(url = %url, status = response.status().as_u16(), "News API returned error status");
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }

        let body = tokio::time::timeout(self.timeout, read_limited_text(response, MAX_RESPONSE_SIZE))
            .await
            .map_err(|_| ApiError::Timeout(timeout_secs))??;

        Ok(serde_json::from_str(&body)?)
    }
}

/// Read a response body as text, refusing bodies larger than `limit` bytes.
async fn read_limited_text(response: reqwest::Response, limit: usize) -> Result<String, ApiError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| ApiError::InvalidUtf8)
}
