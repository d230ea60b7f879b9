//! HTTP client for the dashboard backend REST API.
//!
//! Wraps `reqwest` with typed response deserialization and the endpoint
//! layout the backend serves under `/api`. All responses are plain JSON with
//! no envelope; a non-2xx status is surfaced as [`ApiError::Http`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use storywatch_core::{AppConfig, ScrapeOutcome, SourceInfo, Story};

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Parameters for the general story query (`GET /api/stories`).
///
/// Unset fields are omitted from the query string, leaving the backend's own
/// defaults in charge. Field names follow the wire parameters.
#[derive(Debug, Clone, Default)]
pub struct StoryQuery {
    pub limit: Option<u32>,
    pub min_score: Option<f64>,
    pub platform: Option<String>,
    pub hours_back: Option<u32>,
    pub is_kenyan: Option<bool>,
}

/// Health payload returned by `GET /api/health`.
///
/// Reachability is what matters; the body is informational.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub auto_scraping: bool,
}

/// Client for the dashboard backend REST API.
///
/// Use [`DashboardClient::from_config`] in production or
/// [`DashboardClient::with_base_url`] to point at a mock server in tests.
pub struct DashboardClient {
    client: Client,
    base_url: Url,
}

impl DashboardClient {
    /// Creates a new client pointed at the local development backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ApiError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::BaseUrl`] if the configured URL is
    /// invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.request_timeout_secs, &config.api_url)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::BaseUrl`] if `base_url` is not a valid
    /// URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storywatch/0.1 (dashboard-client)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // endpoint paths append to it rather than replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Probes `GET /api/health` and reports whether the backend answered
    /// with a 2xx status.
    ///
    /// Transport errors and non-2xx statuses both report `false`; this never
    /// fails.
    pub async fn is_healthy(&self) -> bool {
        let url = self.build_url(&["api", "health"], &[]);
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health probe failed");
                false
            }
        }
    }

    /// Fetches the full health payload.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.build_url(&["api", "health"], &[]);
        self.send_json(self.client.get(url), "health").await
    }

    /// Fetches stories from the general query endpoint.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn stories(&self, query: &StoryQuery) -> Result<Vec<Story>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(min_score) = query.min_score {
            params.push(("min_score", min_score.to_string()));
        }
        if let Some(platform) = &query.platform {
            params.push(("platform", platform.clone()));
        }
        if let Some(hours_back) = query.hours_back {
            params.push(("hours_back", hours_back.to_string()));
        }
        if let Some(is_kenyan) = query.is_kenyan {
            params.push(("is_kenyan", is_kenyan.to_string()));
        }

        let borrowed: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.build_url(&["api", "stories"], &borrowed);
        self.send_json(self.client.get(url), "stories").await
    }

    /// Fetches the hot/emerging story set.
    ///
    /// The region flag is only sent when set, matching how the general query
    /// treats it.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn hot_stories(&self, kenyan_only: bool, limit: u32) -> Result<Vec<Story>, ApiError> {
        let limit = limit.to_string();
        let mut params: Vec<(&str, &str)> = vec![("limit", &limit)];
        if kenyan_only {
            params.push(("is_kenyan", "true"));
        }

        let url = self.build_url(&["api", "stories", "hot"], &params);
        self.send_json(self.client.get(url), "hot_stories").await
    }

    /// Fetches a single story by its identifier.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status
    ///   (including 404 for an unknown id).
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn story(&self, id: &str) -> Result<Story, ApiError> {
        let url = self.build_url(&["api", "stories", id], &[]);
        self.send_json(self.client.get(url), &format!("story(id={id})"))
            .await
    }

    /// Lists monitored sources, optionally filtered by region.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn sources(&self, is_kenyan: Option<bool>) -> Result<Vec<SourceInfo>, ApiError> {
        let filter;
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(is_kenyan) = is_kenyan {
            filter = is_kenyan.to_string();
            params.push(("is_kenyan", &filter));
        }

        let url = self.build_url(&["api", "sources"], &params);
        self.send_json(self.client.get(url), "sources").await
    }

    /// Triggers a server-side scrape of one source and returns its outcome
    /// counts.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn trigger_scrape(&self, source_id: i64) -> Result<ScrapeOutcome, ApiError> {
        let url = self.build_url(&["api", "scrape", &source_id.to_string()], &[]);
        self.send_json(
            self.client.post(url),
            &format!("scrape(source_id={source_id})"),
        )
        .await
    }

    /// Builds the full request URL from path segments and query parameters.
    ///
    /// Clones the stored base URL, appends each segment percent-encoded via
    /// [`Url::path_segments_mut`], then appends query pairs via
    /// [`Url::query_pairs_mut`] so all values are safely encoded.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // An http(s) base URL always has path segments, so the Err arm is
        // unreachable; if-let keeps this infallible without a panic path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a prepared request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON into `T`.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DashboardClient {
        DashboardClient::with_base_url(30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_path_segments() {
        let client = test_client("http://localhost:8000");
        let url = client.build_url(&["api", "stories"], &[]);
        assert_eq!(url.as_str(), "http://localhost:8000/api/stories");
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("http://localhost:8000/");
        let url = client.build_url(&["api", "health"], &[]);
        assert_eq!(url.as_str(), "http://localhost:8000/api/health");
    }

    #[test]
    fn build_url_keeps_a_path_prefix() {
        let client = test_client("http://localhost:8000/dash");
        let url = client.build_url(&["api", "stories"], &[]);
        assert_eq!(url.as_str(), "http://localhost:8000/dash/api/stories");
    }

    #[test]
    fn build_url_appends_query_pairs() {
        let client = test_client("http://localhost:8000");
        let url = client.build_url(
            &["api", "stories"],
            &[("limit", "50"), ("platform", "TikTok")],
        );
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/stories?limit=50&platform=TikTok"
        );
    }

    #[test]
    fn build_url_encodes_story_id_segments() {
        let client = test_client("http://localhost:8000");
        let url = client.build_url(&["api", "stories", "id with spaces"], &[]);
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/stories/id%20with%20spaces"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = DashboardClient::with_base_url(30, "not a url");
        assert!(matches!(result, Err(ApiError::BaseUrl { .. })));
    }
}
