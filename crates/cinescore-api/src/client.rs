//! `CinescoreClient` - cinescore REST API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::api::CinescoreApi;
use crate::types::{MovieDetails, MovieList, PeopleList, PersonDetails};

/// Default base URL of a locally running cinescore backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cinescore REST API client.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CinescoreClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
}

/// Builder for `CinescoreClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CinescoreClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CinescoreClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (config, or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CinescoreClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(CinescoreClient {
            http_client,
            base_url: with_trailing_slash(base_url),
        })
    }
}

/// Ensures `Url::join` appends to the base path instead of replacing
/// its last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl CinescoreClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CinescoreClientBuilder {
        CinescoreClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// Any non-success status is a generic failure; nothing is retried.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut request = self.http_client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let request = request
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(url = %request.url(), "cinescore API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("cinescore API error (HTTP {status}): {path}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl CinescoreApi for CinescoreClient {
    #[instrument(skip_all)]
    async fn trending_movies(&self) -> Result<MovieList> {
        self.get_json("api/v1/discover/trending", &[]).await
    }

    #[instrument(skip_all)]
    async fn now_playing_movies(&self) -> Result<MovieList> {
        self.get_json("api/v1/discover/now_playing", &[]).await
    }

    #[instrument(skip_all)]
    async fn upcoming_movies(&self) -> Result<MovieList> {
        self.get_json("api/v1/discover/upcoming", &[]).await
    }

    #[instrument(skip_all)]
    async fn trending_people(&self) -> Result<PeopleList> {
        self.get_json("api/v1/discover/trending_people", &[]).await
    }

    #[instrument(skip_all, fields(movie_id))]
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let path = format!("api/v1/movies/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(person_id))]
    async fn person_details(&self, person_id: u64) -> Result<PersonDetails> {
        let path = format!("api/v1/people/{person_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str) -> Result<MovieList> {
        let query = [("query", String::from(query))];
        self.get_json("api/v1/search/movies", &query).await
    }

    #[instrument(skip_all)]
    async fn search_people(&self, query: &str) -> Result<PeopleList> {
        let query = [("query", String::from(query))];
        self.get_json("api/v1/search/people", &query).await
    }
}
