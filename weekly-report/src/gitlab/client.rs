//! HTTP implementation of [`GitLabApi`].

use super::error::UpstreamError;
use super::models::{Issue, MergeRequest, Project};
use super::query::{IssueQuery, MergeRequestQuery, ProjectQuery};
use super::GitLabApi;
use crate::rate_limit;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Results per page requested from list endpoints.
const RESULTS_PER_PAGE: u32 = 100;

/// Upper bound on pages fetched for a single listing.
const MAX_PAGES: u32 = 50;

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Authenticated GitLab REST v4 client.
///
/// Built once per run and shared read-only by every pipeline stage.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    api_base: Url,
}

impl GitLabClient {
    /// Creates a client for the instance at `base_url` using a personal
    /// access token.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the URL is invalid, the token is not a
    /// valid header value, or the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self, UpstreamError> {
        let api_base = api_base_url(base_url)?;

        let mut token_value =
            HeaderValue::from_str(token).map_err(|_| UpstreamError::InvalidToken)?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("PRIVATE-TOKEN", token_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { http, api_base })
    }

    /// Fetches every page of a list endpoint.
    async fn get_all<T, Q>(&self, endpoint: &str, query: &Q) -> Result<Vec<T>, UpstreamError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self
            .api_base
            .join(endpoint)
            .map_err(|source| UpstreamError::InvalidUrl {
                url: self.api_base.to_string(),
                source,
            })?;

        let mut items = Vec::new();
        let mut page = 1;

        loop {
            debug!(endpoint, page, "Requesting page");

            let response = self
                .http
                .get(url.clone())
                .query(query)
                .query(&[("per_page", RESULTS_PER_PAGE), ("page", page)])
                .send()
                .await
                .map_err(|source| UpstreamError::Transport {
                    endpoint: endpoint.to_string(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(UpstreamError::Status {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    body,
                });
            }

            let next_page = next_page(response.headers());
            let rate_limit = rate_limit::from_headers(response.headers());

            let bytes = response
                .bytes()
                .await
                .map_err(|source| UpstreamError::Transport {
                    endpoint: endpoint.to_string(),
                    source,
                })?;
            let batch: Vec<T> =
                serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode {
                    endpoint: endpoint.to_string(),
                    source,
                })?;
            items.extend(batch);

            match next_page {
                Some(next) if page < MAX_PAGES => {
                    if let Some(info) = rate_limit {
                        rate_limit::wait_if_needed(&info).await;
                    }
                    page = next;
                }
                Some(_) => {
                    warn!(endpoint, max_pages = MAX_PAGES, "Reached maximum page limit");
                    break;
                }
                None => break,
            }
        }

        Ok(items)
    }
}

impl GitLabApi for GitLabClient {
    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>, UpstreamError> {
        self.get_all("issues", query).await
    }

    async fn list_merge_requests(
        &self,
        query: &MergeRequestQuery,
    ) -> Result<Vec<MergeRequest>, UpstreamError> {
        self.get_all("merge_requests", query).await
    }

    async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, UpstreamError> {
        self.get_all("projects", query).await
    }
}

/// Builds `<base>/api/v4/`, tolerating a trailing slash on the base URL.
fn api_base_url(base_url: &str) -> Result<Url, UpstreamError> {
    let normalized = format!("{}/api/v4/", base_url.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|source| UpstreamError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Reads GitLab's `X-Next-Page` header; empty on the last page.
fn next_page(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("x-next-page")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
