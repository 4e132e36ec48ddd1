//! HTTP client for the ingestion backend
//!
//! One method per backend endpoint. Mutating actions use POST; reads are
//! GET. Non-success status codes map to [`DeckError::Backend`], bodies
//! that fail to decode to [`DeckError::MalformedResponse`] so callers can
//! tell "backend said no" apart from "backend said something unintelligible".

use crate::error::{DeckError, Result};
use crate::types::{
    ArticleFilter, ArticleSummary, ArticlesResponse, ClassifiedCounts, ProcessStatus,
    SettingsSnapshot, SettingsUpdate,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default request timeout. Timeout policy lives here in the transport
/// layer, not in the protocol logic.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the article ingestion/classification backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Backend base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Backend {
                endpoint: path.to_string(),
                status,
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| DeckError::MalformedResponse {
            endpoint: path.to_string(),
            detail: e.to_string(),
        })
    }

    /// POST to an action endpoint, ignoring the response body.
    ///
    /// The bodies of action responses are advisory; authoritative state
    /// comes from the reconciling status read that follows.
    async fn post_action(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self.http.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Backend {
                endpoint: path.to_string(),
                status,
            });
        }
        Ok(())
    }

    /// Read the run/stop state of both backend loops.
    pub async fn fetch_status(&self) -> Result<ProcessStatus> {
        self.get_json("/polling_status").await
    }

    /// Request the polling loop start or stop.
    pub async fn set_polling(&self, run: bool) -> Result<()> {
        self.post_action(if run { "/start_polling" } else { "/stop_polling" })
            .await
    }

    /// Request the classifying loop start or stop.
    pub async fn set_classifying(&self, run: bool) -> Result<()> {
        self.post_action(if run {
            "/start_classifying"
        } else {
            "/stop_classifying"
        })
        .await
    }

    /// Request the backend discard all computed classifications.
    /// Idempotent server-side.
    pub async fn reset_classifications(&self) -> Result<()> {
        self.post_action("/reset_classifications").await
    }

    /// Read the current settings (secrets masked).
    pub async fn fetch_settings(&self) -> Result<SettingsSnapshot> {
        self.get_json("/settings").await
    }

    /// Write an update payload. Omitted secret keys leave stored secrets
    /// untouched.
    pub async fn save_settings(&self, update: &SettingsUpdate) -> Result<()> {
        let url = format!("{}/settings", self.base_url);
        debug!(%url, "POST");
        let response = self.http.post(&url).json(update).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Backend {
                endpoint: "/settings".to_string(),
                status,
            });
        }
        Ok(())
    }

    /// List recent articles, optionally filtered by classification state.
    pub async fn fetch_articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleSummary>> {
        let path = format!("/articles?classified={}", filter.query_value());
        let response: ArticlesResponse = self.get_json(&path).await?;
        Ok(response.articles)
    }

    /// Read the unclassified backlog count.
    pub async fn classification_counts(&self) -> Result<ClassifiedCounts> {
        self.get_json("/classified_articles").await
    }
}
