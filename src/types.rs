//! Wire types shared between the console and the ingestion backend
//!
//! Field names follow the backend's JSON contract: snake_case for the
//! status endpoint, camelCase for settings.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Placeholder the backend returns in place of a stored secret.
pub const MASKED_SENTINEL: &str = "***";

/// Run/stop state of the two backend loops.
///
/// The backend owns the truth; the console only ever holds a cached copy
/// that is replaced wholesale by a successful read, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub is_polling: bool,
    pub is_classifying: bool,
}

/// Settings as reported by `GET /settings`.
///
/// Secrets arrive masked: [`MASKED_SENTINEL`] when a secret exists
/// server-side, `null` or empty when none is set. Plaintext secrets never
/// travel in this direction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub llm_url: String,
    #[serde(default)]
    pub llm_api_key: Option<String>,
    #[serde(default)]
    pub finnhub_api_key: Option<String>,
    #[serde(default)]
    pub router_quality_weight: f64,
}

/// Update payload for `POST /settings`.
///
/// A secret field set to `None` is omitted from the serialized body
/// entirely, which the backend reads as "leave the stored secret
/// unchanged". Only [`SecretState::Cleared`] and [`SecretState::Set`]
/// produce a key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub llm_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finnhub_api_key: Option<String>,
    pub router_quality_weight: f64,
}

/// Edit state of a secret-bearing settings field.
///
/// Replaces the string-sentinel convention with a tagged representation;
/// the `"***"` mask exists only at the wire boundary when decoding
/// backend responses.
#[derive(Debug, Default)]
pub enum SecretState {
    /// Field untouched by the operator; omitted on save.
    #[default]
    Unchanged,
    /// Operator emptied a previously set secret; sent as `""` so the
    /// backend discards the stored value.
    Cleared,
    /// Operator typed a replacement; sent verbatim.
    Set(SecretString),
}

impl SecretState {
    /// Serialize for the update payload. `None` means "omit the key".
    pub fn to_wire(&self) -> Option<String> {
        match self {
            SecretState::Unchanged => None,
            SecretState::Cleared => Some(String::new()),
            SecretState::Set(value) => Some(value.expose_secret().to_owned()),
        }
    }
}

/// Filter for the article listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleFilter {
    #[default]
    All,
    Classified,
    Unclassified,
}

impl ArticleFilter {
    /// Value of the `classified` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            ArticleFilter::All => "all",
            ArticleFilter::Classified => "true",
            ArticleFilter::Unclassified => "false",
        }
    }

    /// Next filter in display order (all -> classified -> unclassified).
    pub fn next(&self) -> Self {
        match self {
            ArticleFilter::All => ArticleFilter::Classified,
            ArticleFilter::Classified => ArticleFilter::Unclassified,
            ArticleFilter::Unclassified => ArticleFilter::All,
        }
    }

    /// Human-readable label for panel titles.
    pub fn label(&self) -> &'static str {
        match self {
            ArticleFilter::All => "all",
            ArticleFilter::Classified => "classified",
            ArticleFilter::Unclassified => "unclassified",
        }
    }
}

/// One row from `GET /articles`.
///
/// Classification fields stay `null` until the classifying loop has
/// processed the article.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSummary {
    pub id: i64,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub industry_category: Option<String>,
    #[serde(default)]
    pub classification_model: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Envelope for the article listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleSummary>,
}

/// Backlog counters from `GET /classified_articles`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ClassifiedCounts {
    #[serde(default)]
    pub unclassified_count: u64,
}
