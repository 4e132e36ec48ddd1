//! Newsdeck - Operator console for an article ingestion/classification service
//!
//! A terminal control panel for a backend that polls news articles from
//! Finnhub and classifies them with an LLM. The console provides:
//! - Toggle control over the two independent backend loops (polling,
//!   classifying) with backend-driven reconciliation after every action
//! - A destructive, idempotent classification reset
//! - A settings surface for the LLM endpoint, two secret API keys, and
//!   the router quality weight, with sentinel-safe secret handling
//! - A read-only view of recently ingested articles
//!
//! # Architecture
//!
//! The library holds the protocol core; presentation lives in the
//! `newsdeck-dash` binary:
//! - **Types**: wire structures and the tagged secret representation
//! - **Client**: one async method per backend endpoint
//! - **Status**: cached toggle state with single-flight mutations and
//!   mutate-then-reconcile ordering
//! - **Settings**: the closed/open/save session state machine
//!
//! # Example
//!
//! ```ignore
//! use newsdeck::{BackendClient, StatusSync};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BackendClient::new("http://localhost:8000")?;
//!     let sync = StatusSync::new(client);
//!
//!     sync.refresh().await;
//!     sync.set_polling(true).await;
//!     let snapshot = sync.snapshot().await;
//!     println!("polling: {}", snapshot.status.is_polling);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod settings;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use client::BackendClient;
pub use config::ConsoleConfig;
pub use error::{DeckError, Result};
pub use settings::{SecretField, SettingsForm, SettingsSession, WEIGHT_STEP};
pub use status::{Freshness, StatusSnapshot, StatusSync};
pub use types::{
    ArticleFilter, ArticleSummary, ClassifiedCounts, ProcessStatus, SecretState, SettingsSnapshot,
    SettingsUpdate, MASKED_SENTINEL,
};
