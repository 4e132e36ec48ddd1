//! Status synchronization between the console and the backend
//!
//! The backend owns the truth about both loops. The console keeps a cached
//! [`ProcessStatus`] that is replaced wholesale by every successful read.
//! Toggles are backend-driven: a mutation never flips the cache directly,
//! it requests the transition and reconciles with a fresh read sequenced
//! strictly after the backend's acknowledgment.
//!
//! Failures never propagate out of this module: reads and mutations are
//! operator telemetry, so a failure retains the last known state, logs,
//! and records the error for the status indicator to surface.

use crate::client::BackendClient;
use crate::error::{DeckError, Result};
use crate::types::ProcessStatus;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Whether the cached status mirrors the last backend read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// No successful read yet, or the last read failed / decoded badly.
    /// The cached flags are the last known good values, not current truth.
    #[default]
    Stale,
    /// The last read succeeded; the cache mirrors backend truth.
    Live,
}

/// Point-in-time view of the synchronized status.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    pub status: ProcessStatus,
    pub freshness: Freshness,
    /// Most recent failure, kept until the next successful read.
    pub last_error: Option<String>,
}

/// Keeps the displayed toggle state consistent with backend truth.
pub struct StatusSync {
    client: BackendClient,
    cache: RwLock<StatusSnapshot>,
    /// Single-flight gate: at most one in-flight status mutation at a
    /// time; later callers queue behind it.
    mutation_gate: Mutex<()>,
}

impl StatusSync {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            cache: RwLock::new(StatusSnapshot::default()),
            mutation_gate: Mutex::new(()),
        }
    }

    /// Current cached view. Cheap; never touches the network.
    pub async fn snapshot(&self) -> StatusSnapshot {
        self.cache.read().await.clone()
    }

    /// Read current status from the backend and replace the cache.
    ///
    /// A malformed body marks the cache stale without adopting partial
    /// data; transport failures retain the previous flags. Neither is
    /// fatal.
    pub async fn refresh(&self) {
        match self.client.fetch_status().await {
            Ok(status) => {
                let mut cache = self.cache.write().await;
                cache.status = status;
                cache.freshness = Freshness::Live;
                cache.last_error = None;
            }
            Err(err) => {
                match &err {
                    DeckError::MalformedResponse { .. } => {
                        warn!("status response malformed, marking stale: {}", err)
                    }
                    _ => warn!("status fetch failed, keeping last known state: {}", err),
                }
                let mut cache = self.cache.write().await;
                cache.freshness = Freshness::Stale;
                cache.last_error = Some(err.to_string());
            }
        }
    }

    /// Request a polling transition, then reconcile.
    pub async fn set_polling(&self, run: bool) {
        let _flight = self.mutation_gate.lock().await;
        debug!(run, "requesting polling transition");
        self.reconcile("toggle polling", self.client.set_polling(run).await)
            .await;
    }

    /// Request a classifying transition, then reconcile. Independent of
    /// the polling flag.
    pub async fn set_classifying(&self, run: bool) {
        let _flight = self.mutation_gate.lock().await;
        debug!(run, "requesting classifying transition");
        self.reconcile(
            "toggle classifying",
            self.client.set_classifying(run).await,
        )
        .await;
    }

    /// Request the backend discard all computed classifications, then
    /// reconcile. Resetting twice has the same effect as once.
    pub async fn reset_classifications(&self) {
        let _flight = self.mutation_gate.lock().await;
        debug!("requesting classification reset");
        self.reconcile(
            "reset classifications",
            self.client.reset_classifications().await,
        )
        .await;
    }

    /// On acknowledgment, re-fetch so the displayed state comes from a
    /// fresh read; on failure, leave the cache in its pre-action state
    /// and record the error.
    async fn reconcile(&self, action: &str, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.refresh().await,
            Err(err) => {
                warn!("{} failed, status unchanged: {}", action, err);
                let mut cache = self.cache.write().await;
                cache.last_error = Some(format!("{}: {}", action, err));
            }
        }
    }
}
