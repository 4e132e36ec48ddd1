//! Settings surface state machine
//!
//! `Closed -> (open: load once) -> Open(editing) -> save/cancel -> Closed`.
//! Form state lives only while the surface is open; every open re-loads
//! authoritative state from the backend, and a cancel discards edits
//! without any network call. There is no intermediate "saving" state: a
//! successful save closes the surface immediately, and the next open
//! re-reads whatever the backend actually stored.
//!
//! Secret fields enforce the sentinel-omission invariant: a field the
//! operator never touched is omitted from the update payload, so the
//! display mask can never overwrite a stored secret.

use crate::client::BackendClient;
use crate::error::{DeckError, Result};
use crate::types::{SecretState, SettingsSnapshot, SettingsUpdate, MASKED_SENTINEL};
use secrecy::SecretString;
use tracing::{debug, warn};

/// Increment used by the weight control. The protocol itself transmits
/// any in-range value; only the control snaps.
pub const WEIGHT_STEP: f64 = 0.05;

/// One secret-bearing form field.
///
/// Tracks whether the operator edited the field at all, which is what
/// decides between omit / clear / replace on save.
#[derive(Debug, Clone, Default)]
pub struct SecretField {
    /// Whether the backend reported a stored secret at load time.
    present_on_load: bool,
    /// Becomes true on the first keystroke into the field.
    edited: bool,
    /// Plaintext being typed. Converted to a [`SecretString`] when the
    /// payload is built; only lives as long as the form.
    buffer: String,
}

impl SecretField {
    /// Decode the masked wire form. Any non-empty value (normally the
    /// `"***"` sentinel) means a secret exists server-side; `null` or
    /// empty means none is set. Both start out `Unchanged`.
    pub fn from_masked(wire: Option<&str>) -> Self {
        Self {
            present_on_load: wire.is_some_and(|s| !s.is_empty()),
            edited: false,
            buffer: String::new(),
        }
    }

    /// Append a typed character. The first keystroke discards the mask
    /// and starts a replacement value.
    pub fn push(&mut self, c: char) {
        self.edited = true;
        self.buffer.push(c);
    }

    /// Delete the last typed character. Backspace on an untouched masked
    /// field counts as an edit: it empties the field, i.e. a clear.
    pub fn pop(&mut self) {
        self.edited = true;
        self.buffer.pop();
    }

    /// Empty the field in one go.
    pub fn clear(&mut self) {
        self.edited = true;
        self.buffer.clear();
    }

    /// Tagged edit state, derived from what the operator did.
    ///
    /// An emptied field only counts as `Cleared` when a secret existed at
    /// load time; emptying a field that was already empty stays
    /// `Unchanged`, so it is omitted rather than sent as a clear.
    pub fn state(&self) -> SecretState {
        if !self.edited {
            return SecretState::Unchanged;
        }
        if self.buffer.is_empty() {
            if self.present_on_load {
                SecretState::Cleared
            } else {
                SecretState::Unchanged
            }
        } else {
            SecretState::Set(SecretString::from(self.buffer.clone()))
        }
    }

    /// Masked text for rendering: the sentinel while an unseen secret is
    /// untouched, one bullet per typed character otherwise.
    pub fn display(&self) -> String {
        if !self.edited {
            if self.present_on_load {
                MASKED_SENTINEL.to_string()
            } else {
                String::new()
            }
        } else {
            "\u{2022}".repeat(self.buffer.chars().count())
        }
    }
}

/// Editable copy of the backend settings, alive only while the surface
/// is open.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub llm_url: String,
    pub llm_api_key: SecretField,
    pub finnhub_api_key: SecretField,
    router_quality_weight: f64,
}

impl SettingsForm {
    /// Populate the form from a freshly loaded snapshot.
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        Self {
            llm_url: snapshot.llm_url.clone(),
            llm_api_key: SecretField::from_masked(snapshot.llm_api_key.as_deref()),
            finnhub_api_key: SecretField::from_masked(snapshot.finnhub_api_key.as_deref()),
            router_quality_weight: snapshot.router_quality_weight.clamp(0.0, 1.0),
        }
    }

    pub fn weight(&self) -> f64 {
        self.router_quality_weight
    }

    /// Set the weight directly, clamped into `[0, 1]`.
    pub fn set_weight(&mut self, value: f64) {
        self.router_quality_weight = value.clamp(0.0, 1.0);
    }

    /// Move the weight by whole control steps, snapping to two decimals
    /// so repeated stepping does not accumulate float drift.
    pub fn step_weight(&mut self, steps: i32) {
        let raw = self.router_quality_weight + f64::from(steps) * WEIGHT_STEP;
        self.set_weight((raw * 100.0).round() / 100.0);
    }

    /// Build the update payload. URL and weight are always included;
    /// each secret per its edit state.
    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            llm_url: self.llm_url.clone(),
            llm_api_key: self.llm_api_key.state().to_wire(),
            finnhub_api_key: self.finnhub_api_key.state().to_wire(),
            router_quality_weight: self.router_quality_weight,
        }
    }
}

/// The settings surface. Holds form state only while open.
#[derive(Debug, Default)]
pub struct SettingsSession {
    form: Option<SettingsForm>,
    /// Most recent load/save failure, kept for display until the next
    /// successful transition.
    last_error: Option<String>,
}

impl SettingsSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form(&self) -> Option<&SettingsForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut SettingsForm> {
        self.form.as_mut()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Transition closed -> open, loading settings exactly once.
    ///
    /// Calling `open` on an already-open session is a no-op: loads happen
    /// per open transition, never per render. A failed load leaves the
    /// session closed with the error recorded, rather than opening an
    /// empty form over unknown backend state.
    pub async fn open(&mut self, client: &BackendClient) {
        if self.is_open() {
            debug!("settings surface already open, not re-loading");
            return;
        }
        match client.fetch_settings().await {
            Ok(snapshot) => {
                self.form = Some(SettingsForm::from_snapshot(&snapshot));
                self.last_error = None;
            }
            Err(err) => {
                warn!("settings load failed, surface stays closed: {}", err);
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Discard edits and close. Never touches the network.
    pub fn cancel(&mut self) {
        if self.form.take().is_some() {
            debug!("settings surface dismissed, edits discarded");
        }
    }

    /// Save the edited form and close on success. A failed save keeps the
    /// surface open with the form intact so the operator can retry or
    /// cancel. No re-fetch follows a save; the next open re-loads.
    pub async fn save(&mut self, client: &BackendClient) -> Result<()> {
        let form = self.form.as_ref().ok_or_else(|| {
            DeckError::InvalidOperation("cannot save settings: surface not open".to_string())
        })?;
        let update = form.to_update();
        match client.save_settings(&update).await {
            Ok(()) => {
                debug!("settings saved, closing surface");
                self.form = None;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!("settings save failed, surface stays open: {}", err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
