//! In-process mock of the ingestion backend
//!
//! Reproduces the backend's HTTP contract (status, loop actions, reset,
//! settings, articles) over an ephemeral port, with switches for rejected
//! mutations and malformed status bodies, and a recording of every raw
//! settings payload it receives.

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Mutable backend state, inspectable from tests.
#[derive(Debug, Clone)]
pub struct BackendState {
    pub is_polling: bool,
    pub is_classifying: bool,
    pub llm_url: String,
    pub llm_api_key: String,
    pub finnhub_api_key: String,
    pub router_quality_weight: f64,
    pub articles: Vec<Value>,
    pub classified: usize,
    pub unclassified: usize,
    /// Raw bodies of every `POST /settings`, in arrival order.
    pub saved_payloads: Vec<Value>,
    /// Number of `GET /settings` requests served.
    pub settings_gets: usize,
    /// When set, every mutating endpoint answers 503.
    pub reject_mutations: bool,
    /// When set, `GET /polling_status` answers 200 with the wrong shape.
    pub malformed_status: bool,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            is_polling: false,
            is_classifying: false,
            llm_url: "https://api.openai.com/v1".to_string(),
            llm_api_key: String::new(),
            finnhub_api_key: String::new(),
            router_quality_weight: 0.5,
            articles: Vec::new(),
            classified: 0,
            unclassified: 0,
            saved_payloads: Vec::new(),
            settings_gets: 0,
            reject_mutations: false,
            malformed_status: false,
        }
    }
}

type Shared = Arc<Mutex<BackendState>>;

/// Handle to a spawned mock backend.
pub struct MockBackend {
    state: Shared,
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        Self::spawn_with(BackendState::default()).await
    }

    pub async fn spawn_with(initial: BackendState) -> Self {
        let state: Shared = Arc::new(Mutex::new(initial));
        let router = Router::new()
            .route("/polling_status", get(polling_status))
            .route("/start_polling", post(start_polling))
            .route("/stop_polling", post(stop_polling))
            .route("/start_classifying", post(start_classifying))
            .route("/stop_classifying", post(stop_classifying))
            .route("/reset_classifications", post(reset_classifications))
            .route("/settings", get(get_settings).post(update_settings))
            .route("/articles", get(articles))
            .route("/classified_articles", get(classified_articles))
            // Disable keep-alive so clients never pool connections; otherwise
            // `shutdown` (which only drops the listener) would leave pooled
            // connections serviceable and requests would keep succeeding.
            .layer(middleware::from_fn(close_connection))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { state, addr, server }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop serving; subsequent requests fail at the transport level.
    pub fn shutdown(&self) {
        self.server.abort();
    }

    pub fn state(&self) -> BackendState {
        self.state.lock().unwrap().clone()
    }

    pub fn mutate<F: FnOnce(&mut BackendState)>(&self, f: F) {
        f(&mut self.state.lock().unwrap());
    }
}

async fn close_connection(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    res
}

fn status_body(state: &BackendState) -> Value {
    json!({"is_polling": state.is_polling, "is_classifying": state.is_classifying})
}

fn masked(secret: &str) -> Value {
    if secret.is_empty() {
        Value::Null
    } else {
        Value::String("***".to_string())
    }
}

async fn polling_status(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if state.malformed_status {
        return Json(json!({"detail": "wrong shape"})).into_response();
    }
    Json(status_body(&state)).into_response()
}

fn toggle(state: &Shared, apply: impl FnOnce(&mut BackendState)) -> Response {
    let mut state = state.lock().unwrap();
    if state.reject_mutations {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    apply(&mut state);
    Json(status_body(&state)).into_response()
}

async fn start_polling(State(state): State<Shared>) -> Response {
    toggle(&state, |s| s.is_polling = true)
}

async fn stop_polling(State(state): State<Shared>) -> Response {
    toggle(&state, |s| s.is_polling = false)
}

async fn start_classifying(State(state): State<Shared>) -> Response {
    toggle(&state, |s| s.is_classifying = true)
}

async fn stop_classifying(State(state): State<Shared>) -> Response {
    toggle(&state, |s| s.is_classifying = false)
}

async fn reset_classifications(State(state): State<Shared>) -> Response {
    toggle(&state, |s| {
        s.unclassified += s.classified;
        s.classified = 0;
    })
}

async fn get_settings(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.settings_gets += 1;
    Json(json!({
        "llmUrl": state.llm_url,
        "llmApiKey": masked(&state.llm_api_key),
        "finnhubApiKey": masked(&state.finnhub_api_key),
        "routerQualityWeight": state.router_quality_weight,
    }))
    .into_response()
}

async fn update_settings(State(state): State<Shared>, Json(payload): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if state.reject_mutations {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    state.saved_payloads.push(payload.clone());

    // Present keys overwrite; absent keys leave stored values untouched.
    if let Some(url) = payload.get("llmUrl").and_then(Value::as_str) {
        state.llm_url = url.to_string();
    }
    if let Some(key) = payload.get("llmApiKey").and_then(Value::as_str) {
        state.llm_api_key = key.to_string();
    }
    if let Some(key) = payload.get("finnhubApiKey").and_then(Value::as_str) {
        state.finnhub_api_key = key.to_string();
    }
    if let Some(weight) = payload.get("routerQualityWeight").and_then(Value::as_f64) {
        state.router_quality_weight = weight;
    }
    Json(json!({"message": "Settings updated successfully"})).into_response()
}

async fn articles(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    let filter = params.get("classified").map(String::as_str).unwrap_or("all");
    let articles: Vec<Value> = state
        .articles
        .iter()
        .filter(|a| {
            let is_classified = !a["sentiment"].is_null();
            match filter {
                "true" => is_classified,
                "false" => !is_classified,
                _ => true,
            }
        })
        .cloned()
        .collect();
    Json(json!({"articles": articles})).into_response()
}

async fn classified_articles(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    Json(json!({
        "classified_articles": [],
        "unclassified_count": state.unclassified,
    }))
    .into_response()
}
