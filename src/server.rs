//! JSON HTTP server.
//!
//! Serves the record search, chat, and dashboard endpoints backing the
//! web front-end.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/api/agencies` | Facet list (`All` first) |
//! | `POST` | `/api/search` | Filter and rank records |
//! | `GET`  | `/api/records/{id}` | One record by ID |
//! | `POST` | `/api/chat` | One chat exchange; session state in, session state out |
//! | `GET`  | `/api/stats` | Dashboard summary |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "message must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # Chat sessions
//!
//! The server keeps no chat state. A client starts a conversation by
//! posting a message without `session`; the response carries the new
//! session, which the client sends back with its next message.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use ecfr_explorer_core::classify::Classifier;
use ecfr_explorer_core::models::{ChatMessage, Facet, Record};
use ecfr_explorer_core::session::ChatSession;

use crate::catalog::{load_catalog, Catalog};
use crate::classifier::create_classifier;
use crate::config::Config;
use crate::search::{search_records, SearchResponse};
use crate::stats::{build_report, StatsReport};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    classifier: Arc<dyn Classifier>,
}

/// Starts the HTTP server on `[server].bind`.
///
/// Loads the record table and builds the classifier before binding, so
/// configuration errors surface immediately. Runs until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let classifier = create_classifier(&config.chat)?;

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        classifier,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/agencies", get(handle_agencies))
        .route("/api/search", post(handle_search))
        .route("/api/records/{id}", get(handle_get_record))
        .route("/api/chat", post(handle_chat))
        .route("/api/stats", get(handle_stats))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");
    println!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        } else {
            tracing::debug!(code = %self.code, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Error message prefixes that mean the client sent something unusable.
const CLIENT_ERROR_PREFIXES: &[&str] = &[
    "invalid agency",
    "invalid session",
    "message must not be empty",
];

/// Maps domain errors onto HTTP statuses by message: unknown records are
/// 404, rejected input is 400, anything else is 500.
fn classify_error(err: anyhow::Error) -> AppError {
    let msg = err.to_string();

    if msg.starts_with("record not found") {
        not_found(msg)
    } else if CLIENT_ERROR_PREFIXES.iter().any(|p| msg.starts_with(p)) {
        bad_request(msg)
    } else {
        internal(msg)
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    records: usize,
    classifier: String,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.catalog.records().len(),
        classifier: state.classifier.name().to_string(),
    })
}

// ============ GET /api/agencies ============

#[derive(Serialize)]
struct AgenciesResponse {
    agencies: Vec<Facet>,
}

async fn handle_agencies(State(state): State<AppState>) -> Json<AgenciesResponse> {
    Json(AgenciesResponse {
        agencies: state.catalog.facets().to_vec(),
    })
}

// ============ POST /api/search ============

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    agency: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = search_records(
        &state.config,
        &state.catalog,
        &req.query,
        req.agency.as_deref(),
        req.limit,
    )
    .map_err(classify_error)?;
    Ok(Json(response))
}

// ============ GET /api/records/{id} ============

async fn handle_get_record(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Record>, AppError> {
    let record = state.catalog.get(id).map_err(classify_error)?;
    Ok(Json(record.clone()))
}

// ============ POST /api/chat ============

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    /// Overrides the session's facet when present.
    #[serde(default)]
    agency: Option<String>,
    #[serde(default)]
    session: Option<ChatSession>,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: ChatMessage,
    session: ChatSession,
}

async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let mut session = match req.session {
        Some(session) => {
            session.validate().map_err(classify_error)?;
            session
        }
        None => ChatSession::new(Facet::All),
    };

    // The request's agency wins; otherwise the session's stored facet must
    // still name an agency in this table.
    let agency = match req.agency {
        Some(agency) => agency,
        None => session.facet().to_string(),
    };
    let facet = state
        .catalog
        .resolve_facet(Some(&agency))
        .map_err(classify_error)?;
    session.set_facet(facet);

    let reply = session
        .send(state.classifier.as_ref(), &req.message)
        .await
        .map_err(classify_error)?
        .clone();

    tracing::debug!(session = %session.id, reply_id = reply.id, "chat exchange");
    Ok(Json(ChatResponse { reply, session }))
}

// ============ GET /api/stats ============

async fn handle_stats(State(state): State<AppState>) -> Json<StatsReport> {
    Json(build_report(&state.catalog))
}
