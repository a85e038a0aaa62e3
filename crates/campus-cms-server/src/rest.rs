//! HTTP JSON API for the college website.
//!
//! Each page endpoint returns the content a page needs, already composed
//! and with fallbacks applied. Lookups distinguish "not found" (404) from
//! "CMS unavailable" (503).

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use campus_cms::{ContactFields, ContentService, ProgramFilter, SearchScope, SubmitStatus};

use crate::pages;

/// State shared by every handler.
pub struct AppState {
    pub service: ContentService,
    /// CMS base URL, reported by `/health`.
    pub cms_url: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: ContentService, cms_url: impl Into<String>) -> Self {
        Self {
            service,
            cms_url: cms_url.into(),
            started_at: Instant::now(),
        }
    }
}

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/home", get(handle_home))
        .route("/api/v1/programs", get(handle_programs))
        .route("/api/v1/programs/:slug", get(handle_program))
        .route("/api/v1/student-life", get(handle_student_life))
        .route("/api/v1/admissions", get(handle_admissions))
        .route("/api/v1/contact", get(handle_contact).post(handle_submit_contact))
        .route("/api/v1/site-options", get(handle_site_options))
        .route("/api/v1/search", get(handle_search))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on `addr`.
pub async fn start(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "error": { "code": code, "message": message.into() }
    });
    (status, Json(body)).into_response()
}

// ── Handlers ────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
        "cms": state.cms_url,
    }))
}

async fn handle_home(State(state): State<Arc<AppState>>) -> Json<pages::HomePage> {
    Json(pages::home(&state.service).await)
}

/// `?search=&category=&campus=&credential=`; omitted controls mean "all".
async fn handle_programs(
    Query(filter): Query<ProgramFilter>,
    State(state): State<Arc<AppState>>,
) -> Json<pages::ProgramsPage> {
    Json(pages::programs(&state.service, filter).await)
}

async fn handle_program(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match pages::program_detail(&state.service, &slug).await {
        Ok(Some(detail)) => Json(detail).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "E_NOT_FOUND",
            format!("No program with slug '{slug}'"),
        ),
        Err(e) => error_response(StatusCode::SERVICE_UNAVAILABLE, "E_UNAVAILABLE", e.to_string()),
    }
}

async fn handle_student_life(State(state): State<Arc<AppState>>) -> Json<pages::StudentLifePage> {
    Json(pages::student_life(&state.service).await)
}

async fn handle_admissions(State(state): State<Arc<AppState>>) -> Json<pages::AdmissionsPage> {
    Json(pages::admissions(&state.service).await)
}

async fn handle_contact(State(state): State<Arc<AppState>>) -> Json<pages::ContactPage> {
    Json(pages::contact(&state.service).await)
}

/// Returns the form in its final state. 200 on success, 422 with field
/// errors, 502 when the CMS did not accept the submission.
async fn handle_submit_contact(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<ContactFields>,
) -> Response {
    let form = pages::submit_contact(&state.service, fields).await;
    let status = if !form.errors.is_empty() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        match form.status {
            SubmitStatus::Succeeded => StatusCode::OK,
            _ => StatusCode::BAD_GATEWAY,
        }
    };
    (status, Json(form)).into_response()
}

async fn handle_site_options(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(Value::Object(state.service.site_options().await))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    scope: Option<String>,
}

async fn handle_search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let scope = match params.scope.as_deref().map(str::parse::<SearchScope>) {
        None => SearchScope::default(),
        Some(Ok(scope)) => scope,
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, "E_INVALID_PARAMS", e),
    };
    if params.q.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "E_INVALID_PARAMS",
            "query parameter 'q' is required",
        );
    }

    let results = state.service.search(params.q.trim(), scope).await;
    Json(json!({ "query": params.q.trim(), "count": results.len(), "results": results }))
        .into_response()
}
