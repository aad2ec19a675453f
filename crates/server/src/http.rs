//! HTTP Endpoints
//!
//! REST API over the three orchestrators, the history store, and the
//! active locale.

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pharma_assist_core::{
    DocumentAnalysis, DocumentUpload, InteractionReport, Language, MedicationInfo, SpeechPayload,
};
use pharma_assist_agent::PlaybackState;
use pharma_assist_speech::strip_data_uri;

use crate::metrics::{metrics_handler, record_provider_error, record_request};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );

    Router::new()
        // Feature endpoints
        .route("/api/medications/info", post(medication_info))
        .route("/api/medications/audio", get(medication_audio))
        .route("/api/medications/read-aloud", post(toggle_read_aloud))
        .route("/api/medications/interactions", post(check_interactions))
        .route("/api/documents/analyze", post(analyze_document))

        // History sidebar
        .route("/api/history", get(list_history).delete(clear_history))

        // Active locale
        .route("/api/locale", get(get_locale).put(set_locale))

        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))

        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))

        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// JSON error body with the mapped status code
struct ApiError(ServerError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let status = StatusCode::from(self.0);
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        Self(err)
    }
}

impl From<pharma_assist_core::Error> for ApiError {
    fn from(err: pharma_assist_core::Error) -> Self {
        Self(err.into())
    }
}

/// Medication info request
#[derive(Debug, Deserialize)]
struct MedicationInfoRequest {
    name: String,
}

/// Medication info endpoint
async fn medication_info(
    State(state): State<AppState>,
    Json(request): Json<MedicationInfoRequest>,
) -> Result<Json<MedicationInfo>, ApiError> {
    record_request("medication_info");
    let info = state.lookup.submit(&request.name).await.map_err(|e| {
        if !e.is_validation() {
            record_provider_error("medication_info");
        }
        ApiError::from(e)
    })?;
    Ok(Json(info))
}

/// Narration payload, once the fire-and-forget synthesis has landed
#[derive(Debug, Serialize)]
struct AudioResponse {
    audio: Option<SpeechPayload>,
    playback: &'static str,
}

async fn medication_audio(State(state): State<AppState>) -> Json<AudioResponse> {
    Json(AudioResponse {
        audio: state.lookup.audio(),
        playback: playback_name(state.lookup.playback()),
    })
}

/// Read-aloud toggle endpoint
async fn toggle_read_aloud(State(state): State<AppState>) -> Json<serde_json::Value> {
    let playback = state.lookup.toggle_read_aloud();
    Json(serde_json::json!({ "playback": playback_name(playback) }))
}

fn playback_name(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Playing => "playing",
        PlaybackState::Stopped => "stopped",
    }
}

/// Interaction check request
#[derive(Debug, Deserialize)]
struct InteractionRequest {
    medications: Vec<String>,
}

/// Interaction check endpoint
///
/// The body carries the full list; it replaces the checker's current list
/// and every name goes through the same validation as typed input.
async fn check_interactions(
    State(state): State<AppState>,
    Json(request): Json<InteractionRequest>,
) -> Result<Json<InteractionReport>, ApiError> {
    record_request("interactions");

    state.interactions.clear_medications();
    for name in &request.medications {
        state.interactions.add_medication(name)?;
    }

    let report = state.interactions.check().await.map_err(|e| {
        if !e.is_validation() {
            record_provider_error("interactions");
        }
        ApiError::from(e)
    })?;
    Ok(Json(report))
}

/// Document analysis request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    filename: String,
    mime_type: String,
    /// Base64 payload; a `data:` URI prefix is tolerated
    data: String,
}

/// Document analysis endpoint
async fn analyze_document(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<DocumentAnalysis>, ApiError> {
    record_request("documents");

    let payload = match strip_data_uri(&request.data) {
        Some((_mime, payload)) => payload,
        None => request.data.as_str(),
    };
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| ServerError::InvalidRequest(format!("document payload: {e}")))?;

    let upload = DocumentUpload::new(&request.filename, &request.mime_type, bytes);
    let analysis = state.documents.analyze(upload).await.map_err(|e| {
        if !e.is_validation() {
            record_provider_error("documents");
        }
        ApiError::from(e)
    })?;
    Ok(Json(analysis))
}

/// List history, newest first
async fn list_history(State(state): State<AppState>) -> Json<serde_json::Value> {
    let items = state.ctx.history.list();
    Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    }))
}

/// Clear history
async fn clear_history(State(state): State<AppState>) -> StatusCode {
    state.ctx.history.clear();
    StatusCode::NO_CONTENT
}

/// Get the active locale and the available set
async fn get_locale(State(state): State<AppState>) -> Json<serde_json::Value> {
    let available: Vec<serde_json::Value> = Language::all()
        .iter()
        .map(|lang| serde_json::json!({ "code": lang.code(), "name": lang.name() }))
        .collect();
    Json(serde_json::json!({
        "locale": state.ctx.locale.get().code(),
        "available": available,
    }))
}

/// Locale change request
#[derive(Debug, Deserialize)]
struct LocaleRequest {
    locale: String,
}

/// Switch the active locale
async fn set_locale(
    State(state): State<AppState>,
    Json(request): Json<LocaleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let language = Language::from_str_loose(&request.locale).ok_or_else(|| {
        ServerError::InvalidRequest(format!("unknown locale: {}", request.locale))
    })?;
    state.ctx.locale.set(language);
    Ok(Json(serde_json::json!({ "locale": language.code() })))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "history_entries": state.ctx.history.len(),
    }))
}
