// src/api.rs
//! HTTP surface: router, shared state, handlers, and error mapping.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::analyze::{self, ai_adapter, AnalysisRequest};
use crate::directory::{DoctorDirectory, InMemoryDirectory};
use crate::medicine;

#[derive(Clone)]
pub struct AppState {
    ai: ai_adapter::DynProvider,
    directory: Arc<dyn DoctorDirectory>,
}

impl AppState {
    pub fn new(ai: ai_adapter::DynProvider, directory: Arc<dyn DoctorDirectory>) -> Self {
        Self { ai, directory }
    }

    /// Production wiring: provider from env, seeded directory.
    pub fn from_env() -> Self {
        Self::new(
            ai_adapter::build_provider_from_env(),
            Arc::new(InMemoryDirectory::seeded()),
        )
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/analyze-symptoms", post(analyze_symptoms))
        .route("/api/medicine-info", post(medicine_info))
        .route("/api/doctors", get(get_doctors))
        .route("/api/doctors/{id}", get(get_doctor))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// JSON error body shared by all failure responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn error_response(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message: message.into(),
        }),
    )
        .into_response()
}

/// `POST /api/analyze-symptoms`.
///
/// Malformed bodies and validation failures map to 400. Past validation
/// the pipeline cannot fail: AI failures fall forward to the rule engine
/// and directory failures degrade to an empty doctor list, so the happy
/// path is the only path.
async fn analyze_symptoms(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    // Extractor rejections keep the same JSON error shape as validation.
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Failed to analyze symptoms",
                rejection.body_text(),
            );
        }
    };
    if let Err(err) = request.validate() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Failed to analyze symptoms",
            err.to_string(),
        );
    }

    let result = analyze::analyze(request, state.ai.as_ref(), state.directory.as_ref()).await;
    Json(result).into_response()
}

#[derive(Debug, Deserialize)]
struct MedicineQuery {
    query: String,
}

/// `POST /api/medicine-info`. 503 when the AI collaborator cannot serve
/// the lookup; medicine data has no local fallback.
async fn medicine_info(
    State(state): State<AppState>,
    body: Result<Json<MedicineQuery>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Failed to fetch medicine information",
                rejection.body_text(),
            );
        }
    };
    if body.query.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Failed to fetch medicine information",
            "Medicine name is required",
        );
    }

    match medicine::lookup(state.ai.as_ref(), body.query.trim()).await {
        Some(info) => Json(info).into_response(),
        None => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Failed to fetch medicine information",
            "Medicine lookup is currently unavailable",
        ),
    }
}

#[derive(Debug, Deserialize)]
struct DoctorsQuery {
    specialty: Option<String>,
}

/// `GET /api/doctors[?specialty=...]`.
async fn get_doctors(
    State(state): State<AppState>,
    Query(params): Query<DoctorsQuery>,
) -> Response {
    let result = match params.specialty.as_deref() {
        Some(s) if !s.is_empty() => state.directory.by_specialty(s).await,
        _ => state.directory.all().await,
    };
    match result {
        Ok(doctors) => Json(doctors).into_response(),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch doctors",
            err.to_string(),
        ),
    }
}

/// `GET /api/doctors/{id}`.
async fn get_doctor(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    match state.directory.by_id(id).await {
        Ok(Some(doctor)) => Json(doctor).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Doctor not found", String::new()),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch doctor",
            err.to_string(),
        ),
    }
}
