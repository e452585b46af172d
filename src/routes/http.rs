//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::logic::{generate_mcq, generate_points};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_root() -> impl IntoResponse {
    Json(RootOut {
        message: "studygen backend is running. POST /generate/mcq".into(),
    })
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, count = body.count))]
pub async fn http_generate_mcq(
    State(state): State<Arc<AppState>>,
    Json(body): Json<McqIn>,
) -> impl IntoResponse {
    match generate_mcq(&state, &body).await {
        Ok(out) => {
            info!(target: "generate", request_id = %out.request_id, status = ?out.status, "MCQ request served");
            Json(out).into_response()
        }
        Err(e) => upstream_failure(e.0),
    }
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, max_points = body.max_points))]
pub async fn http_generate_points(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PointsIn>,
) -> impl IntoResponse {
    match generate_points(&state, &body).await {
        Ok(out) => {
            info!(target: "generate", request_id = %out.request_id, status = ?out.status, "Points request served");
            Json(out).into_response()
        }
        Err(e) => upstream_failure(e.0),
    }
}

/// Upstream failures map to 500 with the service's message in `detail`.
fn upstream_failure(message: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorOut { detail: format!("OpenAI request failed: {}", message) }),
    )
        .into_response()
}
