use crate::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default (no query parameters), performs a light check to confirm the web server
///   is running.
///
/// - If `mode=full` is passed as a query parameter, also round-trips to the database.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` if server (and store, in full mode) are healthy.
/// - `500 INTERNAL SERVER ERROR` with `{ "status": "error" }` if the store check fails.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    match params.mode.as_deref() {
        Some("full") => match state.ping_store().await {
            Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })),
            Err(err) => {
                tracing::error!("Health check failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(HealthResponse { status: "error" }),
                )
            }
        },
        _ => {
            // Light health check
            (StatusCode::OK, Json(HealthResponse { status: "ok" }))
        }
    }
}
