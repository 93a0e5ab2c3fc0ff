//! JSON endpoints used by the dashboard script.

use super::shared_types::ApiError;
use crate::app_state::AppState;
use crate::services::CompletionSummary;
use crate::session::RequestContext;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct CompleteHabitResponse {
    //
    pub success: bool,
    #[serde(flatten)]
    pub summary: CompletionSummary,
}

#[derive(Debug, Serialize)]
pub struct TipResponse {
    //
    pub tip: String,
}

/// POST /api/complete-habit
///
/// # Request Body
/// ```json
/// { "habit_id": 3 }
/// ```
///
/// # Responses
/// - `200 OK` with points and carbon earned plus refreshed totals and streak.
/// - `400 Bad Request` for a malformed body or a habit already done today.
/// - `404 Not Found` for an unknown habit.
#[tracing::instrument(skip_all)]
pub async fn complete_habit(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<CompleteHabitResponse>, ApiError> {
    // ---
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected complete-habit body: {}", rejection);
        ApiError::InvalidInput
    })?;

    // Only a JSON object with an integer `habit_id` is accepted
    let habit_id = body
        .get("habit_id")
        .and_then(Value::as_i64)
        .ok_or(ApiError::InvalidInput)?;

    let summary = state.habits().complete(&ctx, habit_id).await?;

    Ok(Json(CompleteHabitResponse {
        success: true,
        summary,
    }))
}

/// GET /api/new-tip
pub async fn new_tip(State(state): State<AppState>) -> Json<TipResponse> {
    // ---
    Json(TipResponse {
        tip: state.tips().get_tip().await,
    })
}
