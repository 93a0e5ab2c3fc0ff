use super::shared_types::PageError;
use super::views;
use crate::app_state::AppState;
use crate::session::RequestContext;
use axum::extract::State;
use axum::response::Html;

/// GET /dashboard
///
/// Catalog, today's completions, totals, streak and a random tip. Nothing is
/// cached; every request recomputes from the store.
#[tracing::instrument(skip(state, ctx))]
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>, PageError> {
    // ---
    let overview = state.habits().overview().await?;
    let tip = state.tips().get_tip().await;

    Ok(Html(views::render_dashboard(&ctx, &overview, &tip)))
}
