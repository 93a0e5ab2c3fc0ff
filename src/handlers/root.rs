use super::views;
use crate::session::RequestContext;
use axum::response::Html;

/// GET /
pub async fn root_handler(ctx: RequestContext) -> Html<String> {
    Html(views::render_home(&ctx))
}
