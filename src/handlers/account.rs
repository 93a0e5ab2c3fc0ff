//! Register, login and logout pages.

use super::shared_types::PageError;
use super::views;
use crate::app_state::AppState;
use crate::session::{end_session, start_session, SESSION_COOKIE};
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    //
    pub username: String,
    pub password: String,
}

/// GET /register
pub async fn register_page() -> Html<String> {
    Html(views::render_register())
}

/// POST /register
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Html<&'static str>, PageError> {
    // ---
    state
        .accounts()
        .register(&form.username, &form.password)
        .await?;

    Ok(Html(
        "Registration successful! <a href='/login'>Login here</a>",
    ))
}

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(views::render_login())
}

/// POST /login
///
/// On success the signed session cookie is set.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(SignedCookieJar, Html<&'static str>), PageError> {
    // ---
    let user = state
        .accounts()
        .login(&form.username, &form.password)
        .await?;

    Ok((
        start_session(jar, &user),
        Html("Login successful! <a href='/dashboard'>Go to Dashboard</a>"),
    ))
}

/// GET /logout
///
/// Only the cookie is inspected, so logging out works while the store is down.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Html<&'static str>) {
    // ---
    let user_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i64>().ok());
    state.accounts().logout(user_id);

    (
        end_session(jar),
        Html("Logged out successfully! <a href='/login'>Login again</a>"),
    )
}
