//! Session management for authenticated users.
//!
//! The session lives in a signed cookie holding the user id. Each request
//! resolves it into an explicit [`RequestContext`] that handlers pass into
//! service calls; nothing reads the session from ambient state.

use crate::app_state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::convert::Infallible;

// ---

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "green_session";

// ---

/// The authenticated identity carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    //
    pub user_id: i64,
    pub username: String,
}

/// Per-request context: who, if anyone, is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    //
    user: Option<SessionUser>,
}

impl RequestContext {
    // ---
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Name to attribute actions to in logs.
    pub fn actor(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("anonymous")
    }
}

// ---

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn session_key(secret: &str) -> Key {
    // ---
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Attach a session for `user` to the cookie jar.
pub fn start_session(jar: SignedCookieJar, user: &SessionUser) -> SignedCookieJar {
    // ---
    let cookie = Cookie::build((SESSION_COOKIE, user.user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    tracing::info!("Created session for user: {}", user.username);

    jar.add(cookie)
}

/// Remove the session cookie. Removing an absent session is fine.
pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    // ---
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

// ---

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // ---
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self::anonymous());
        };

        let Ok(user_id) = cookie.value().parse::<i64>() else {
            tracing::warn!("Ignoring malformed session cookie");
            return Ok(Self::anonymous());
        };

        let user = state.accounts().session_user(user_id).await.map_err(|e| {
            //
            tracing::error!("Failed to resolve session user {}: {}", user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

        Ok(user.map(Self::authenticated).unwrap_or_default())
    }
}
