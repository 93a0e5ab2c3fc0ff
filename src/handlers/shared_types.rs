use crate::domain::{AccountError, HabitError};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// JSON error body returned by the API routes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    // ---
    pub error: String,
}

/// Errors surfaced by the JSON API.
#[derive(Error, Debug)]
pub enum ApiError {
    // ---
    #[error("Invalid JSON data")]
    InvalidInput,

    #[error(transparent)]
    Habit(#[from] HabitError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::Habit(HabitError::AlreadyCompletedToday) => StatusCode::BAD_REQUEST,
            ApiError::Habit(HabitError::HabitNotFound) => StatusCode::NOT_FOUND,
            ApiError::Habit(HabitError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("API request failed: {:#}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Errors surfaced by the HTML routes as a plain message.
#[derive(Error, Debug)]
pub enum PageError {
    // ---
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Habit(#[from] HabitError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            // Form outcomes are plain messages, not HTTP failures
            PageError::Account(AccountError::DuplicateUser)
            | PageError::Account(AccountError::InvalidCredentials) => StatusCode::OK,
            PageError::Habit(HabitError::HabitNotFound) => StatusCode::NOT_FOUND,
            PageError::Habit(HabitError::AlreadyCompletedToday) => StatusCode::BAD_REQUEST,
            PageError::Account(AccountError::Internal(_))
            | PageError::Habit(HabitError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Page request failed: {:#}", self);
            "Something went wrong, please try again.".to_string()
        } else {
            self.to_string()
        };

        (status, Html(message)).into_response()
    }
}
