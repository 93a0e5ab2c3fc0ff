use thiserror::Error;

/// Failures from registration and login.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Username already exists!")]
    DuplicateUser,

    #[error("Invalid username or password!")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failures from completing habits and building the dashboard.
#[derive(Error, Debug)]
pub enum HabitError {
    #[error("Habit not found")]
    HabitNotFound,

    #[error("Habit already completed today")]
    AlreadyCompletedToday,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
