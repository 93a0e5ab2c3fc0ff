//! Registration, login and logout.

use crate::domain::{AccountError, InsertOutcome, MetricsPtr, RepositoryPtr, User};
use crate::infrastructure::{hash_password, verify_password};
use crate::session::{RequestContext, SessionUser};
use anyhow::Context;

#[derive(Clone)]
pub struct AccountService {
    // ---
    repository: RepositoryPtr,
    metrics: MetricsPtr,
}

impl AccountService {
    // ---
    pub fn new(repository: RepositoryPtr, metrics: MetricsPtr) -> Self {
        // ---
        Self {
            repository,
            metrics,
        }
    }

    /// Create an account with a hashed credential.
    ///
    /// # Errors
    /// [`AccountError::DuplicateUser`] when the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AccountError> {
        // ---
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("password hashing task failed")??;

        match self.repository.create_user(username, &password_hash).await? {
            InsertOutcome::Inserted(user) => {
                tracing::info!("Registered user: {}", user.username);
                self.metrics.record_user_registered();
                Ok(user)
            }
            InsertOutcome::Duplicate => {
                tracing::info!("Registration rejected, username taken: {}", username);
                Err(AccountError::DuplicateUser)
            }
        }
    }

    /// Check credentials and return the identity to bind to the session.
    ///
    /// # Errors
    /// [`AccountError::InvalidCredentials`] for an unknown user or a wrong
    /// password; the two cases are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AccountError> {
        // ---
        let Some(user) = self.repository.get_user_by_username(username).await? else {
            tracing::warn!("Login attempt for non-existent user: {}", username);
            self.metrics.record_login(false);
            return Err(AccountError::InvalidCredentials);
        };

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .context("password verification task failed")??;

        self.metrics.record_login(valid);

        if !valid {
            tracing::warn!("Login rejected for user: {}", username);
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!("User logged in: {}", user.username);
        Ok(SessionUser {
            user_id: user.id,
            username: user.username,
        })
    }

    /// Drop the session identity. Always succeeds, also when nobody was
    /// logged in; the store is not consulted.
    pub fn logout(&self, session_user_id: Option<i64>) -> RequestContext {
        // ---
        if let Some(user_id) = session_user_id {
            tracing::info!("Session ended for user id {}", user_id);
        }
        RequestContext::anonymous()
    }

    /// Resolve a session's user id back into an identity. `None` when the
    /// account no longer exists.
    pub async fn session_user(&self, user_id: i64) -> Result<Option<SessionUser>, AccountError> {
        // ---
        let user = self.repository.get_user_by_id(user_id).await?;

        Ok(user.map(|u| SessionUser {
            user_id: u.id,
            username: u.username,
        }))
    }
}
