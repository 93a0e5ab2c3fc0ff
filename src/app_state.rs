//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` holds the services
//! handlers call into, the metrics implementation and the cookie signing key.
//!
//! The state is cheaply cloneable (`Arc` internally where needed) so it can
//! be handed to each request handler without copying resources.

use crate::domain::{MetricsPtr, RepositoryPtr};
use crate::services::{AccountService, HabitService, TipProvider};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Services depend on the `Repository` trait,
///   not on `SqliteRepository`.
/// - **Immutable After Initialization**: State is built once at startup and
///   never mutated.
/// - **No queries in handlers**: handlers only see services; the raw
///   repository is kept solely for the full health check.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Metrics implementation, Prometheus-backed or no-op.
    metrics: MetricsPtr,

    /// Store handle, used for liveness pings only.
    repository: RepositoryPtr,

    /// Registration, login and session resolution.
    accounts: AccountService,

    /// Habit completion, streaks and the dashboard aggregate.
    habits: HabitService,

    /// Sustainability tips.
    tips: TipProvider,

    /// Signing key for the session cookie.
    cookie_key: Key,
}

impl AppState {
    // ---

    pub fn new(
        metrics: MetricsPtr,
        repository: RepositoryPtr,
        accounts: AccountService,
        habits: HabitService,
        tips: TipProvider,
        cookie_key: Key,
    ) -> Self {
        // ---
        AppState {
            metrics,
            repository,
            accounts,
            habits,
            tips,
            cookie_key,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        &self.metrics
    }

    /// Round-trip to the store.
    pub(crate) async fn ping_store(&self) -> anyhow::Result<()> {
        // ---
        self.repository.ping().await
    }

    pub(crate) fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub(crate) fn habits(&self) -> &HabitService {
        &self.habits
    }

    pub(crate) fn tips(&self) -> &TipProvider {
        &self.tips
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
