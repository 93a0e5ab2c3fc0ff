// src/lib.rs
use anyhow::{Context, Result};
use app_state::AppState;
use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;

use handlers::*;

// Public exports (visible outside this module)
pub mod domain;
pub mod services;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod handlers;
mod infrastructure;
mod session;

// Hoist up only the public symbol(s)
pub use session::{session_key, RequestContext, SessionUser, SESSION_COOKIE};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_metrics, // ---
    create_prom_metrics,
    create_sqlite_repository,
    init_database,
    init_database_with_retry,
};

use domain::{ClockPtr, HabitCatalog, MetricsPtr, RepositoryPtr, SystemClock};
use services::{AccountService, HabitService, TipProvider};

/// Build the HTTP router from configuration, using the system clock.
///
/// Opens (and migrates) the database, seeds the habit catalog on first start,
/// loads the tips list and wires all services into the shared state.
pub async fn create_router(config: &AppConfig) -> Result<Router> {
    // ---
    create_router_with_clock(config, Arc::new(SystemClock)).await
}

/// [`create_router`] with an explicit clock, the one source of "today".
pub async fn create_router_with_clock(config: &AppConfig, clock: ClockPtr) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let metrics: MetricsPtr = match config.metrics {
        MetricsKind::Prometheus => create_prom_metrics()?,
        MetricsKind::Noop => create_noop_metrics()?,
    };

    // Create infrastructure dependencies
    let pool = init_database_with_retry(&config.database).await?;
    let repository: RepositoryPtr = Arc::new(create_sqlite_repository(pool));
    let catalog = Arc::new(HabitCatalog::load(config.content.catalog_path.as_deref())?);
    let tips = TipProvider::from_file(&config.content.tips_path);

    // Build services
    let accounts = AccountService::new(repository.clone(), metrics.clone());
    let habits = HabitService::new(repository.clone(), catalog, clock, metrics.clone());
    habits
        .seed_catalog()
        .await
        .context("failed to seed habit catalog")?;

    let app_state = AppState::new(
        metrics,
        repository,
        accounts,
        habits,
        tips,
        session_key(&config.session.secret),
    );

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .nest(
            "/api",
            Router::new()
                .route("/complete-habit", post(complete_habit))
                .route("/new-tip", get(new_tip)),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_http_requests,
        ))
        .with_state(app_state);

    Ok(router)
}
