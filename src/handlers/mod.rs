// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod account;
mod api;
mod dashboard;
mod health;
mod metrics;
mod root;
mod shared_types;
mod views;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_http_requests};
pub use root::root_handler;

// Account pages
pub use account::{login, login_page, logout, register, register_page};

// Dashboard and its JSON API
pub use api::{complete_habit, new_tip};
pub use dashboard::dashboard;
