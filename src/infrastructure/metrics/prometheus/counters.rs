use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the completed-habits counter for one carbon category.
pub fn increment_habit_completed(carbon_type: &str) {
    counter!("habit_completions_total", "category" => carbon_type.to_string()).increment(1);
}

/// Increment the registered-users counter.
pub fn increment_user_registered() {
    counter!("users_registered_total").increment(1);
}

/// Increment the login counter, labelled by outcome.
pub fn increment_login(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("logins_total", "outcome" => outcome).increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
