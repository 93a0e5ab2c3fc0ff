use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    // ---
    pub id: i64,
    pub username: String,

    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip)]
    pub password_hash: String,

    pub created_date: NaiveDate,
}

/// A predefined sustainable action from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Habit {
    // ---
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Carbon-impact category, the key into the carbon savings table.
    pub carbon_type: String,

    pub points: i64,
    pub created_date: NaiveDate,
}

/// Catalog entry used to seed the `habits` table on first start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSeed {
    // ---
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub carbon_type: String,
    pub points: i64,
}

impl HabitSeed {
    // ---
    pub fn new(name: &str, description: &str, carbon_type: &str, points: i64) -> Self {
        // ---
        Self {
            name: name.to_string(),
            description: description.to_string(),
            carbon_type: carbon_type.to_string(),
            points,
        }
    }
}

/// A completion event about to be written.
///
/// Points and carbon are snapshots taken at completion time, so later catalog
/// edits never rewrite history.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompletion {
    // ---
    pub habit_id: i64,
    pub completed_date: NaiveDate,
    pub points_earned: i64,
    pub carbon_saved: f64,
}

/// A stored completion event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEvent {
    // ---
    pub id: i64,
    pub habit_id: i64,
    pub completed_date: NaiveDate,
    pub points_earned: i64,
    pub carbon_saved: f64,
}

/// Store-wide running totals over every completion event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    // ---
    pub total_points: i64,
    pub total_carbon_saved: f64,
    pub completions: i64,
}

impl Totals {
    // ---
    /// Carbon total rounded to two decimal places for display.
    pub fn rounded_carbon(&self) -> f64 {
        // ---
        (self.total_carbon_saved * 100.0).round() / 100.0
    }
}
