use super::models::{CompletionEvent, Habit, HabitSeed, NewCompletion, Totals, User};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of an insert guarded by a uniqueness constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    // ---
    Inserted(T),
    /// The row collided with an existing one and nothing was written.
    Duplicate,
}

/// Abstraction over the relational store holding users, habits and completions.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Round-trip to the store, used by the full health check.
    async fn ping(&self) -> Result<()>;

    /// Create a new user. Usernames are unique at the store level.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<InsertOutcome<User>>;

    /// Get user by username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get user by ID.
    async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>>;

    /// Insert the catalog only when the habits table is empty.
    /// Returns the number of habits written.
    async fn seed_habits(&self, seeds: &[HabitSeed]) -> Result<u64>;

    /// Every habit in catalog order.
    async fn list_habits(&self) -> Result<Vec<Habit>>;

    /// Get habit by ID.
    async fn get_habit(&self, habit_id: i64) -> Result<Option<Habit>>;

    /// Whether the habit already has a completion on `date`.
    async fn completion_exists(&self, habit_id: i64, date: NaiveDate) -> Result<bool>;

    /// Record a completion. A second event for the same (habit, day) is
    /// rejected by the store and reported as [`InsertOutcome::Duplicate`].
    async fn insert_completion(
        &self,
        completion: &NewCompletion,
    ) -> Result<InsertOutcome<CompletionEvent>>;

    /// Habit ids completed on `date`.
    async fn completed_habit_ids_on(&self, date: NaiveDate) -> Result<Vec<i64>>;

    /// Distinct calendar dates on which any completion exists.
    async fn completion_dates(&self) -> Result<BTreeSet<NaiveDate>>;

    /// Sums over all completion events.
    async fn totals(&self) -> Result<Totals>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
