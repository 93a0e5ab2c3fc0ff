//! Habit completion and the dashboard aggregate.

use super::StreakService;
use crate::domain::{
    ClockPtr, Habit, HabitCatalog, HabitError, InsertOutcome, Level, MetricsPtr, NewCompletion,
    RepositoryPtr, Totals,
};
use crate::session::RequestContext;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// What a successful completion earned, plus the refreshed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionSummary {
    // ---
    pub points_earned: i64,
    pub carbon_saved: f64,
    pub total_points: i64,
    /// Rounded to two decimal places.
    pub total_carbon_saved: f64,
    pub current_streak: u32,
    pub level: u32,
    pub level_name: &'static str,
}

/// Everything the dashboard shows except the tip.
#[derive(Debug, Clone)]
pub struct HabitOverview {
    // ---
    pub today: NaiveDate,
    pub habits: Vec<Habit>,
    pub completed_today: Vec<i64>,
    pub totals: Totals,
    pub current_streak: u32,
    pub level: Level,
}

#[derive(Clone)]
pub struct HabitService {
    // ---
    repository: RepositoryPtr,
    catalog: Arc<HabitCatalog>,
    clock: ClockPtr,
    streaks: StreakService,
    metrics: MetricsPtr,
}

impl HabitService {
    // ---
    pub fn new(
        repository: RepositoryPtr,
        catalog: Arc<HabitCatalog>,
        clock: ClockPtr,
        metrics: MetricsPtr,
    ) -> Self {
        // ---
        let streaks = StreakService::new(repository.clone(), clock.clone());
        Self {
            repository,
            catalog,
            clock,
            streaks,
            metrics,
        }
    }

    /// Write the catalog into an empty store. Returns how many habits were
    /// inserted (0 when the store was already seeded).
    pub async fn seed_catalog(&self) -> Result<u64, HabitError> {
        // ---
        let inserted = self.repository.seed_habits(self.catalog.habits()).await?;
        if inserted > 0 {
            tracing::info!("Seeded {} habits", inserted);
        }
        Ok(inserted)
    }

    /// Record that `habit_id` was done today.
    ///
    /// # Errors
    /// - [`HabitError::AlreadyCompletedToday`] if any completion for the habit
    ///   exists on today's date; checked first, and enforced again by the
    ///   store's (habit, day) uniqueness so concurrent requests cannot both win.
    /// - [`HabitError::HabitNotFound`] for an unknown id.
    pub async fn complete(
        &self,
        ctx: &RequestContext,
        habit_id: i64,
    ) -> Result<CompletionSummary, HabitError> {
        // ---
        let today = self.clock.today();

        if self.repository.completion_exists(habit_id, today).await? {
            return Err(HabitError::AlreadyCompletedToday);
        }

        let habit = self
            .repository
            .get_habit(habit_id)
            .await?
            .ok_or(HabitError::HabitNotFound)?;

        let carbon_saved = self.catalog.carbon_saved_for(&habit.carbon_type);
        let completion = NewCompletion {
            habit_id: habit.id,
            completed_date: today,
            points_earned: habit.points,
            carbon_saved,
        };

        let event = match self.repository.insert_completion(&completion).await? {
            InsertOutcome::Inserted(event) => event,
            InsertOutcome::Duplicate => return Err(HabitError::AlreadyCompletedToday),
        };

        self.metrics.record_habit_completed(&habit.carbon_type);
        tracing::info!(
            "{} completed habit {} ({}) on {}: +{} points, {} kg CO2",
            ctx.actor(),
            habit.id,
            habit.name,
            today,
            event.points_earned,
            event.carbon_saved
        );

        let totals = self.repository.totals().await?;
        let current_streak = self.streaks.current().await?;
        let level = Level::from_points(totals.total_points);

        Ok(CompletionSummary {
            points_earned: event.points_earned,
            carbon_saved: event.carbon_saved,
            total_points: totals.total_points,
            total_carbon_saved: totals.rounded_carbon(),
            current_streak,
            level: level.number,
            level_name: level.name,
        })
    }

    /// Current streak across the whole store.
    pub async fn current_streak(&self) -> Result<u32, HabitError> {
        // ---
        Ok(self.streaks.current().await?)
    }

    /// Catalog, today's completions, totals, streak and level, recomputed
    /// on every call.
    pub async fn overview(&self) -> Result<HabitOverview, HabitError> {
        // ---
        let today = self.clock.today();
        let habits = self.repository.list_habits().await?;
        let completed_today = self.repository.completed_habit_ids_on(today).await?;
        let totals = self.repository.totals().await?;
        let current_streak = self.streaks.current().await?;

        Ok(HabitOverview {
            today,
            habits,
            completed_today,
            level: Level::from_points(totals.total_points),
            totals,
            current_streak,
        })
    }
}
