use crate::domain::{current_streak, ClockPtr, RepositoryPtr};
use anyhow::Result;

/// Computes the day streak from the store's completion dates and the
/// application clock.
#[derive(Clone)]
pub struct StreakService {
    // ---
    repository: RepositoryPtr,
    clock: ClockPtr,
}

impl StreakService {
    // ---
    pub fn new(repository: RepositoryPtr, clock: ClockPtr) -> Self {
        // ---
        Self { repository, clock }
    }

    /// Current streak across all completion events.
    pub async fn current(&self) -> Result<u32> {
        // ---
        let dates = self.repository.completion_dates().await?;
        Ok(current_streak(&dates, self.clock.today()))
    }
}
