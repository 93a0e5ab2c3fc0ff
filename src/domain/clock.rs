use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// The single source of "today" for completion dates and streaks.
pub trait Clock: Send + Sync + 'static {
    // ---
    fn today(&self) -> NaiveDate;
}

/// Type alias for any backend that implements Clock.
pub type ClockPtr = Arc<dyn Clock>;

/// Server wall clock. Dates are UTC so every request agrees on the day
/// regardless of the client's timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    // ---
    fn today(&self) -> NaiveDate {
        // ---
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    // ---
    fn today(&self) -> NaiveDate {
        // ---
        self.0
    }
}
