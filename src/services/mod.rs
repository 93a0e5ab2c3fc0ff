//! Service layer. Handlers talk to these, never to the repository.

mod account;
mod habits;
mod streak;
mod tips;

pub use account::AccountService;
pub use habits::{CompletionSummary, HabitOverview, HabitService};
pub use streak::StreakService;
pub use tips::{TipProvider, DEFAULT_TIPS};
