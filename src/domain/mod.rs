mod catalog;
mod clock;
mod errors;
mod level;
mod metrics;
mod models;
mod repository;
mod streak;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Persistence abstraction and the records it hands out
pub use models::{CompletionEvent, Habit, HabitSeed, NewCompletion, Totals, User};
pub use repository::{InsertOutcome, Repository, RepositoryPtr};

// Pure domain logic
pub use catalog::HabitCatalog;
pub use clock::{Clock, ClockPtr, FixedClock, SystemClock};
pub use errors::{AccountError, HabitError};
pub use level::Level;
pub use streak::current_streak;
