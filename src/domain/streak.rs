//! Consecutive-day streak over completion dates.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Count consecutive calendar days with at least one completion.
///
/// The run must end today or, when nothing was completed today yet,
/// yesterday. Any other most-recent date means the streak is broken and
/// the result is 0.
pub fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    // ---
    if dates.is_empty() {
        return 0;
    }

    let anchor = if dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if dates.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 1;
    let mut cursor = anchor;
    while let Some(previous) = cursor.pred_opt() {
        if !dates.contains(&previous) {
            break;
        }
        streak += 1;
        cursor = previous;
    }

    streak
}
