use serde::Serialize;

const POINTS_PER_LEVEL: i64 = 100;

const LEVEL_NAMES: [&str; 6] = [
    "Eco Beginner",
    "Green Warrior",
    "Sustainability Hero",
    "Earth Guardian",
    "Climate Champion",
    "Eco Legend",
];

/// Gamified rank derived from total points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    // ---
    pub number: u32,
    pub name: &'static str,
}

impl Level {
    // ---
    /// One level per 100 points, starting at level 1. Names top out at the
    /// last rung while the number keeps climbing.
    pub fn from_points(points: i64) -> Self {
        // ---
        let number = u32::try_from(points.max(0) / POINTS_PER_LEVEL + 1).unwrap_or(u32::MAX);
        let index = usize::try_from(number - 1)
            .unwrap_or(usize::MAX)
            .min(LEVEL_NAMES.len() - 1);

        Self {
            number,
            name: LEVEL_NAMES[index],
        }
    }
}
