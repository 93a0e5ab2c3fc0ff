//! Habit catalog and carbon savings table.
//!
//! Both are configuration data: the built-in defaults can be replaced at
//! startup with a JSON document, without touching code.

use super::models::HabitSeed;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Seed habits plus the category → kg CO2 saved per occurrence table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCatalog {
    // ---
    habits: Vec<HabitSeed>,
    carbon_savings: BTreeMap<String, f64>,
}

impl Default for HabitCatalog {
    fn default() -> Self {
        // ---
        let habits = vec![
            HabitSeed::new(
                "Bike instead of driving",
                "Choose biking over driving for short distances",
                "bike_instead_drive",
                15,
            ),
            HabitSeed::new(
                "Use reusable water bottle",
                "Avoid single-use plastic bottles",
                "reusable_bottle",
                10,
            ),
            HabitSeed::new(
                "Walk for short trips",
                "Walk instead of driving for nearby errands",
                "walk_short_distance",
                12,
            ),
            HabitSeed::new(
                "Take public transport",
                "Use public transport instead of personal vehicle",
                "public_transport",
                12,
            ),
            HabitSeed::new(
                "Turn off lights when leaving",
                "Save energy by switching off unnecessary lights",
                "energy_saving",
                8,
            ),
            HabitSeed::new(
                "Eat a plant-based meal",
                "Choose vegetarian/vegan options",
                "plant_based_meal",
                18,
            ),
        ];

        // kg CO2 saved per occurrence
        let carbon_savings = [
            ("bike_instead_drive", 2.3),  // per 10km
            ("reusable_bottle", 0.1),     // per use
            ("walk_short_distance", 0.8), // per 5km
            ("public_transport", 1.2),    // per trip
            ("energy_saving", 0.5),       // per day
            ("plant_based_meal", 1.4),    // per meal
        ]
        .into_iter()
        .map(|(category, kg)| (category.to_string(), kg))
        .collect();

        Self {
            habits,
            carbon_savings,
        }
    }
}

impl HabitCatalog {
    // ---
    pub fn new(habits: Vec<HabitSeed>, carbon_savings: BTreeMap<String, f64>) -> Self {
        // ---
        Self {
            habits,
            carbon_savings,
        }
    }

    /// Load a catalog override from `path`, or the built-in catalog when no
    /// path is configured or the file does not exist.
    ///
    /// # Errors
    /// A file that exists but cannot be read or parsed is a startup error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // ---
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Habit catalog {} not found, using built-in catalog",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read habit catalog {}", path.display()))
            }
        };

        let catalog: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse habit catalog {}", path.display()))?;

        tracing::info!(
            "Loaded habit catalog from {} ({} habits, {} carbon categories)",
            path.display(),
            catalog.habits.len(),
            catalog.carbon_savings.len()
        );

        Ok(catalog)
    }

    pub fn habits(&self) -> &[HabitSeed] {
        &self.habits
    }

    /// kg CO2 saved for one occurrence of `category`; 0.0 when unknown.
    pub fn carbon_saved_for(&self, category: &str) -> f64 {
        // ---
        self.carbon_savings.get(category).copied().unwrap_or(0.0)
    }
}
