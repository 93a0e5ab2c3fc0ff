use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Built-in tips used when no external list is available.
pub const DEFAULT_TIPS: [&str; 10] = [
    "Replace single-use items with reusable alternatives",
    "Use LED bulbs - they use 75% less energy than traditional bulbs",
    "Take shorter showers to conserve water and energy",
    "Unplug electronics when not in use to avoid phantom energy drain",
    "Choose walking or biking for trips under 2 miles",
    "Meal plan to reduce food waste",
    "Use both sides of paper and recycle when possible",
    "Choose local and seasonal produce when grocery shopping",
    "Air dry clothes instead of using the dryer when weather permits",
    "Use a refillable water bottle instead of buying bottled water",
];

#[derive(Debug, Clone)]
enum TipSource {
    // ---
    List(Arc<Vec<String>>),
    /// Re-read on every request so edits apply without a restart.
    File(Arc<PathBuf>),
}

/// Hands out sustainability tips, uniformly at random.
#[derive(Debug, Clone)]
pub struct TipProvider {
    // ---
    source: TipSource,
}

impl Default for TipProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TipProvider {
    // ---
    pub fn builtin() -> Self {
        // ---
        Self::new(Vec::new())
    }

    /// Use `tips`, or the built-in list when it is empty.
    pub fn new(tips: Vec<String>) -> Self {
        // ---
        let tips = if tips.is_empty() { builtin_tips() } else { tips };
        Self {
            source: TipSource::List(Arc::new(tips)),
        }
    }

    /// Serve tips from a JSON array of strings at `path`, read per request.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        // ---
        Self {
            source: TipSource::File(Arc::new(path.into())),
        }
    }

    /// The current list. Never empty.
    pub async fn tips(&self) -> Vec<String> {
        // ---
        match &self.source {
            TipSource::List(tips) => tips.to_vec(),
            TipSource::File(path) => read_tips(path).await,
        }
    }

    /// One tip chosen uniformly at random.
    pub async fn get_tip(&self) -> String {
        // ---
        let tips = self.tips().await;
        tips.choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_TIPS[0].to_string())
    }
}

fn builtin_tips() -> Vec<String> {
    DEFAULT_TIPS.iter().map(|t| t.to_string()).collect()
}

/// Load a JSON array of strings from `path`.
///
/// A missing, unreadable, malformed or empty file falls back to the
/// built-in list.
async fn read_tips(path: &Path) -> Vec<String> {
    // ---
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No tips file at {}, using built-in tips", path.display());
            return builtin_tips();
        }
        Err(err) => {
            tracing::error!("Failed to read tips file {}: {}", path.display(), err);
            return builtin_tips();
        }
    };

    match serde_json::from_slice::<Vec<String>>(&bytes) {
        Ok(tips) if tips.is_empty() => {
            tracing::warn!("Tips file {} is empty, using built-in tips", path.display());
            builtin_tips()
        }
        Ok(tips) => tips,
        Err(err) => {
            tracing::warn!("Failed to parse tips file {}: {}", path.display(), err);
            builtin_tips()
        }
    }
}
