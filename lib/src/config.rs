use serde::{Deserialize, Serialize};

/// Tunables for [`crate::strategy::MainStrategy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Snakes longer than this are sent home to be saved.
    pub save_length: usize,
    /// Maximum number of snakes retreating for being too long.
    pub max_saving_snakes: usize,
    /// Minimum length a snake needs before it may spawn a kamikaze.
    pub kamikaze_length: usize,
    pub desired_main_snakes: usize,
    pub desired_kamikaze_snakes: usize,
    /// Food cells required per snake before splitting.
    pub food_per_snake: f64,
    /// Idle snakes only retreat while fewer than this many are retreating.
    pub idle_retreat_limit: usize,
    /// Random probes when looking for a free cell to split into.
    pub split_search_attempts: usize,
    pub random_walk_attempts: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            save_length: 10,
            max_saving_snakes: 15,
            kamikaze_length: 3,
            desired_main_snakes: 75,
            desired_kamikaze_snakes: 4,
            food_per_snake: 3.0,
            idle_retreat_limit: 4,
            split_search_attempts: 10,
            random_walk_attempts: 10,
        }
    }
}

impl StrategyConfig {
    /// Many kamikazes, little saving.
    pub fn aggressive() -> Self {
        Self {
            desired_kamikaze_snakes: 12,
            kamikaze_length: 2,
            save_length: 20,
            max_saving_snakes: 4,
            ..Default::default()
        }
    }

    /// Never hunts, saves early.
    pub fn hoarder() -> Self {
        Self {
            desired_kamikaze_snakes: 0,
            save_length: 6,
            ..Default::default()
        }
    }
}
