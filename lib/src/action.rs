use serde::{Deserialize, Serialize};

use crate::address::Address;

/// An intent emitted for a single snake during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Advance the named snake's head onto `next_location`.
    Move {
        snake_name: String,
        next_location: Address,
    },
    /// Detach `snake_segment` trailing segments of `old_snake_name` into a new
    /// snake whose head moves to `next_location`.
    Split {
        old_snake_name: String,
        new_snake_name: String,
        snake_segment: usize,
        next_location: Address,
    },
}

impl Action {
    pub fn move_to(snake_name: impl Into<String>, next_location: Address) -> Self {
        Action::Move {
            snake_name: snake_name.into(),
            next_location,
        }
    }

    /// Name of the snake that acts.
    pub fn snake_name(&self) -> &str {
        match self {
            Action::Move { snake_name, .. } => snake_name,
            Action::Split { old_snake_name, .. } => old_snake_name,
        }
    }

    pub fn next_location(&self) -> &Address {
        match self {
            Action::Move { next_location, .. } | Action::Split { next_location, .. } => {
                next_location
            }
        }
    }
}
