use rand::Rng;

use crate::action::Action;
use crate::game_state::GameState;

/// Moves the snake out of the way onto any free neighbouring cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWalk {
    pub snake: String,
    pub attempts: usize,
}

impl RandomWalk {
    pub fn new(snake: impl Into<String>, attempts: usize) -> Self {
        Self {
            snake: snake.into(),
            attempts,
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) -> Vec<Action> {
        state
            .snake(&self.snake)
            .and_then(|snake| {
                state
                    .grid
                    .random_free_neighbour(snake.head(), self.attempts, rng)
            })
            .map(|step| vec![Action::move_to(self.snake.clone(), step)])
            .unwrap_or_default()
    }
}
