use rand::Rng;
use rand::seq::IndexedRandom;

use crate::action::Action;
use crate::address::{Address, all_steps, next_steps};
use crate::game_state::GameState;

/// Walks a snake towards a fixed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachTarget {
    pub snake: String,
    pub target: Address,
}

impl ReachTarget {
    pub fn new(snake: impl Into<String>, target: Address) -> Self {
        Self {
            snake: snake.into(),
            target,
        }
    }

    pub fn is_target_reached(&self, state: &GameState) -> bool {
        state
            .snake(&self.snake)
            .is_some_and(|snake| *snake.head() == self.target)
    }

    pub fn is_done(&self, state: &GameState) -> Option<&'static str> {
        self.is_target_reached(state).then_some("target reached")
    }

    pub fn update<R: Rng + ?Sized>(&mut self, state: &GameState, rng: &mut R) -> Vec<Action> {
        let Some(snake) = state.snake(&self.snake) else {
            return vec![];
        };
        let head = snake.head();
        let mut available = state.grid.filter_available(next_steps(head, &self.target));
        if available.is_empty() {
            available = state.grid.filter_available(all_steps(head, &self.target));
        }
        available
            .choose(rng)
            .map(|step| vec![Action::move_to(self.snake.clone(), step.clone())])
            .unwrap_or_default()
    }

    pub fn inspect(&self, kind: &str) -> String {
        format!("[{kind} target={}]", self.target.to_flat())
    }
}
