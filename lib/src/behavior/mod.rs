//! Per-snake behaviors. Each snake has at most one active behavior, which
//! produces the snake's intents for the current tick.

mod hunt;
mod random_walk;
mod reach;

pub use hunt::HuntEnemy;
pub use random_walk::RandomWalk;
pub use reach::ReachTarget;

use rand::Rng;

use crate::action::Action;
use crate::address::Address;
use crate::diagnostics::DiagnosticSink;
use crate::game_state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Go to a fixed cell, usually food.
    ReachTarget(ReachTarget),
    HuntEnemy(HuntEnemy),
    /// Go home and retire.
    RetreatToBase(ReachTarget),
    RandomWalk(RandomWalk),
}

impl Behavior {
    pub fn reach(snake: impl Into<String>, target: Address) -> Self {
        Behavior::ReachTarget(ReachTarget::new(snake, target))
    }

    pub fn retreat(snake: impl Into<String>, home: Address) -> Self {
        Behavior::RetreatToBase(ReachTarget::new(snake, home))
    }

    pub fn hunt(snake: impl Into<String>) -> Self {
        Behavior::HuntEnemy(HuntEnemy::new(snake))
    }

    pub fn random_walk(snake: impl Into<String>, attempts: usize) -> Self {
        Behavior::RandomWalk(RandomWalk::new(snake, attempts))
    }

    /// `Some(reason)` once the behavior has nothing left to do.
    pub fn is_done(&self, state: &GameState) -> Option<&'static str> {
        match self {
            Behavior::ReachTarget(reach) | Behavior::RetreatToBase(reach) => reach.is_done(state),
            Behavior::HuntEnemy(_) | Behavior::RandomWalk(_) => None,
        }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Action> {
        match self {
            Behavior::ReachTarget(reach) | Behavior::RetreatToBase(reach) => {
                reach.update(state, rng)
            }
            Behavior::HuntEnemy(hunt) => hunt.update(state, rng, sink),
            Behavior::RandomWalk(walk) => walk.update(state, rng),
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Behavior::ReachTarget(reach) => reach.inspect("ReachTarget"),
            Behavior::RetreatToBase(reach) => reach.inspect("RetreatToBase"),
            Behavior::HuntEnemy(hunt) => hunt.inspect(),
            Behavior::RandomWalk(_) => "[RandomWalk]".to_string(),
        }
    }

    pub fn is_retreat(&self) -> bool {
        matches!(self, Behavior::RetreatToBase(_))
    }

    pub fn is_random_walk(&self) -> bool {
        matches!(self, Behavior::RandomWalk(_))
    }

    /// Food cell this behavior has locked, if it is a plain reach-target.
    pub fn food_target(&self) -> Option<&Address> {
        match self {
            Behavior::ReachTarget(reach) => Some(&reach.target),
            _ => None,
        }
    }

    /// False only for a hunter that currently has no prey.
    pub fn has_target(&self) -> bool {
        match self {
            Behavior::HuntEnemy(hunt) => hunt.has_target(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_names_variant() {
        assert_eq!(
            Behavior::retreat("us", [0, 1].into()).inspect(),
            "[RetreatToBase target=0,1]"
        );
        assert_eq!(Behavior::hunt("us").inspect(), "[HuntEnemy target=- enemy=-]");
        assert_eq!(Behavior::random_walk("us", 10).inspect(), "[RandomWalk]");
    }

    #[test]
    fn test_only_plain_reach_locks_food() {
        let food = Address::from([3, 3]);
        assert_eq!(Behavior::reach("us", food.clone()).food_target(), Some(&food));
        assert_eq!(Behavior::retreat("us", food).food_target(), None);
    }

    #[test]
    fn test_hunt_and_walk_are_never_done() {
        let state = GameState::new(vec![2, 2], [0, 0].into(), "us");
        assert_eq!(Behavior::hunt("us").is_done(&state), None);
        assert_eq!(Behavior::random_walk("us", 10).is_done(&state), None);
        assert_eq!(
            Behavior::retreat("us", [0, 0].into()).is_done(&state),
            Some("target reached")
        );
    }
}
