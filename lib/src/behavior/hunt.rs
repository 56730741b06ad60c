use ahash::AHashSet;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::action::Action;
use crate::address::{Address, all_steps, distance, next_steps};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::game_state::GameState;

/// Chases the closest cell of the strongest enemy player.
///
/// The prey is re-evaluated every tick: as long as the current target cell
/// still belongs to the hunted player the closest of its cells is picked
/// again, otherwise a new target (and, if needed, a new player) is chosen.
/// A hunter without prey emits nothing but is never done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntEnemy {
    pub snake: String,
    pub target: Option<Address>,
    pub target_player: Option<String>,
}

impl HuntEnemy {
    pub fn new(snake: impl Into<String>) -> Self {
        Self {
            snake: snake.into(),
            target: None,
            target_player: None,
        }
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Enemy with the most cells; equal counts go to the smallest name.
    pub fn pick_target_player(state: &GameState) -> Option<String> {
        state
            .enemy_cell_counts
            .iter()
            .filter(|(name, count)| **count > 0 && **name != state.player_name)
            .max_by(|(n1, c1), (n2, c2)| c1.cmp(c2).then_with(|| n2.cmp(n1)))
            .map(|(name, _)| name.clone())
    }

    /// Targets of every other hunter in the roster.
    fn other_targets(&self, state: &GameState) -> AHashSet<Address> {
        state
            .snakes
            .iter()
            .filter(|snake| snake.name != self.snake)
            .filter_map(|snake| snake.target.clone())
            .collect()
    }

    fn pick_target(&mut self, state: &GameState, sink: &mut dyn DiagnosticSink) {
        let Some(player) = self
            .target_player
            .clone()
            .filter(|player| *player != state.player_name)
        else {
            self.target_player = None;
            self.target = None;
            sink.emit(Diagnostic::HuntNoTarget {
                snake: self.snake.clone(),
            });
            return;
        };
        let Some(head) = state.snake(&self.snake).map(|snake| snake.head().clone()) else {
            self.target = None;
            return;
        };
        let taken = self.other_targets(state);
        self.target = state
            .grid
            .cells()
            .filter(|cell| cell.is_owned_by(&player) && !taken.contains(&cell.address))
            .map(|cell| &cell.address)
            .min_by(|a, b| {
                distance(a, &head)
                    .cmp(&distance(b, &head))
                    .then_with(|| a.cmp(b))
            })
            .cloned();
        if let Some(target) = &self.target {
            sink.emit(Diagnostic::HuntSelected {
                snake: self.snake.clone(),
                player,
                target: target.clone(),
            });
        }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Action> {
        if let Some(target) = &self.target {
            if state.grid.owner(target) != self.target_player.as_deref() {
                sink.emit(Diagnostic::HuntTargetLost {
                    snake: self.snake.clone(),
                });
                self.target = None;
            } else {
                // Keep following whichever cell of the prey is closest now.
                self.pick_target(state, sink);
            }
        }
        if self.target.is_none() {
            if self.target_player.is_none() {
                self.target_player = Self::pick_target_player(state);
            }
            self.pick_target(state, sink);
        }

        let target = self.target.clone();
        if target.is_none() {
            self.target_player = None;
        }
        let Some(snake) = state.snake_mut(&self.snake) else {
            return vec![];
        };
        snake.target = target;
        match self.determine_next_step(state, rng) {
            Some(step) => vec![Action::move_to(self.snake.clone(), step)],
            None => vec![],
        }
    }

    fn determine_next_step<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Option<Address> {
        let target = self.target.as_ref()?;
        let head = state.snake(&self.snake)?.head();
        let mut available = state.grid.filter_available(next_steps(head, target));
        if available.is_empty() {
            available = state.grid.filter_available(all_steps(head, target));
        }
        let taken = self.other_targets(state);
        let untaken: Vec<Address> = available
            .iter()
            .filter(|step| !taken.contains(*step))
            .cloned()
            .collect();
        let candidates = if untaken.is_empty() { available } else { untaken };
        candidates.choose(rng).cloned()
    }

    pub fn inspect(&self) -> String {
        format!(
            "[HuntEnemy target={} enemy={}]",
            self.target
                .as_ref()
                .map(Address::to_flat)
                .unwrap_or_else(|| "-".to_string()),
            self.target_player.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{MemorySink, NullSink};
    use crate::snake::Snake;
    use crate::wire::{CellUpdate, UpdateMessage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state(cells: Vec<CellUpdate>) -> GameState {
        let mut state = GameState::new(vec![6, 6], [0, 0].into(), "us");
        state.snakes = vec![Snake::new("us.0_k", vec![[0, 0].into()])];
        state.update(
            &UpdateMessage {
                updated_cells: cells,
                removed_snakes: vec![],
            },
            &mut NullSink,
        );
        state
    }

    #[test]
    fn test_no_enemy_means_no_target_but_not_done() {
        let mut state = state(vec![CellUpdate::new([0, 0], 0, "us")]);
        let sink = MemorySink::new();
        let mut hunt = HuntEnemy::new("us.0_k");
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(HuntEnemy::pick_target_player(&state), None);
        assert!(hunt.update(&mut state, &mut rng, &mut sink.clone()).is_empty());
        assert!(!hunt.has_target());
        assert_eq!(hunt.target_player, None);
        assert!(sink.messages().contains(&"[us.0_k] no target available".to_string()));
        assert_eq!(state.snake("us.0_k").unwrap().target, None);
    }

    #[test]
    fn test_picks_strongest_enemy_with_stable_tiebreak() {
        let state = state(vec![
            CellUpdate::new([5, 5], 0, "blue"),
            CellUpdate::new([5, 4], 0, "blue"),
            CellUpdate::new([4, 4], 0, "amber"),
            CellUpdate::new([4, 3], 0, "amber"),
            CellUpdate::new([1, 5], 0, "red"),
        ]);
        assert_eq!(HuntEnemy::pick_target_player(&state), Some("amber".to_string()));
    }

    #[test]
    fn test_targets_nearest_cell_and_steps_towards_it() {
        let mut state = state(vec![
            CellUpdate::new([0, 0], 0, "us"),
            CellUpdate::new([3, 0], 0, "red"),
            CellUpdate::new([5, 5], 0, "red"),
        ]);
        let mut hunt = HuntEnemy::new("us.0_k");
        let mut rng = StdRng::seed_from_u64(9);
        let actions = hunt.update(&mut state, &mut rng, &mut NullSink);
        assert_eq!(hunt.target, Some(Address::from([3, 0])));
        assert_eq!(hunt.target_player.as_deref(), Some("red"));
        assert_eq!(actions, vec![Action::move_to("us.0_k", [1, 0].into())]);
        assert_eq!(state.snake("us.0_k").unwrap().target, Some(Address::from([3, 0])));
    }

    #[test]
    fn test_avoids_cells_already_hunted() {
        let mut state = state(vec![
            CellUpdate::new([3, 0], 0, "red"),
            CellUpdate::new([0, 4], 0, "red"),
        ]);
        let mut other = Snake::new("us.1_k", vec![[2, 0].into()]);
        other.target = Some([3, 0].into());
        state.snakes.push(other);

        let mut hunt = HuntEnemy::new("us.0_k");
        let mut rng = StdRng::seed_from_u64(2);
        hunt.update(&mut state, &mut rng, &mut NullSink);
        assert_eq!(hunt.target, Some(Address::from([0, 4])));
    }

    #[test]
    fn test_never_steps_onto_prey() {
        let mut state = state(vec![CellUpdate::new([1, 0], 0, "red")]);
        let mut hunt = HuntEnemy::new("us.0_k");
        let mut rng = StdRng::seed_from_u64(4);
        let actions = hunt.update(&mut state, &mut rng, &mut NullSink);
        assert_eq!(hunt.target, Some(Address::from([1, 0])));
        assert_eq!(actions, vec![Action::move_to("us.0_k", [0, 1].into())]);
    }

    #[test]
    fn test_retargets_when_cell_changes_hands() {
        let mut state = state(vec![
            CellUpdate::new([2, 0], 0, "red"),
            CellUpdate::new([0, 5], 0, "red"),
        ]);
        let sink = MemorySink::new();
        let mut hunt = HuntEnemy::new("us.0_k");
        let mut rng = StdRng::seed_from_u64(6);
        hunt.update(&mut state, &mut rng, &mut sink.clone());
        assert_eq!(hunt.target, Some(Address::from([2, 0])));

        state.update(
            &UpdateMessage {
                updated_cells: vec![CellUpdate::new([2, 0], 0, "")],
                removed_snakes: vec![],
            },
            &mut NullSink,
        );
        hunt.update(&mut state, &mut rng, &mut sink.clone());
        assert_eq!(hunt.target, Some(Address::from([0, 5])));
        assert!(
            sink.messages()
                .contains(&"[us.0_k] target lost, finding new one".to_string())
        );
    }
}
