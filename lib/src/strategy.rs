use ahash::{AHashMap, AHashSet};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::address::Address;
use crate::behavior::Behavior;
use crate::config::StrategyConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::game_state::GameState;
use crate::grid::Grid;
use crate::snake::Snake;

/// Population-level orchestrator.
///
/// Every tick it forgets behaviors of vanished snakes, budgets kamikaze and
/// regular splits, then gives every snake a behavior and collects the
/// resulting intents, in that order.
pub struct MainStrategy {
    config: StrategyConfig,
    snake_strategies: AHashMap<String, Behavior>,
    saving_snakes: usize,
    /// Parents that already split this tick.
    split_parents: AHashSet<String>,
    kamikaze_splits: usize,
    sink: Box<dyn DiagnosticSink>,
    rng: StdRng,
}

impl MainStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            snake_strategies: AHashMap::new(),
            saving_snakes: 0,
            split_parents: AHashSet::new(),
            kamikaze_splits: 0,
            sink: Box::new(TracingSink),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn behavior(&self, snake: &str) -> Option<&Behavior> {
        self.snake_strategies.get(snake)
    }

    /// Snakes currently on their way home.
    pub fn saving_snakes(&self) -> usize {
        self.saving_snakes
    }

    pub fn sink(&mut self) -> &mut dyn DiagnosticSink {
        self.sink.as_mut()
    }

    pub fn update(&mut self, state: &mut GameState) -> Vec<Action> {
        self.split_parents.clear();
        self.kamikaze_splits = 0;
        self.clean_strategies(state);
        let mut actions = self.execute_kamikaze_strategies(state);
        actions.extend(self.execute_split_strategies(state));
        actions.extend(self.execute_snake_strategies(state));
        actions
    }

    pub fn inspect(&self, state: &GameState) -> String {
        state
            .snakes
            .iter()
            .map(|snake| {
                format!(
                    "[{}:{}] head={} strategy={}",
                    snake.name,
                    snake.len(),
                    snake.head().to_flat(),
                    self.snake_strategies
                        .get(&snake.name)
                        .map(Behavior::inspect)
                        .unwrap_or_else(|| "none".to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn retire_retreat(&mut self, state: &mut GameState, snake: &str) {
        self.sink.emit(Diagnostic::SnakeSaved {
            snake: snake.to_string(),
        });
        state.saved_snake();
        self.saving_snakes = self.saving_snakes.saturating_sub(1);
    }

    /// Drops behaviors whose snake left the roster. A vanished retreating
    /// snake made it home.
    fn clean_strategies(&mut self, state: &mut GameState) {
        let alive: AHashSet<&str> = state.snakes.iter().map(|s| s.name.as_str()).collect();
        let mut gone: Vec<String> = self
            .snake_strategies
            .keys()
            .filter(|name| !alive.contains(name.as_str()))
            .cloned()
            .collect();
        gone.sort();
        for name in gone {
            if let Some(behavior) = self.snake_strategies.remove(&name) {
                if behavior.is_retreat() {
                    self.retire_retreat(state, &name);
                }
                self.sink.emit(Diagnostic::StrategyDeleted { snake: name });
            }
        }
    }

    fn split_snake(&mut self, snake: &Snake, grid: &Grid, kamikaze: bool) -> Option<Action> {
        if self.split_parents.contains(&snake.name) {
            return None;
        }
        let kid = snake.get_kid(1, kamikaze);
        let next = grid.random_free_neighbour(
            kid.head(),
            self.config.split_search_attempts,
            &mut self.rng,
        )?;
        self.split_parents.insert(snake.name.clone());
        self.sink.emit(Diagnostic::Splitting {
            snake: snake.name.clone(),
            kamikaze,
        });
        Some(Action::Split {
            old_snake_name: snake.name.clone(),
            new_snake_name: kid.name,
            snake_segment: kid.segments.len(),
            next_location: next,
        })
    }

    fn execute_kamikaze_strategies(&mut self, state: &GameState) -> Vec<Action> {
        let kamikaze_count = state.snakes.iter().filter(|s| s.is_kamikaze()).count();
        let budget = self
            .config
            .desired_kamikaze_snakes
            .min(state.enemy_cell_count());
        let mut actions = Vec::new();
        for snake in &state.snakes {
            if kamikaze_count + self.kamikaze_splits >= budget {
                break;
            }
            if snake.len() > 1 && snake.len() >= self.config.kamikaze_length {
                if let Some(kid) = self.split_snake(snake, &state.grid, true) {
                    self.kamikaze_splits += 1;
                    actions.push(kid);
                }
            }
        }
        actions
    }

    fn execute_split_strategies(&mut self, state: &GameState) -> Vec<Action> {
        let food = state.food_manager.len();
        let cap = self.config.desired_main_snakes.min(food);
        let food_cap = food as f64 / self.config.food_per_snake;
        let mut actions = Vec::new();
        for snake in &state.snakes {
            let planned = state.snakes.len() + self.split_parents.len();
            if planned >= cap || planned as f64 >= food_cap {
                break;
            }
            if snake.len() > 1 {
                if let Some(kid) = self.split_snake(snake, &state.grid, false) {
                    actions.push(kid);
                }
            }
        }
        actions
    }

    /// Closest food to `head` that no other reach-target has locked.
    fn free_food(&self, state: &GameState, head: &Address) -> Option<Address> {
        let locked: AHashSet<&Address> = self
            .snake_strategies
            .values()
            .filter_map(Behavior::food_target)
            .collect();
        state
            .food_manager
            .closest(head, locked.len() + 1, Some(&state.start_address))
            .into_iter()
            .map(|food| food.address)
            .find(|food| !locked.contains(food))
    }

    fn execute_snake_strategies(&mut self, state: &mut GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        let names: Vec<String> = state.snakes.iter().map(|s| s.name.clone()).collect();
        for name in names {
            let Some((length, head, kamikaze)) = state
                .snake(&name)
                .map(|s| (s.len(), s.head().clone(), s.is_kamikaze()))
            else {
                continue;
            };

            // Random walkers get a fresh assignment every tick.
            let mut behavior = self
                .snake_strategies
                .remove(&name)
                .filter(|b| !b.is_random_walk());
            if let Some(current) = behavior.take() {
                match current.is_done(state) {
                    Some(reason) => {
                        self.sink.emit(Diagnostic::TargetDone {
                            snake: name.clone(),
                            reason: reason.to_string(),
                            was: current.inspect(),
                        });
                        if current.is_retreat() {
                            self.retire_retreat(state, &name);
                        }
                    }
                    None => behavior = Some(current),
                }
            }

            if behavior.is_none() && kamikaze {
                self.sink.emit(Diagnostic::AssignedKamikaze { snake: name.clone() });
                behavior = Some(Behavior::hunt(name.clone()));
            }

            if behavior.is_none() {
                if let Some(food) = self.free_food(state, &head) {
                    self.sink.emit(Diagnostic::NewFoodTarget {
                        snake: name.clone(),
                        food: food.clone(),
                    });
                    behavior = Some(Behavior::reach(name.clone(), food));
                }
            }

            if behavior.as_ref().is_some_and(|b| !b.is_retreat())
                && self.saving_snakes < self.config.max_saving_snakes
                && length > self.config.save_length
            {
                self.sink.emit(Diagnostic::TooLongSaving { snake: name.clone() });
                if matches!(behavior, Some(Behavior::HuntEnemy(_))) {
                    if let Some(snake) = state.snake_mut(&name) {
                        snake.target = None;
                    }
                }
                behavior = Some(Behavior::retreat(name.clone(), state.start_address.clone()));
                self.saving_snakes += 1;
            }

            if behavior.is_none() {
                if self.saving_snakes >= self.config.idle_retreat_limit {
                    self.sink.emit(Diagnostic::TooManySaving { snake: name.clone() });
                } else {
                    self.sink.emit(Diagnostic::IdleSaving { snake: name.clone() });
                    behavior = Some(Behavior::retreat(name.clone(), state.start_address.clone()));
                    self.saving_snakes += 1;
                }
            }

            let mut behavior = behavior.unwrap_or_else(|| {
                Behavior::random_walk(name.clone(), self.config.random_walk_attempts)
            });
            actions.extend(behavior.update(state, &mut self.rng, self.sink.as_mut()));
            self.snake_strategies.insert(name, behavior);
        }
        actions
    }
}
