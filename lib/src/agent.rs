use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::address::Address;
use crate::behavior::Behavior;
use crate::config::StrategyConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::game_state::GameState;
use crate::strategy::MainStrategy;
use crate::wire::{StateMessage, UpdateMessage};

/// Trait that defines a player's decision-making interface.
pub trait Agent: Send {
    /// Returns the name of this agent for display purposes.
    fn name(&self) -> &str;

    /// Ingest the initial snapshot of a game.
    fn on_state(&mut self, state: &StateMessage);

    /// Ingest a tick update and decide this tick's actions.
    fn on_update(&mut self, update: &UpdateMessage) -> Vec<Action>;

    /// Snakes this agent brought home so far.
    fn saved_snakes(&self) -> usize;
}

impl Agent for Box<dyn Agent> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_state(&mut self, state: &StateMessage) {
        (**self).on_state(state)
    }

    fn on_update(&mut self, update: &UpdateMessage) -> Vec<Action> {
        (**self).on_update(update)
    }

    fn saved_snakes(&self) -> usize {
        (**self).saved_snakes()
    }
}

/// The full orchestrator: splits, hunts, feeds and saves its snakes.
pub struct SwarmAgent {
    name: String,
    state: GameState,
    strategy: MainStrategy,
}

impl SwarmAgent {
    pub fn new(
        player: impl Into<String>,
        dimensions: Vec<i32>,
        home: Address,
        config: StrategyConfig,
    ) -> Self {
        let player = player.into();
        Self {
            name: "Swarm".to_string(),
            state: GameState::new(dimensions, home, player),
            strategy: MainStrategy::new(config),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_strategy(mut self, strategy: MainStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn strategy(&self) -> &MainStrategy {
        &self.strategy
    }

    pub fn inspect(&self) -> String {
        self.strategy.inspect(&self.state)
    }
}

impl Agent for SwarmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_state(&mut self, state: &StateMessage) {
        self.state.set_state(state);
    }

    fn on_update(&mut self, update: &UpdateMessage) -> Vec<Action> {
        self.state.update(update, self.strategy.sink());
        for problem in self.state.validate_snakes() {
            self.strategy.sink().emit(Diagnostic::Inconsistency(problem));
        }
        let actions = self.strategy.update(&mut self.state);
        self.state.apply_actions(&actions);
        actions
    }

    fn saved_snakes(&self) -> usize {
        self.state.saved_snakes
    }
}

/// Never splits, never hunts: every snake just wanders.
/// Useful as a baseline for benchmarking.
pub struct RandomAgent {
    name: String,
    state: GameState,
    rng: StdRng,
    sink: TracingSink,
}

impl RandomAgent {
    pub fn new(player: impl Into<String>, dimensions: Vec<i32>, home: Address) -> Self {
        Self {
            name: "Random".to_string(),
            state: GameState::new(dimensions, home, player),
            rng: StdRng::from_os_rng(),
            sink: TracingSink,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_state(&mut self, state: &StateMessage) {
        self.state.set_state(state);
    }

    fn on_update(&mut self, update: &UpdateMessage) -> Vec<Action> {
        self.state.update(update, &mut self.sink);
        self.state.validate_snakes();
        let names: Vec<String> = self.state.snakes.iter().map(|s| s.name.clone()).collect();
        let mut actions = Vec::new();
        for name in names {
            let mut walk = Behavior::random_walk(name, 10);
            actions.extend(walk.update(&mut self.state, &mut self.rng, &mut self.sink));
        }
        self.state.apply_actions(&actions);
        actions
    }

    fn saved_snakes(&self) -> usize {
        self.state.saved_snakes
    }
}
