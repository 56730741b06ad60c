use hydra::{Action, Agent, UpdateMessage};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::agents::AgentType;
use crate::arena::Arena;
use crate::stats::GameResult;

/// Configuration for game generation
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub dimensions: Vec<i32>,
    pub num_players: usize,
    /// Food cells kept on the board at all times
    pub food: usize,
    pub max_ticks: u32,
    /// Seed of the first game; game `n` of a tournament uses `seed + n`
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimensions: vec![20, 20],
            num_players: 4,
            food: 30,
            max_ticks: 300,
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn duel() -> Self {
        Self {
            num_players: 2,
            food: 20,
            ..Default::default()
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_dimensions(mut self, dimensions: Vec<i32>) -> Self {
        self.dimensions = dimensions;
        self
    }
}

/// Runs a single game with fresh agents of the given types
pub fn run_game(agent_types: &[AgentType], config: &GameConfig, seed: u64) -> GameResult {
    assert!(
        agent_types.len() >= config.num_players,
        "Need at least {} agents for {} players",
        config.num_players,
        config.num_players
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = (0..config.num_players).map(|i| format!("player{i}")).collect();
    let mut arena = Arena::new(config.dimensions.clone(), &names, config.food, &mut rng);

    let mut agents: Vec<Box<dyn Agent>> = arena
        .players()
        .iter()
        .zip(agent_types)
        .enumerate()
        .map(|(i, (player, agent_type))| {
            agent_type.create(
                &player.name,
                config.dimensions.clone(),
                player.home.clone(),
                seed.wrapping_add(i as u64 + 1),
            )
        })
        .collect();

    let snapshot = arena.snapshot();
    for agent in &mut agents {
        agent.on_state(&snapshot);
    }

    let mut update = UpdateMessage::default();
    let mut tick = 0;
    while !arena.is_over() && tick < config.max_ticks {
        let actions: Vec<Vec<Action>> = agents
            .iter_mut()
            .map(|agent| agent.on_update(&update))
            .collect();
        update = arena.step(&actions, &mut rng);
        tick += 1;
    }

    GameResult::from_arena(&arena, tick)
}

/// Run multiple games and collect results
pub fn run_tournament(
    agent_types: &[AgentType],
    config: &GameConfig,
    num_games: usize,
) -> Vec<GameResult> {
    (0..num_games)
        .map(|n| run_game(agent_types, config, config.seed.wrapping_add(n as u64)))
        .collect()
}

/// Run multiple games in parallel
pub fn run_tournament_parallel(
    agent_types: &[AgentType],
    config: &GameConfig,
    num_games: usize,
) -> Vec<GameResult> {
    use rayon::prelude::*;

    (0..num_games)
        .into_par_iter()
        .map(|n| run_game(agent_types, config, config.seed.wrapping_add(n as u64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GameConfig {
        GameConfig {
            dimensions: vec![8, 8],
            num_players: 2,
            food: 6,
            max_ticks: 40,
            seed: 5,
        }
    }

    #[test]
    fn test_game_finishes_within_tick_limit() {
        let result = run_game(&[AgentType::Swarm, AgentType::Random], &small(), 5);
        assert!(result.ticks <= 40);
        assert_eq!(result.num_players, 2);
        assert_eq!(result.scores.len(), 2);
        assert_eq!(result.saved.len(), 2);
        if let Some(winner) = result.winner {
            assert!(result.scores[winner] > 0);
        }
    }

    #[test]
    fn test_three_dimensional_game() {
        let config = small().with_dimensions(vec![5, 5, 5]);
        let result = run_game(&[AgentType::Hoarder, AgentType::Aggressive], &config, 9);
        assert!(result.ticks <= config.max_ticks);
    }

    #[test]
    fn test_tournaments_run_every_game() {
        let config = small().with_max_ticks(10);
        let agents = [AgentType::Swarm, AgentType::Random];
        assert_eq!(run_tournament(&agents, &config, 3).len(), 3);
        assert_eq!(run_tournament_parallel(&agents, &config, 4).len(), 4);
    }

    #[test]
    #[should_panic(expected = "Need at least")]
    fn test_missing_agents_panics() {
        run_game(&[AgentType::Swarm], &small(), 0);
    }
}
