//! Snake Gym - a local arena for benchmarking hydra agents

pub mod agents;
pub mod arena;
pub mod runner;
pub mod stats;

pub use agents::AgentType;
pub use arena::Arena;
pub use hydra::Agent;
pub use runner::{GameConfig, run_game, run_tournament, run_tournament_parallel};
pub use stats::{AgentStats, GameResult, HeadToHeadStats, TournamentStats};
