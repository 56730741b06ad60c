pub mod action;
pub mod address;
pub mod agent;
pub mod behavior;
pub mod config;
pub mod diagnostics;
pub mod food;
pub mod game_state;
pub mod grid;
pub mod snake;
pub mod strategy;
pub mod wire;

pub use action::Action;
pub use address::Address;
pub use agent::{Agent, RandomAgent, SwarmAgent};
pub use config::StrategyConfig;
pub use game_state::GameState;
pub use strategy::MainStrategy;
pub use wire::{CellUpdate, StateMessage, UpdateMessage, decode_state, decode_update};
