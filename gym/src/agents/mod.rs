use clap::ValueEnum;
use hydra::{Address, Agent, MainStrategy, RandomAgent, StrategyConfig, SwarmAgent};

/// Every agent flavour the gym knows how to field.
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum AgentType {
    Swarm,
    Aggressive,
    Hoarder,
    Random,
}

impl AgentType {
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::Swarm => "Swarm",
            AgentType::Aggressive => "Aggressive",
            AgentType::Hoarder => "Hoarder",
            AgentType::Random => "Random",
        }
    }

    fn config(&self) -> StrategyConfig {
        match self {
            AgentType::Aggressive => StrategyConfig::aggressive(),
            AgentType::Hoarder => StrategyConfig::hoarder(),
            _ => StrategyConfig::default(),
        }
    }

    /// Agents keep per-game state, so a fresh one is built for every game.
    pub fn create(
        &self,
        player: &str,
        dimensions: Vec<i32>,
        home: Address,
        seed: u64,
    ) -> Box<dyn Agent> {
        match self {
            AgentType::Random => Box::new(RandomAgent::new(player, dimensions, home).with_seed(seed)),
            _ => {
                let config = self.config();
                let strategy = MainStrategy::new(config.clone()).with_seed(seed);
                Box::new(
                    SwarmAgent::new(player, dimensions, home, config)
                        .with_strategy(strategy)
                        .with_name(self.label()),
                )
            }
        }
    }
}
