use color_eyre::eyre::{ensure, eyre, WrapErr};
use dashmap::DashMap;
use hydra::wire::validate_cells;
use hydra::{Action, Address, Agent, StateMessage, StrategyConfig, SwarmAgent, UpdateMessage};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub game_id: String,
    pub player: String,
    pub dimensions: Vec<i32>,
    pub home: Address,
    #[serde(default)]
    pub config: StrategyConfig,
    #[serde(default)]
    pub state: StateMessage,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub game_id: String,
    pub update: UpdateMessage,
}

#[derive(Debug, Deserialize)]
pub struct EndRequest {
    pub game_id: String,
}

pub fn decode<T: for<'de> Deserialize<'de>>(mut text: String) -> color_eyre::Result<T> {
    let decoded = unsafe { simd_json::serde::from_str(&mut text) }
        .wrap_err("could not decode request body")?;
    Ok(decoded)
}

/// Running games, keyed by game id.
#[derive(Default)]
pub struct Sessions {
    games: DashMap<String, SwarmAgent>,
}

impl Sessions {
    pub fn start(&self, request: StartRequest) -> color_eyre::Result<()> {
        let dimensions = request.dimensions.len();
        ensure!(dimensions > 0, "grid needs at least one dimension");
        ensure!(
            request.home.dimensions() == dimensions,
            "home {} does not fit a {}-dimensional grid",
            request.home,
            dimensions
        );
        validate_cells(&request.state.updated_cells, dimensions)?;

        let mut agent = SwarmAgent::new(
            request.player.clone(),
            request.dimensions,
            request.home,
            request.config,
        )
        .with_name(request.player);
        agent.on_state(&request.state);
        info!(game_id = %request.game_id, "Game started");
        self.games.insert(request.game_id, agent);
        Ok(())
    }

    pub fn update(&self, request: UpdateRequest) -> color_eyre::Result<Vec<Action>> {
        let mut agent = self
            .games
            .get_mut(&request.game_id)
            .ok_or_else(|| eyre!("unknown game {}", request.game_id))?;
        validate_cells(
            &request.update.updated_cells,
            agent.state().grid.dimensions().len(),
        )?;
        Ok(agent.on_update(&request.update))
    }

    pub fn end(&self, request: EndRequest) -> color_eyre::Result<usize> {
        let (_, agent) = self
            .games
            .remove(&request.game_id)
            .ok_or_else(|| eyre!("unknown game {}", request.game_id))?;
        info!(
            game_id = %request.game_id,
            saved = agent.saved_snakes(),
            "Game ended"
        );
        Ok(agent.saved_snakes())
    }

    pub fn contains(&self, game_id: &str) -> bool {
        self.games.contains_key(game_id)
    }
}
