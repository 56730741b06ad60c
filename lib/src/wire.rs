use color_eyre::eyre::{WrapErr, ensure};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// One reported cell: where it is, how much food it holds and who owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub address: Address,
    #[serde(default)]
    pub food_value: u32,
    /// Empty string or absent means unowned.
    #[serde(default)]
    pub player: String,
}

impl CellUpdate {
    pub fn new(address: impl Into<Address>, food_value: u32, player: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            food_value,
            player: player.into(),
        }
    }
}

/// Full (or partial) authoritative snapshot, sent once when a game starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(default)]
    pub updated_cells: Vec<CellUpdate>,
}

/// Per-tick delta.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMessage {
    #[serde(default)]
    pub updated_cells: Vec<CellUpdate>,
    /// Composite `player:snakeName` identifiers of snakes that left the game.
    #[serde(default)]
    pub removed_snakes: Vec<String>,
}

pub fn decode_update(mut text: String) -> color_eyre::Result<UpdateMessage> {
    let update = unsafe { simd_json::serde::from_str(&mut text) }
        .wrap_err("could not decode update message")?;
    Ok(update)
}

pub fn decode_state(mut text: String) -> color_eyre::Result<StateMessage> {
    let state = unsafe { simd_json::serde::from_str(&mut text) }
        .wrap_err("could not decode state message")?;
    Ok(state)
}

/// Rejects cells whose address does not match the grid dimensionality.
pub fn validate_cells(cells: &[CellUpdate], dimensions: usize) -> color_eyre::Result<()> {
    for cell in cells {
        ensure!(
            cell.address.dimensions() == dimensions,
            "cell {} has {} coordinates, expected {}",
            cell.address,
            cell.address.dimensions(),
            dimensions
        );
    }
    Ok(())
}
