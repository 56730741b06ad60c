use ahash::{AHashMap, AHashSet};

use crate::action::Action;
use crate::address::Address;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::food::FoodManager;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;
use crate::wire::{CellUpdate, StateMessage, UpdateMessage};

/// Our authoritative local view of the game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub snakes: Vec<Snake>,
    pub player_name: String,
    pub start_address: Address,
    pub food_manager: FoodManager,
    pub saved_snakes: usize,
    pub enemy_cell_counts: AHashMap<String, usize>,
    pub enemy_heads: AHashMap<String, Vec<Address>>,
}

impl GameState {
    /// A fresh game with a single one-segment snake, named after the player,
    /// sitting on the start address.
    pub fn new(dimensions: Vec<i32>, start_address: Address, player_name: impl Into<String>) -> Self {
        let player_name = player_name.into();
        Self {
            grid: Grid::new(dimensions),
            snakes: vec![Snake::new(player_name.clone(), vec![start_address.clone()])],
            player_name,
            start_address,
            food_manager: FoodManager::new(),
            saved_snakes: 0,
            enemy_cell_counts: AHashMap::new(),
            enemy_heads: AHashMap::new(),
        }
    }

    pub fn get_cell(&self, address: &Address) -> Cell {
        self.grid.get_cell(address)
    }

    pub fn saved_snake(&mut self) {
        self.saved_snakes += 1;
    }

    pub fn snake(&self, name: &str) -> Option<&Snake> {
        self.snakes.iter().find(|snake| snake.name == name)
    }

    pub fn snake_mut(&mut self, name: &str) -> Option<&mut Snake> {
        self.snakes.iter_mut().find(|snake| snake.name == name)
    }

    /// Total number of cells held by other players.
    pub fn enemy_cell_count(&self) -> usize {
        self.enemy_cell_counts.values().sum()
    }

    fn apply_cell(&mut self, update: &CellUpdate) -> Cell {
        let has_food = update.food_value > 0;
        let cell = Cell::new(
            update.address.clone(),
            has_food,
            Some(update.player.clone()),
        );
        self.grid.set_cell(update.address.clone(), cell.clone());
        if has_food {
            self.food_manager.add_food(update.address.clone());
        } else {
            self.food_manager.remove_food(&update.address);
        }
        cell
    }

    /// Applies a snapshot without touching any derived aggregate.
    pub fn set_state(&mut self, state: &StateMessage) {
        for updated in &state.updated_cells {
            self.apply_cell(updated);
        }
    }

    /// Applies a tick delta and recomputes the enemy aggregates.
    pub fn update(&mut self, update: &UpdateMessage, sink: &mut dyn DiagnosticSink) {
        self.enemy_heads = AHashMap::new();
        self.grid.clear_own_marks();
        for updated in &update.updated_cells {
            let cell = self.apply_cell(updated);
            if let Some(player) = cell.player.filter(|p| *p != self.player_name) {
                self.enemy_heads
                    .entry(player)
                    .or_default()
                    .push(cell.address);
            }
        }

        if !update.removed_snakes.is_empty() {
            let removed: AHashSet<&str> =
                update.removed_snakes.iter().map(String::as_str).collect();
            let before = self.snakes.len();
            let player_name = &self.player_name;
            self.snakes.retain(|snake| {
                !removed.contains(format!("{player_name}:{}", snake.name).as_str())
            });
            sink.emit(Diagnostic::SnakesRemoved {
                before,
                after: self.snakes.len(),
            });
        }

        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for player in self.grid.cells().filter_map(|cell| cell.player.as_deref()) {
            if player != self.player_name {
                *counts.entry(player.to_string()).or_default() += 1;
            }
        }
        self.enemy_cell_counts = counts;
        sink.emit(Diagnostic::EnemyScan {
            enemy_cells: self.enemy_cell_count(),
            enemy_players: self.enemy_cell_counts.len(),
        });
    }

    /// Cross-checks the roster against grid ownership, leaving every roster
    /// segment marked as ours. Returns one message per mismatch.
    pub fn validate_snakes(&mut self) -> Vec<String> {
        let mut result = Vec::new();
        self.grid.clear_own_marks();
        for snake in &self.snakes {
            for segment in &snake.segments {
                let cell = self.grid.mark_as_ours(segment);
                if !cell.is_owned_by(&self.player_name) {
                    result.push(format!(
                        "[{}] contains a cell ({}) that is not us but {}.",
                        snake.name,
                        segment.to_flat(),
                        cell.player.as_deref().unwrap_or("nobody")
                    ));
                }
            }
        }
        let mut mismatched: Vec<&Cell> = self
            .grid
            .cells()
            .filter(|cell| cell.is_owned_by(&self.player_name) != cell.is_claimed())
            .collect();
        mismatched.sort_by(|a, b| a.address.cmp(&b.address));
        for cell in mismatched {
            if cell.is_claimed() {
                result.push(format!(
                    "Cell {} is marked as ours but owned by {}.",
                    cell.address.to_flat(),
                    cell.player.as_deref().unwrap_or("nobody")
                ));
            } else {
                result.push(format!(
                    "Cell {} is not marked as ours but owned by us.",
                    cell.address.to_flat()
                ));
            }
        }
        result
    }

    /// Advances the local roster in the given order. Growth is decided by the
    /// food on the destination before anything moves.
    pub fn apply_actions(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::Move {
                    snake_name,
                    next_location,
                } => {
                    let grow = self.grid.has_food(next_location);
                    if let Some(snake) = self.snake_mut(snake_name) {
                        snake.apply_move(next_location.clone(), grow);
                    }
                }
                Action::Split {
                    old_snake_name,
                    next_location,
                    ..
                } => {
                    let grow_kid = self.grid.has_food(next_location);
                    let kid = self
                        .snake_mut(old_snake_name)
                        .and_then(|snake| snake.apply_split(action, grow_kid));
                    if let Some(kid) = kid {
                        self.snakes.push(kid);
                    }
                }
            }
        }
    }
}
