use std::collections::BTreeSet;

use hydra::address::distance;
use hydra::grid::{Cell, Grid};
use hydra::snake::Snake;
use hydra::{Action, Address, CellUpdate, StateMessage, UpdateMessage};
use rand::Rng;

/// One competitor as the arena sees it.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub home: Address,
    pub snakes: Vec<Snake>,
    /// Total length of all snakes brought home.
    pub score: usize,
    pub saved: usize,
    pub lost: usize,
}

impl Player {
    fn new(name: String, home: Address) -> Self {
        Self {
            snakes: vec![Snake::new(name.clone(), vec![home.clone()])],
            name,
            home,
            score: 0,
            saved: 0,
            lost: 0,
        }
    }
}

/// Authoritative world for a local game.
///
/// Rules:
/// - a move must go to a single-axis neighbour inside the grid, otherwise the mover dies
/// - running into an owned cell kills the mover
/// - a free home cell saves the snake that enters it and banks its length
/// - food under the new head makes the snake grow
/// - a split child must land on a free neighbour of the parent's tail, or it dies
pub struct Arena {
    grid: Grid,
    players: Vec<Player>,
    food_target: usize,
    changed: BTreeSet<Address>,
    removed: Vec<String>,
}

impl Arena {
    /// Places every player on a distinct random home and spawns the initial food.
    pub fn new<R: Rng + ?Sized>(
        dimensions: Vec<i32>,
        player_names: &[String],
        food_target: usize,
        rng: &mut R,
    ) -> Self {
        let volume: i64 = dimensions.iter().map(|d| i64::from(*d)).product();
        assert!(
            !dimensions.is_empty() && volume > player_names.len() as i64,
            "Grid {:?} is too small for {} players",
            dimensions,
            player_names.len()
        );

        let mut homes: Vec<Address> = Vec::with_capacity(player_names.len());
        while homes.len() < player_names.len() {
            let candidate = random_address(&dimensions, rng);
            if !homes.contains(&candidate) {
                homes.push(candidate);
            }
        }
        let players: Vec<(String, Address)> = player_names.iter().cloned().zip(homes).collect();

        let mut arena = Self::with_homes(dimensions, &players, food_target);
        arena.spawn_food(rng);
        arena.changed.clear();
        arena
    }

    /// Arena with fixed homes and no food yet.
    pub fn with_homes(dimensions: Vec<i32>, players: &[(String, Address)], food_target: usize) -> Self {
        let mut arena = Self {
            grid: Grid::new(dimensions),
            players: Vec::with_capacity(players.len()),
            food_target,
            changed: BTreeSet::new(),
            removed: Vec::new(),
        };
        for (index, (name, home)) in players.iter().enumerate() {
            arena.players.push(Player::new(name.clone(), home.clone()));
            arena.claim(home, index);
        }
        arena.changed.clear();
        arena
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn dimensions(&self) -> &[i32] {
        self.grid.dimensions()
    }

    pub fn owner(&self, address: &Address) -> Option<&str> {
        self.grid.owner(address)
    }

    pub fn has_food(&self, address: &Address) -> bool {
        self.grid.has_food(address)
    }

    pub fn food_count(&self) -> usize {
        self.grid.cells().filter(|c| c.has_food).count()
    }

    pub fn is_over(&self) -> bool {
        self.players.iter().all(|p| p.snakes.is_empty())
    }

    pub fn scores(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.score).collect()
    }

    /// Every non-empty cell, sent to agents when the game starts.
    pub fn snapshot(&self) -> StateMessage {
        let mut addresses: Vec<&Address> = self
            .grid
            .cells()
            .filter(|c| c.has_food || c.player.is_some())
            .map(|c| &c.address)
            .collect();
        addresses.sort();
        StateMessage {
            updated_cells: addresses.into_iter().map(|a| self.cell_update(a)).collect(),
        }
    }

    pub fn add_food(&mut self, address: Address) {
        self.grid
            .set_cell(address.clone(), Cell::new(address.clone(), true, None));
        self.changed.insert(address);
    }

    /// Applies each player's actions in player order, tops up food and
    /// returns what changed since the previous tick.
    pub fn step<R: Rng + ?Sized>(&mut self, actions: &[Vec<Action>], rng: &mut R) -> UpdateMessage {
        for (player, actions) in actions.iter().enumerate().take(self.players.len()) {
            for action in actions {
                match action {
                    Action::Move {
                        snake_name,
                        next_location,
                    } => self.apply_move(player, snake_name, next_location),
                    Action::Split { .. } => self.apply_split(player, action),
                }
            }
        }
        self.spawn_food(rng);
        self.drain_update()
    }

    fn apply_move(&mut self, player: usize, snake_name: &str, to: &Address) {
        let Some(index) = self.snake_index(player, snake_name) else {
            return;
        };
        let head = self.players[player].snakes[index].head().clone();
        if !self.in_bounds(to) || distance(&head, to) != 1 {
            self.kill(player, index);
            return;
        }
        if self.grid.owner(to).is_some() {
            self.kill(player, index);
            return;
        }
        if *to == self.players[player].home {
            self.save(player, index);
            return;
        }

        let grow = self.grid.has_food(to);
        let tail = self.players[player].snakes[index].segments.last().cloned();
        self.claim(to, player);
        self.players[player].snakes[index].apply_move(to.clone(), grow);
        if !grow {
            if let Some(tail) = tail {
                self.release(&tail);
            }
        }
    }

    fn apply_split(&mut self, player: usize, action: &Action) {
        let Action::Split {
            old_snake_name,
            new_snake_name,
            snake_segment,
            next_location,
        } = action
        else {
            return;
        };
        let Some(index) = self.snake_index(player, old_snake_name) else {
            return;
        };
        if self.snake_index(player, new_snake_name).is_some() {
            return;
        }
        let parent = &self.players[player].snakes[index];
        if *snake_segment == 0 || *snake_segment >= parent.len() {
            return;
        }
        let keep = parent.len() - snake_segment;
        let kid_head = parent.segments[parent.len() - 1].clone();
        let kid_tail = parent.segments[keep].clone();

        let free = self.in_bounds(next_location)
            && distance(&kid_head, next_location) == 1
            && self.grid.owner(next_location).is_none();
        if !free {
            let detached = self.players[player].snakes[index].segments.split_off(keep);
            for cell in &detached {
                self.release(cell);
            }
            self.players[player].lost += 1;
            let removed = format!("{}:{}", self.players[player].name, new_snake_name);
            self.removed.push(removed);
            return;
        }

        let grow = self.grid.has_food(next_location);
        self.claim(next_location, player);
        let kid = self.players[player].snakes[index].apply_split(action, grow);
        if let Some(kid) = kid {
            if !grow {
                self.release(&kid_tail);
            }
            self.players[player].snakes.push(kid);
        }
    }

    fn kill(&mut self, player: usize, index: usize) {
        let snake = self.players[player].snakes.remove(index);
        for cell in &snake.segments {
            self.release(cell);
        }
        self.players[player].lost += 1;
        let removed = format!("{}:{}", self.players[player].name, snake.name);
        self.removed.push(removed);
    }

    fn save(&mut self, player: usize, index: usize) {
        let snake = self.players[player].snakes.remove(index);
        for cell in &snake.segments {
            self.release(cell);
        }
        let state = &mut self.players[player];
        state.score += snake.len();
        state.saved += 1;
        self.removed.push(format!("{}:{}", state.name, snake.name));
    }

    fn spawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut missing = self.food_target.saturating_sub(self.food_count());
        let mut attempts = self.food_target * 10;
        while missing > 0 && attempts > 0 {
            attempts -= 1;
            let candidate = random_address(self.grid.dimensions(), rng);
            if self.grid.owner(&candidate).is_none()
                && !self.grid.has_food(&candidate)
                && self.players.iter().all(|p| p.home != candidate)
            {
                self.add_food(candidate);
                missing -= 1;
            }
        }
    }

    fn drain_update(&mut self) -> UpdateMessage {
        let changed = std::mem::take(&mut self.changed);
        UpdateMessage {
            updated_cells: changed.iter().map(|a| self.cell_update(a)).collect(),
            removed_snakes: std::mem::take(&mut self.removed),
        }
    }

    fn cell_update(&self, address: &Address) -> CellUpdate {
        let cell = self.grid.get_cell(address);
        CellUpdate::new(
            address.clone(),
            u32::from(cell.has_food),
            cell.player.unwrap_or_default(),
        )
    }

    fn claim(&mut self, address: &Address, player: usize) {
        let name = self.players[player].name.clone();
        self.grid
            .set_cell(address.clone(), Cell::new(address.clone(), false, Some(name)));
        self.changed.insert(address.clone());
    }

    fn release(&mut self, address: &Address) {
        self.grid
            .set_cell(address.clone(), Cell::empty(address.clone()));
        self.changed.insert(address.clone());
    }

    fn snake_index(&self, player: usize, name: &str) -> Option<usize> {
        self.players[player].snakes.iter().position(|s| s.name == name)
    }

    fn in_bounds(&self, address: &Address) -> bool {
        address.dimensions() == self.grid.dimensions().len() && self.grid.check_bounds(address)
    }
}

fn random_address<R: Rng + ?Sized>(dimensions: &[i32], rng: &mut R) -> Address {
    dimensions
        .iter()
        .map(|size| rng.random_range(0..*size))
        .collect::<Vec<_>>()
        .into()
}
