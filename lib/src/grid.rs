use ahash::AHashMap;
use rand::Rng;

use crate::address::Address;

/// A single grid cell as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub address: Address,
    pub has_food: bool,
    /// Owning player, `None` when unowned.
    pub player: Option<String>,
    /// Set while validating our roster against the grid, cleared every tick.
    claimed: bool,
}

impl Cell {
    pub fn new(address: Address, has_food: bool, player: Option<String>) -> Self {
        Self {
            address,
            has_food,
            player: player.filter(|p| !p.is_empty()),
            claimed: false,
        }
    }

    pub fn empty(address: Address) -> Self {
        Self::new(address, false, None)
    }

    pub fn is_owned_by(&self, player: &str) -> bool {
        self.player.as_deref() == Some(player)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}

/// Sparse N-dimensional grid. Cells never reported are unowned and empty.
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: Vec<i32>,
    cells: AHashMap<Address, Cell>,
}

impl Grid {
    pub fn new(dimensions: Vec<i32>) -> Self {
        Self {
            dimensions,
            cells: AHashMap::new(),
        }
    }

    pub fn dimensions(&self) -> &[i32] {
        &self.dimensions
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn check_bounds(&self, address: &Address) -> bool {
        address
            .iter()
            .zip(self.dimensions.iter())
            .all(|(c, size)| (0..*size).contains(c))
    }

    pub fn get_cell(&self, address: &Address) -> Cell {
        self.cells
            .get(address)
            .cloned()
            .unwrap_or_else(|| Cell::empty(address.clone()))
    }

    pub fn has_food(&self, address: &Address) -> bool {
        self.cells.get(address).is_some_and(|c| c.has_food)
    }

    pub fn owner(&self, address: &Address) -> Option<&str> {
        self.cells.get(address).and_then(|c| c.player.as_deref())
    }

    pub fn set_cell(&mut self, address: Address, cell: Cell) {
        self.cells.insert(address, cell);
    }

    pub fn clear_own_marks(&mut self) {
        self.cells.values_mut().for_each(|cell| cell.claimed = false);
    }

    /// Marks a cell as held by our roster, creating it if it was never reported.
    pub(crate) fn mark_as_ours(&mut self, address: &Address) -> &Cell {
        let cell = self
            .cells
            .entry(address.clone())
            .or_insert_with(|| Cell::empty(address.clone()));
        cell.claimed = true;
        cell
    }

    pub fn is_cell_available(&self, address: &Address) -> bool {
        self.check_bounds(address)
            && self
                .cells
                .get(address)
                .is_none_or(|c| c.player.is_none() && !c.claimed)
    }

    pub fn filter_available(&self, addresses: Vec<Address>) -> Vec<Address> {
        addresses
            .into_iter()
            .filter(|addr| self.is_cell_available(addr))
            .collect()
    }

    /// Tries up to `attempts` random single-axis neighbours of `address` and
    /// returns the first one that is in bounds and unowned.
    pub fn random_free_neighbour<R: Rng + ?Sized>(
        &self,
        address: &Address,
        attempts: usize,
        rng: &mut R,
    ) -> Option<Address> {
        if self.dimensions.is_empty() {
            return None;
        }
        (0..attempts).find_map(|_| {
            let axis = rng.random_range(0..self.dimensions.len());
            let delta = if rng.random_bool(0.5) { 1 } else { -1 };
            let candidate = address.offset(axis, delta);
            (self.check_bounds(&candidate) && self.owner(&candidate).is_none())
                .then_some(candidate)
        })
    }
}
