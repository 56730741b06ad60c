use ahash::AHashSet;

use crate::address::{Address, distance};

/// A food cell together with its distance from the queried point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodState {
    pub address: Address,
    pub distance: u32,
}

/// The set of food-bearing cells, kept in sync with incoming cell deltas.
#[derive(Debug, Clone, Default)]
pub struct FoodManager {
    foods: AHashSet<Address>,
}

impl FoodManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_food(&mut self, address: Address) {
        self.foods.insert(address);
    }

    pub fn remove_food(&mut self, address: &Address) {
        self.foods.remove(address);
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.foods.contains(address)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Up to `k` food cells closest to `point`, nearest first. Ties are broken
    /// by address so the order is stable across hash seeds.
    pub fn closest(&self, point: &Address, k: usize, exclude: Option<&Address>) -> Vec<FoodState> {
        let mut found: Vec<FoodState> = self
            .foods
            .iter()
            .filter(|food| Some(*food) != exclude)
            .map(|food| FoodState {
                distance: distance(point, food),
                address: food.clone(),
            })
            .collect();
        found.sort_unstable_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| a.address.cmp(&b.address))
        });
        found.truncate(k);
        found
    }
}
