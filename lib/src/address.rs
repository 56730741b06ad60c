use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A coordinate on the N-dimensional grid, one component per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Vec<i32>);

impl Address {
    pub fn new(coords: Vec<i32>) -> Self {
        Self(coords)
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// Canonical flat key, e.g. `3,0,7`.
    pub fn to_flat(&self) -> String {
        self.0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Copy of this address moved by `delta` along `axis`.
    pub fn offset(&self, axis: usize, delta: i32) -> Self {
        let mut coords = self.0.clone();
        coords[axis] += delta;
        Self(coords)
    }
}

impl Deref for Address {
    type Target = [i32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<i32>> for Address {
    fn from(coords: Vec<i32>) -> Self {
        Self(coords)
    }
}

impl<const N: usize> From<[i32; N]> for Address {
    fn from(coords: [i32; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_flat())
    }
}

/// Manhattan distance between two addresses
pub fn distance(a: &Address, b: &Address) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .sum()
}

/// Single-axis ±1 steps from `from` that bring it closer to `to`.
pub fn next_steps(from: &Address, to: &Address) -> Vec<Address> {
    from.iter()
        .zip(to.iter())
        .enumerate()
        .filter(|(_, (f, t))| f != t)
        .map(|(axis, (f, t))| from.offset(axis, if t > f { 1 } else { -1 }))
        .collect()
}

/// Every single-axis ±1 step from `from`. The target only fixes the
/// dimensionality, so it can serve as a fallback for [`next_steps`].
pub fn all_steps(from: &Address, _to: &Address) -> Vec<Address> {
    (0..from.dimensions())
        .flat_map(|axis| [from.offset(axis, 1), from.offset(axis, -1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(distance(&[0, 0].into(), &[3, 4].into()), 7);
        assert_eq!(distance(&[5, 5].into(), &[5, 5].into()), 0);
        assert_eq!(distance(&[1, -2, 3].into(), &[0, 2, 3].into()), 5);
    }

    #[test]
    fn test_next_steps_only_reduce_distance() {
        let from: Address = [2, 2, 2].into();
        let to: Address = [4, 2, 0].into();
        let steps = next_steps(&from, &to);
        assert_eq!(steps, vec![Address::from([3, 2, 2]), Address::from([2, 2, 1])]);
        for step in &steps {
            assert!(distance(step, &to) < distance(&from, &to));
        }
    }

    #[test]
    fn test_next_steps_at_target_is_empty() {
        let here: Address = [1, 1].into();
        assert!(next_steps(&here, &here).is_empty());
    }

    #[test]
    fn test_all_steps_covers_every_axis() {
        let steps = all_steps(&[0, 0, 0].into(), &[1, 1, 1].into());
        assert_eq!(steps.len(), 6);
        assert!(steps.contains(&[-1, 0, 0].into()));
        assert!(steps.contains(&[0, 0, 1].into()));
    }

    #[test]
    fn test_flat_key_and_display() {
        let addr: Address = [3, 0, 7].into();
        assert_eq!(addr.to_flat(), "3,0,7");
        assert_eq!(addr.to_string(), "[3,0,7]");
    }
}
