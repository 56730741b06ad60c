use crate::action::Action;
use crate::address::Address;

/// Suffix carried by the names of sacrificial snakes.
pub const KAMIKAZE_SUFFIX: &str = "_k";

/// One of our snakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub name: String,
    /// Body segments, with head at index 0
    pub segments: Vec<Address>,
    /// Enemy cell this snake is currently hunting, if any.
    pub target: Option<Address>,
    splits: usize,
}

impl Snake {
    pub fn new(name: impl Into<String>, segments: Vec<Address>) -> Self {
        Self {
            name: name.into(),
            segments,
            target: None,
            splits: 0,
        }
    }

    pub fn head(&self) -> &Address {
        &self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_kamikaze(&self) -> bool {
        self.name.ends_with(KAMIKAZE_SUFFIX)
    }

    /// Name the next child split off this snake will get.
    pub fn kid_name(&self, kamikaze: bool) -> String {
        let suffix = if kamikaze { KAMIKAZE_SUFFIX } else { "" };
        format!("{}.{}{}", self.name, self.splits, suffix)
    }

    /// The trailing `amount` segments as a standalone snake, tail first.
    pub fn get_kid(&self, amount: usize, kamikaze: bool) -> Snake {
        let amount = amount.min(self.len());
        let segments = self.segments[self.len() - amount..]
            .iter()
            .rev()
            .cloned()
            .collect();
        Snake::new(self.kid_name(kamikaze), segments)
    }

    /// Prepends the new head; the tail only moves along when nothing was eaten.
    pub fn apply_move(&mut self, next_location: Address, grow: bool) {
        self.segments.insert(0, next_location);
        if !grow {
            self.segments.pop();
        }
    }

    /// Detaches the trailing segments named in a split action and moves the
    /// resulting snake onto the split destination. The parent always keeps
    /// at least one segment; impossible splits return `None`.
    pub fn apply_split(&mut self, action: &Action, grow: bool) -> Option<Snake> {
        let Action::Split {
            new_snake_name,
            snake_segment,
            next_location,
            ..
        } = action
        else {
            return None;
        };
        if *snake_segment == 0 || *snake_segment >= self.len() {
            return None;
        }
        let mut detached = self.segments.split_off(self.len() - snake_segment);
        detached.reverse();
        self.splits += 1;
        let mut kid = Snake::new(new_snake_name.clone(), detached);
        kid.apply_move(next_location.clone(), grow);
        Some(kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(segments: &[[i32; 2]]) -> Snake {
        Snake::new("hydra", segments.iter().map(|s| Address::from(*s)).collect())
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = snake(&[[1, 1], [1, 0]]);

        snake.apply_move([2, 1].into(), false);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), &Address::from([2, 1]));
        assert_eq!(snake.segments[1], Address::from([1, 1]));

        snake.apply_move([3, 1].into(), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), &Address::from([3, 1]));
    }

    #[test]
    fn test_get_kid_takes_tail_reversed() {
        let snake = snake(&[[0, 0], [0, 1], [0, 2]]);
        let kid = snake.get_kid(2, false);
        assert_eq!(kid.name, "hydra.0");
        assert_eq!(kid.segments, vec![Address::from([0, 2]), Address::from([0, 1])]);
    }

    #[test]
    fn test_kamikaze_names() {
        let snake = snake(&[[0, 0], [0, 1]]);
        let kid = snake.get_kid(1, true);
        assert_eq!(kid.name, "hydra.0_k");
        assert!(kid.is_kamikaze());
        assert!(!snake.is_kamikaze());
    }

    #[test]
    fn test_apply_split_detaches_tail() {
        let mut parent = snake(&[[0, 0], [0, 1], [0, 2]]);
        let action = Action::Split {
            old_snake_name: "hydra".into(),
            new_snake_name: parent.kid_name(false),
            snake_segment: 1,
            next_location: [1, 2].into(),
        };
        let kid = parent.apply_split(&action, false).unwrap();
        assert_eq!(parent.segments, vec![Address::from([0, 0]), Address::from([0, 1])]);
        assert_eq!(kid.name, "hydra.0");
        assert_eq!(kid.segments, vec![Address::from([1, 2])]);
        assert_eq!(parent.kid_name(false), "hydra.1");
    }

    #[test]
    fn test_apply_split_with_food_keeps_detached_segment() {
        let mut parent = snake(&[[0, 0], [0, 1]]);
        let action = Action::Split {
            old_snake_name: "hydra".into(),
            new_snake_name: "hydra.0".into(),
            snake_segment: 1,
            next_location: [1, 1].into(),
        };
        let kid = parent.apply_split(&action, true).unwrap();
        assert_eq!(kid.segments, vec![Address::from([1, 1]), Address::from([0, 1])]);
    }

    #[test]
    fn test_split_never_empties_parent() {
        let mut parent = snake(&[[0, 0]]);
        let action = Action::Split {
            old_snake_name: "hydra".into(),
            new_snake_name: "hydra.0".into(),
            snake_segment: 1,
            next_location: [1, 0].into(),
        };
        assert!(parent.apply_split(&action, false).is_none());
        assert_eq!(parent.len(), 1);
    }
}
