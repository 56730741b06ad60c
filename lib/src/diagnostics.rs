//! Diagnostic events raised by the decision engine.
//!
//! The engine never logs directly. Everything observable goes through a
//! [`DiagnosticSink`], which production code backs with `tracing` and tests
//! back with an in-memory buffer.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::address::Address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    SnakesRemoved { before: usize, after: usize },
    EnemyScan { enemy_cells: usize, enemy_players: usize },
    StrategyDeleted { snake: String },
    SnakeSaved { snake: String },
    TargetDone { snake: String, reason: String, was: String },
    Splitting { snake: String, kamikaze: bool },
    AssignedKamikaze { snake: String },
    NewFoodTarget { snake: String, food: Address },
    TooLongSaving { snake: String },
    IdleSaving { snake: String },
    TooManySaving { snake: String },
    HuntNoTarget { snake: String },
    HuntTargetLost { snake: String },
    HuntSelected { snake: String, player: String, target: Address },
    Inconsistency(String),
}

impl Diagnostic {
    /// The snake the event is about, if any.
    pub fn snake(&self) -> Option<&str> {
        match self {
            Self::StrategyDeleted { snake }
            | Self::SnakeSaved { snake }
            | Self::TargetDone { snake, .. }
            | Self::Splitting { snake, .. }
            | Self::AssignedKamikaze { snake }
            | Self::NewFoodTarget { snake, .. }
            | Self::TooLongSaving { snake }
            | Self::IdleSaving { snake }
            | Self::TooManySaving { snake }
            | Self::HuntNoTarget { snake }
            | Self::HuntTargetLost { snake }
            | Self::HuntSelected { snake, .. } => Some(snake),
            Self::SnakesRemoved { .. } | Self::EnemyScan { .. } | Self::Inconsistency(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakesRemoved { before, after } => {
                write!(f, "snake removal, before={before} after={after}")
            }
            Self::EnemyScan {
                enemy_cells,
                enemy_players,
            } => write!(
                f,
                "Gamestate update: enemy cells={enemy_cells} enemy count={enemy_players}"
            ),
            Self::StrategyDeleted { snake } => write!(f, "Deleted strategy for snake: {snake}"),
            Self::SnakeSaved { snake } => write!(f, "saved snake: {snake}"),
            Self::TargetDone { snake, reason, was } => {
                write!(f, "[{snake}] target done ({reason}), was {was}")
            }
            Self::Splitting { snake, kamikaze } => {
                if *kamikaze {
                    write!(f, "[{snake}] splitting kamikaze")
                } else {
                    write!(f, "[{snake}] splitting")
                }
            }
            Self::AssignedKamikaze { snake } => write!(f, "[{snake}] assigned kamikaze strategy"),
            Self::NewFoodTarget { snake, food } => write!(f, "[{snake}] new food target {food}"),
            Self::TooLongSaving { snake } => write!(f, "[{snake}] snake too long, saving"),
            Self::IdleSaving { snake } => write!(f, "[{snake}] No work left, saving snake..."),
            Self::TooManySaving { snake } => write!(
                f,
                "[{snake}] No work left, already saving too many snakes"
            ),
            Self::HuntNoTarget { snake } => write!(f, "[{snake}] no target available"),
            Self::HuntTargetLost { snake } => write!(f, "[{snake}] target lost, finding new one"),
            Self::HuntSelected {
                snake,
                player,
                target,
            } => write!(f, "[{snake}] selected {player} {target}"),
            Self::Inconsistency(message) => f.write_str(message),
        }
    }
}

/// Receiver for diagnostics raised while a tick is processed.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let snake = diagnostic.snake().unwrap_or_default();
        match &diagnostic {
            Diagnostic::SnakeSaved { .. } | Diagnostic::SnakesRemoved { .. } => {
                tracing::info!(snake, "{diagnostic}")
            }
            Diagnostic::Inconsistency(_) => tracing::warn!("{diagnostic}"),
            _ => tracing::debug!(snake, "{diagnostic}"),
        }
    }
}

/// Collects diagnostics in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}

/// Drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut handle = sink.clone();
        handle.emit(Diagnostic::SnakeSaved {
            snake: "hydra.1".into(),
        });
        assert_eq!(sink.messages(), vec!["saved snake: hydra.1".to_string()]);
    }

    #[test]
    fn test_snake_accessor() {
        let diag = Diagnostic::HuntNoTarget {
            snake: "hydra.0_k".into(),
        };
        assert_eq!(diag.snake(), Some("hydra.0_k"));
        assert_eq!(diag.to_string(), "[hydra.0_k] no target available");
        assert_eq!(Diagnostic::SnakesRemoved { before: 2, after: 1 }.snake(), None);
    }
}
