//! Generation error taxonomy.
//!
//! Bounded-retry exhaustion on cell and neighbour queries is a soft failure
//! and surfaces as `Option`; corridor routing failure is an expected return
//! value. Only misconfigured-grid conditions end up here.

use thiserror::Error;

/// Which stairway a placement failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StairKind {
    Up,
    Down,
}

impl std::fmt::Display for StairKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StairKind::Up => write!(f, "up"),
            StairKind::Down => write!(f, "down"),
        }
    }
}

/// Fatal generation failures. These propagate; the caller decides whether to
/// restart a larger unit of work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no eligible tile for the {kind}-stairway after {attempts} attempts")]
    StairwayExhausted { kind: StairKind, attempts: u32 },

    #[error("level has no rooms to place content in")]
    NoRooms,
}
