use crate::coords::Coords;

/// Failure outcomes of a search or of a map operation. Every failure is terminal for the call
/// that produced it; callers decide whether to retry with different inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A coordinate lies outside the `rows` x `cols` grid.
    #[error("coordinate {coords} is outside the {rows}x{cols} grid")]
    InvalidCoordinate {
        coords: Coords,
        rows: usize,
        cols: usize,
    },

    /// The goal cell is blocked, so no search is attempted.
    #[error("goal {0} is not walkable")]
    GoalUnreachable(Coords),

    /// The start block (or the block a walker is placed on) is not walkable.
    #[error("start {0} is not walkable")]
    StartBlocked(Coords),

    /// The frontier was exhausted without reaching the goal.
    #[error("no path from {start} to {goal}")]
    NoPath { start: Coords, goal: Coords },

    /// An ASCII map could not be parsed.
    #[error("malformed map: {0}")]
    MalformedMap(String),
}

impl PathError {
    /// True for the outcomes meaning "no route exists", as opposed to bad input.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            PathError::GoalUnreachable(_) | PathError::StartBlocked(_) | PathError::NoPath { .. }
        )
    }
}

/// Result type used throughout the crate.
pub type PathResult<T> = Result<T, PathError>;
