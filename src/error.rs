/// Errors raised while building a maze or resizing a session.
///
/// Blocked moves are not errors; `attempt_move` simply reports `false`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// A maze needs at least one row and one column.
    #[error("invalid maze dimensions {rows}x{cols}: rows and columns must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A single-cell grid has no room for a goal apart from the start.
    #[error("cannot place a goal: the grid has only one cell")]
    DegenerateGoalPlacement,
}

pub type Result<T> = std::result::Result<T, MazeError>;
