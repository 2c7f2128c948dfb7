//! Player movement.
//!
//! Moves are discrete: one cell at a time, only through open walls, and never
//! while a previous move is still animating. Each accepted move is then eased
//! in over several [`Player::tick`] calls; the discrete cell only changes when
//! the animation lands.

use tracing::{debug, trace};

use crate::direction::Direction;
use crate::grid::{Cell, Grid};

/// Fraction of the remaining distance covered per animation tick.
pub const MOVE_SPEED: f32 = 0.1;
/// Distance, in cells, at which the animation snaps onto its target.
pub const ARRIVAL_TOLERANCE: f32 = 0.5;

/// Continuous position in cell units, used only for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub row: f32,
    pub col: f32,
}

impl From<Cell> for Position {
    fn from(cell: Cell) -> Self {
        Self {
            row: cell.row as f32,
            col: cell.col as f32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Idle,
    Animating { from: Cell, to: Cell },
}

#[derive(Debug, Clone)]
pub struct Player {
    cell: Cell,
    position: Position,
    motion: Motion,
    path: Vec<Cell>,
}

impl Player {
    pub fn new(start: Cell) -> Self {
        Self {
            cell: start,
            position: start.into(),
            motion: Motion::Idle,
            path: Vec::new(),
        }
    }

    /// Puts the player back on `start`, cancelling any move and clearing the trail.
    pub fn reset(&mut self, start: Cell) {
        self.cell = start;
        self.position = start.into();
        self.motion = Motion::Idle;
        self.path.clear();
    }

    /// The last cell the player fully arrived in.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    pub fn target(&self) -> Option<Cell> {
        match self.motion {
            Motion::Animating { to, .. } => Some(to),
            Motion::Idle => None,
        }
    }

    /// Cells walked so far, oldest first.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Starts a one-cell move if the player is idle and the wall on `dir` is
    /// open. Returns whether the move was accepted.
    pub fn attempt_move(&mut self, grid: &Grid, dir: Direction) -> bool {
        if self.is_moving() {
            trace!(?dir, "move ignored, already animating");
            return false;
        }
        if grid.has_wall(self.cell, dir) {
            trace!(?dir, cell = ?self.cell, "move blocked by wall");
            return false;
        }
        let Some(target) = self.cell.step(dir, grid.rows(), grid.cols()) else {
            trace!(?dir, cell = ?self.cell, "move leaves the grid");
            return false;
        };

        self.path.push(self.cell);
        self.motion = Motion::Animating {
            from: self.cell,
            to: target,
        };
        debug!(?dir, from = ?self.cell, to = ?target, "move started");
        true
    }

    /// Advances an in-flight move by one frame. Returns `true` on the tick that
    /// lands the player on its target.
    pub fn tick(&mut self) -> bool {
        let Motion::Animating { from, to } = self.motion else {
            return false;
        };
        let target = Position::from(to);
        self.position.row += (target.row - self.position.row) * MOVE_SPEED;
        self.position.col += (target.col - self.position.col) * MOVE_SPEED;

        let settled = (target.row - self.position.row).abs() <= ARRIVAL_TOLERANCE
            && (target.col - self.position.col).abs() <= ARRIVAL_TOLERANCE;
        if !settled {
            return false;
        }

        self.cell = to;
        self.position = target;
        self.motion = Motion::Idle;
        self.path.push(to);
        debug!(?from, cell = ?to, "move arrived");
        true
    }
}
