use crate::direction::Direction;
use crate::error::{MazeError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The adjacent cell in `dir`, if it lies inside a `rows` x `cols` grid.
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row >= rows || col >= cols {
            return None;
        }
        Some(Cell { row, col })
    }
}

/// One grid square: the generation-time visited flag and its four walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub visited: bool,
    walls: [bool; 4],
}

impl Square {
    fn closed() -> Self {
        Self {
            visited: false,
            walls: [true; 4],
        }
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.wall_index()]
    }

    /// Walls in top, right, bottom, left order.
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }
}

/// Row-major grid of squares. Each shared edge is stored on both sides and
/// only [`Grid::remove_wall`] clears it, so the two copies never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    squares: Vec<Square>,
}

impl Grid {
    /// Allocates a fully walled, unvisited grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            squares: vec![Square::closed(); rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<&Square> {
        if !self.contains(cell) {
            return None;
        }
        self.squares.get(self.index(cell))
    }

    /// Out-of-bounds cells count as walled on every side.
    pub fn has_wall(&self, cell: Cell, dir: Direction) -> bool {
        self.get(cell).map_or(true, |square| square.has_wall(dir))
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.get(cell).is_some_and(|square| square.visited)
    }

    pub(crate) fn mark_visited(&mut self, cell: Cell) {
        let idx = self.index(cell);
        self.squares[idx].visited = true;
    }

    /// Clears the wall on `dir` of `cell` together with the mirrored wall of
    /// its neighbour. Returns the neighbour, or `None` at the grid edge.
    pub(crate) fn remove_wall(&mut self, cell: Cell, dir: Direction) -> Option<Cell> {
        let next = cell.step(dir, self.rows, self.cols)?;
        let here = self.index(cell);
        let there = self.index(next);
        self.squares[here].walls[dir.wall_index()] = false;
        self.squares[there].walls[dir.opposite().wall_index()] = false;
        Some(next)
    }

    /// Neighbours reachable from `cell` without crossing a wall.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            if self.has_wall(cell, dir) {
                None
            } else {
                cell.step(dir, self.rows, self.cols)
            }
        })
    }

    /// Number of removed walls between cells, each shared edge counted once.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&dir| {
                        cell.step(dir, self.rows, self.cols).is_some() && !self.has_wall(cell, dir)
                    })
                    .count()
            })
            .sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell { row, col }))
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }
}
