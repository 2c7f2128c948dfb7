//! Randomized depth-first backtracker.
//!
//! Starting from the top-left cell, the generator walks into a random
//! unvisited neighbour, knocking down the wall between them, and backs up
//! along an explicit stack whenever it reaches a dead end. Every cell is
//! entered exactly once, so the carved passages form a spanning tree.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::direction::Direction;
use crate::error::Result;
use crate::grid::{Cell, Grid};

/// Builds a fresh `rows` x `cols` maze.
pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Grid> {
    let mut grid = Grid::new(rows, cols)?;
    carve_passages(&mut grid, rng);
    Ok(grid)
}

fn carve_passages(grid: &mut Grid, rng: &mut impl Rng) {
    let start = Cell::new(0, 0);
    grid.mark_visited(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let neighbors = unvisited_neighbors(grid, current);
        match neighbors.choose(rng) {
            Some(&(dir, next)) => {
                grid.mark_visited(next);
                grid.remove_wall(current, dir);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn unvisited_neighbors(grid: &Grid, cell: Cell) -> Vec<(Direction, Cell)> {
    let mut neighbors = Vec::new();
    for dir in Direction::ALL {
        if let Some(next) = cell.step(dir, grid.rows(), grid.cols()) {
            if !grid.is_visited(next) {
                neighbors.push((dir, next));
            }
        }
    }
    neighbors
}
