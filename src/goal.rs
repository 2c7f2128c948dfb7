use rand::Rng;

use crate::error::{MazeError, Result};
use crate::grid::Cell;

/// Picks a uniformly random cell other than `exclude` by rejection sampling.
///
/// A single-cell grid has nothing to pick from and is reported instead of
/// sampling forever.
pub fn place_goal(rows: usize, cols: usize, exclude: Cell, rng: &mut impl Rng) -> Result<Cell> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::InvalidDimensions { rows, cols });
    }
    if rows == 1 && cols == 1 {
        return Err(MazeError::DegenerateGoalPlacement);
    }
    loop {
        let goal = Cell::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
        if goal != exclude {
            return Ok(goal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_returns_the_excluded_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Cell::new(0, 0);
        for _ in 0..1000 {
            let goal = place_goal(2, 1, start, &mut rng).unwrap();
            assert_eq!(goal, Cell::new(1, 0));
        }
        for _ in 0..1000 {
            let goal = place_goal(4, 5, start, &mut rng).unwrap();
            assert_ne!(goal, start);
            assert!(goal.row < 4 && goal.col < 5);
        }
    }

    #[test]
    fn covers_every_other_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let exclude = Cell::new(1, 1);
        let mut hits = [[0u32; 3]; 3];
        for _ in 0..2000 {
            let goal = place_goal(3, 3, exclude, &mut rng).unwrap();
            hits[goal.row][goal.col] += 1;
        }
        for (row, line) in hits.iter().enumerate() {
            for (col, &count) in line.iter().enumerate() {
                if Cell::new(row, col) == exclude {
                    assert_eq!(count, 0);
                } else {
                    assert!(count > 0, "({row}, {col}) never chosen");
                }
            }
        }
    }

    #[test]
    fn single_cell_grid_is_degenerate() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            place_goal(1, 1, Cell::new(0, 0), &mut rng),
            Err(MazeError::DegenerateGoalPlacement)
        );
    }

    #[test]
    fn empty_grid_is_invalid() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            place_goal(0, 3, Cell::new(0, 0), &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }
}
