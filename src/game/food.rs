//! Food placement on free cells.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::state::{Cell, Snake};

/// Above this share of occupied cells, `Adaptive` stops sampling blindly.
const ADAPTIVE_OCCUPANCY_LIMIT: f64 = 0.5;

/// How a free cell is chosen for new food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Draw uniform cells until one is free. Cheap on a sparse board, no
    /// bound on the number of draws.
    SampleUntilFree,
    /// List every free cell and pick one. Always terminates.
    EnumerateFree,
    /// Sample while the board is sparse, enumerate once it fills up
    #[default]
    Adaptive,
}

impl PlacementStrategy {
    /// Resolve `Adaptive` against the current occupancy
    pub fn resolve(self, occupied: usize, total: usize) -> PlacementStrategy {
        match self {
            PlacementStrategy::Adaptive => {
                if (occupied as f64) < total as f64 * ADAPTIVE_OCCUPANCY_LIMIT {
                    PlacementStrategy::SampleUntilFree
                } else {
                    PlacementStrategy::EnumerateFree
                }
            }
            other => other,
        }
    }
}

/// Pick a random cell not covered by `snake`.
///
/// # Panics
///
/// Panics if the snake covers every cell of the grid. Board sizing keeps that
/// out of reach in normal play; hitting it is a broken invariant.
pub fn place_food<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    strategy: PlacementStrategy,
    rng: &mut R,
) -> Cell {
    let total = grid.cell_count();
    assert!(
        snake.len() < total,
        "no free cell left for food: snake covers {} of {} cells",
        snake.len(),
        total
    );

    match strategy.resolve(snake.len(), total) {
        PlacementStrategy::EnumerateFree => {
            let free: Vec<Cell> = grid.cells().filter(|c| !snake.occupies(*c)).collect();
            // Non-empty: the snake has no duplicate cells and is shorter than the board
            free[rng.gen_range(0..free.len())]
        }
        _ => loop {
            let cell = Cell::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()));
            if !snake.occupies(cell) {
                return cell;
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn long_snake(grid: &Grid, length: usize) -> Snake {
        // Boustrophedon fill from the top-left corner
        let cells: Vec<Cell> = (0..grid.rows())
            .flat_map(|y| {
                let row: Vec<Cell> = (0..grid.cols()).map(|x| Cell::new(x, y)).collect();
                if y % 2 == 0 {
                    row
                } else {
                    row.into_iter().rev().collect()
                }
            })
            .take(length)
            .collect();
        Snake::from_cells(cells, Direction::Right)
    }

    #[test]
    fn test_never_on_snake() {
        let grid = Grid::from_viewport(100, 100, 10);
        let snake = long_snake(&grid, 60);
        let mut rng = StdRng::seed_from_u64(7);

        for strategy in [
            PlacementStrategy::SampleUntilFree,
            PlacementStrategy::EnumerateFree,
            PlacementStrategy::Adaptive,
        ] {
            for _ in 0..200 {
                let cell = place_food(&grid, &snake, strategy, &mut rng);
                assert!(grid.contains(cell));
                assert!(!snake.occupies(cell), "{strategy:?} placed food on {cell:?}");
            }
        }
    }

    #[test]
    fn test_single_free_cell_found() {
        let grid = Grid::from_viewport(40, 40, 10);
        let snake = long_snake(&grid, 15);
        let mut rng = StdRng::seed_from_u64(1);

        // Row 3 runs right-to-left, so (0, 3) is the last cell of the walk
        let expected = Cell::new(0, 3);
        assert!(!snake.occupies(expected));
        for strategy in [PlacementStrategy::SampleUntilFree, PlacementStrategy::EnumerateFree] {
            assert_eq!(place_food(&grid, &snake, strategy, &mut rng), expected);
        }
    }

    #[test]
    #[should_panic(expected = "no free cell left for food")]
    fn test_full_board_is_fatal() {
        let grid = Grid::from_viewport(30, 30, 10);
        let snake = long_snake(&grid, 9);
        let mut rng = StdRng::seed_from_u64(3);
        place_food(&grid, &snake, PlacementStrategy::SampleUntilFree, &mut rng);
    }

    #[test]
    fn test_adaptive_resolution() {
        let adaptive = PlacementStrategy::Adaptive;
        assert_eq!(adaptive.resolve(1, 400), PlacementStrategy::SampleUntilFree);
        assert_eq!(adaptive.resolve(199, 400), PlacementStrategy::SampleUntilFree);
        assert_eq!(adaptive.resolve(200, 400), PlacementStrategy::EnumerateFree);
        assert_eq!(
            PlacementStrategy::SampleUntilFree.resolve(399, 400),
            PlacementStrategy::SampleUntilFree
        );
    }

    #[test]
    fn test_seeded_placement_is_reproducible() {
        let grid = Grid::from_viewport(200, 200, 10);
        let snake = long_snake(&grid, 3);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                place_food(&grid, &snake, PlacementStrategy::Adaptive, &mut a),
                place_food(&grid, &snake, PlacementStrategy::Adaptive, &mut b)
            );
        }
    }
}
