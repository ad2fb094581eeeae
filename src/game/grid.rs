//! Toroidal board geometry.
//!
//! The board is derived once from the viewport size and the cell size and
//! never changes afterwards. Motion off one edge re-enters at the opposite
//! edge.

use super::direction::Direction;
use super::state::Cell;

/// Fixed-size wrap-around grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cell_size: u32,
}

impl Grid {
    /// Build a grid covering a `width` x `height` pixel viewport.
    ///
    /// `cols = floor(width / cell_size)`, `rows = floor(height / cell_size)`;
    /// any leftover pixels on the right and bottom edges stay outside the
    /// board.
    pub fn from_viewport(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            cols: i32::try_from(width / cell_size).unwrap_or(i32::MAX),
            rows: i32::try_from(height / cell_size).unwrap_or(i32::MAX),
            cell_size,
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Width in pixels of the area covered by cells
    pub fn pixel_width(&self) -> i32 {
        pixels(self.cols, self.cell_size)
    }

    /// Height in pixels of the area covered by cells
    pub fn pixel_height(&self) -> i32 {
        pixels(self.rows, self.cell_size)
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }

    /// Fold arbitrary coordinates back onto the board
    pub fn wrap(&self, x: i32, y: i32) -> Cell {
        Cell::new(x.rem_euclid(self.cols), y.rem_euclid(self.rows))
    }

    /// Neighbouring cell in `direction`, wrapping at the edges
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        self.wrap(cell.x + dx, cell.y + dy)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Cell::new(x, y)))
    }
}

/// `cells * cell_size`, saturating at `i32::MAX`
fn pixels(cells: i32, cell_size: u32) -> i32 {
    let total = i64::from(cells) * i64::from(cell_size);
    i32::try_from(total).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_viewport() {
        let grid = Grid::from_viewport(400, 400, 20);
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.rows(), 20);

        // Partial cells are dropped
        let grid = Grid::from_viewport(410, 239, 20);
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.rows(), 11);
        assert_eq!(grid.pixel_width(), 400);
        assert_eq!(grid.pixel_height(), 220);
        assert_eq!(grid.cell_count(), 220);
    }

    #[test]
    fn test_oversized_viewport_saturates() {
        let grid = Grid::from_viewport(u32::MAX, 40, 1);
        assert_eq!(grid.cols(), i32::MAX);
        assert_eq!(grid.pixel_width(), i32::MAX);
        assert_eq!(grid.pixel_height(), 40);

        let grid = Grid::from_viewport(u32::MAX, u32::MAX, 3);
        assert_eq!(grid.pixel_width(), i32::MAX);
    }

    #[test]
    fn test_wrap_right_edge() {
        let grid = Grid::from_viewport(400, 400, 20);
        let head = Cell::new(grid.cols() - 1, 7);
        assert_eq!(grid.step(head, Direction::Right), Cell::new(0, 7));
    }

    #[test]
    fn test_wrap_all_edges() {
        let grid = Grid::from_viewport(100, 60, 10);
        assert_eq!(grid.step(Cell::new(0, 3), Direction::Left), Cell::new(9, 3));
        assert_eq!(grid.step(Cell::new(4, 0), Direction::Up), Cell::new(4, 5));
        assert_eq!(grid.step(Cell::new(4, 5), Direction::Down), Cell::new(4, 0));
        assert_eq!(grid.wrap(-11, 13), Cell::new(9, 1));
    }

    #[test]
    fn test_contains_and_center() {
        let grid = Grid::from_viewport(200, 100, 10);
        assert_eq!(grid.center(), Cell::new(10, 5));
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 9)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, -1)));
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::from_viewport(30, 20, 10);
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(2, 1),
            ]
        );
    }
}
