//! Paints the board, the food and the snake onto a [`Surface`].

use crate::game::{Cell, GameSession, Grid, Phase};

use super::surface::{Rgba, Surface};

pub const BACKGROUND: Rgba = Rgba::rgb(0x08, 0x10, 0x18);
pub const GRID_LINE: Rgba = Rgba::rgba(255, 255, 255, 10);
pub const FOOD: Rgba = Rgba::rgb(0xff, 0x6b, 0x6b);
pub const SNAKE_HEAD: Rgba = Rgba::rgb(0x00, 0xe5, 0xff);
pub const SNAKE_BODY: Rgba = Rgba::rgb(0, 213, 255);
pub const GAME_OVER_FLASH: Rgba = Rgba::rgba(255, 40, 40, 36);

/// Opacity lost between the head and the tail
const BODY_FADE: f32 = 0.6;

/// Opacity of segment `index` in a snake of `len` segments
pub fn segment_opacity(index: usize, len: usize) -> f32 {
    if index == 0 || len == 0 {
        return 1.0;
    }
    1.0 - index as f32 / len as f32 * BODY_FADE
}

/// Draws a read-only view of the session, once per frame
#[derive(Debug, Default)]
pub struct SceneRenderer;

impl SceneRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: Surface>(&self, session: &GameSession, grid: &Grid, surface: &mut S) {
        let width = grid.pixel_width();
        let height = grid.pixel_height();
        let cs = grid.cell_size() as i32;

        surface.fill_rect(0, 0, width, height, BACKGROUND);

        for x in 0..=grid.cols() {
            surface.stroke_line(x * cs, 0, x * cs, height, GRID_LINE);
        }
        for y in 0..=grid.rows() {
            surface.stroke_line(0, y * cs, width, y * cs, GRID_LINE);
        }

        // Proportions of a 20px cell: food inset 2, segment inset 1, radius 4
        let radius = cs / 5;

        if let Some(food) = session.food {
            draw_cell(surface, food, cs, (cs / 10).max(1), radius, FOOD);
        }

        let len = session.snake.len();
        for (i, &segment) in session.snake.segments().enumerate() {
            let color = if i == 0 {
                SNAKE_HEAD
            } else {
                SNAKE_BODY.with_opacity(segment_opacity(i, len))
            };
            draw_cell(surface, segment, cs, cs / 20, radius, color);
        }

        if session.phase == Phase::Colliding {
            surface.fill_rect(0, 0, width, height, GAME_OVER_FLASH);
        }
    }
}

fn draw_cell<S: Surface>(surface: &mut S, cell: Cell, cs: i32, inset: i32, radius: i32, color: Rgba) {
    let side = cs - 2 * inset;
    if side <= 0 {
        return;
    }
    surface.rounded_rect(cell.x * cs + inset, cell.y * cs + inset, side, side, radius, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(i32, i32, i32, i32, Rgba),
        Line(i32, i32, i32, i32),
        Rounded(i32, i32, i32, i32, i32, Rgba),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
            self.ops.push(Op::Fill(x, y, w, h, color));
        }

        fn stroke_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, _color: Rgba) {
            self.ops.push(Op::Line(x1, y1, x2, y2));
        }

        fn rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32, color: Rgba) {
            self.ops.push(Op::Rounded(x, y, w, h, radius, color));
        }
    }

    fn session(cells: &[(i32, i32)], food: Option<Cell>) -> GameSession {
        let snake = Snake::from_cells(cells.iter().map(|&(x, y)| Cell::new(x, y)), Direction::Right);
        let mut session = GameSession::new(snake, 8);
        session.food = food;
        session
    }

    fn draw(session: &GameSession, grid: &Grid) -> Vec<Op> {
        let mut recorder = Recorder::default();
        SceneRenderer::new().render(session, grid, &mut recorder);
        recorder.ops
    }

    fn rounded(ops: &[Op]) -> Vec<&Op> {
        ops.iter().filter(|op| matches!(op, Op::Rounded(..))).collect()
    }

    #[test]
    fn test_background_and_grid_lines() {
        let grid = Grid::from_viewport(400, 200, 20);
        let ops = draw(&session(&[(1, 1)], None), &grid);

        assert_eq!(ops[0], Op::Fill(0, 0, 400, 200, BACKGROUND));
        let lines: Vec<&Op> = ops.iter().filter(|op| matches!(op, Op::Line(..))).collect();
        assert_eq!(lines.len(), 21 + 11);
        assert!(lines.contains(&&Op::Line(400, 0, 400, 200)));
        assert!(lines.contains(&&Op::Line(0, 100, 400, 100)));
    }

    #[test]
    fn test_food_and_head_geometry() {
        let grid = Grid::from_viewport(400, 400, 20);
        let ops = draw(&session(&[(10, 10)], Some(Cell::new(3, 4))), &grid);

        let shapes = rounded(&ops);
        assert_eq!(shapes.len(), 2);
        assert_eq!(*shapes[0], Op::Rounded(62, 82, 16, 16, 4, FOOD));
        assert_eq!(*shapes[1], Op::Rounded(201, 201, 18, 18, 4, SNAKE_HEAD));
    }

    #[test]
    fn test_no_food_drawn_when_absent() {
        let grid = Grid::from_viewport(400, 400, 20);
        let ops = draw(&session(&[(10, 10), (9, 10)], None), &grid);
        assert_eq!(rounded(&ops).len(), 2);
        assert!(ops
            .iter()
            .all(|op| !matches!(op, Op::Rounded(_, _, _, _, _, c) if *c == FOOD)));
    }

    #[test]
    fn test_body_fades_toward_tail() {
        let grid = Grid::from_viewport(400, 400, 20);
        let cells: Vec<(i32, i32)> = (0..10).map(|i| (10 - i, 3)).collect();
        let ops = draw(&session(&cells, None), &grid);

        let alphas: Vec<u8> = rounded(&ops)
            .iter()
            .map(|op| match op {
                Op::Rounded(_, _, _, _, _, c) => c.a,
                _ => unreachable!(),
            })
            .collect();

        assert_eq!(alphas[0], 255);
        assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
        // Tail of a 10-long snake: 1 - 9/10 * 0.6 = 0.46
        assert_eq!(alphas[9], (0.46f32 * 255.0).round() as u8);
    }

    #[test]
    fn test_segment_opacity_floor() {
        assert_eq!(segment_opacity(0, 5), 1.0);
        for len in [2usize, 10, 400] {
            for i in 1..len {
                assert!(segment_opacity(i, len) > 0.4);
            }
        }
        assert!((segment_opacity(399, 400) - 0.4).abs() < 0.01);
    }

    #[test]
    fn test_flash_overlay_only_on_game_over() {
        let grid = Grid::from_viewport(400, 400, 20);
        let mut s = session(&[(5, 5)], None);

        let ops = draw(&s, &grid);
        assert!(!ops.contains(&Op::Fill(0, 0, 400, 400, GAME_OVER_FLASH)));

        s.phase = Phase::Colliding;
        let ops = draw(&s, &grid);
        assert_eq!(ops.last(), Some(&Op::Fill(0, 0, 400, 400, GAME_OVER_FLASH)));
    }

    #[test]
    fn test_small_cells_keep_visible_shapes() {
        let grid = Grid::from_viewport(80, 80, 8);
        let ops = draw(&session(&[(2, 2)], Some(Cell::new(0, 0))), &grid);
        let shapes = rounded(&ops);
        assert_eq!(*shapes[0], Op::Rounded(1, 1, 6, 6, 1, FOOD));
        assert_eq!(*shapes[1], Op::Rounded(16, 16, 8, 8, 1, SNAKE_HEAD));
    }
}
