use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::Grid;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Lay out a snake of `length` cells with its head at `head`, the body
    /// trailing behind it opposite to `direction`, wrapping on `grid`.
    pub fn spawn(grid: &Grid, head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        let back = direction.opposite();
        for _ in 1..length {
            let prev = body[body.len() - 1];
            body.push_back(grid.step(prev, back));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Prepend a new head
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drop the tail segment. The last remaining segment is never removed.
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ticks advance the snake
    Running,
    /// Stopped by the player; resumes on the next toggle
    Paused,
    /// The snake hit itself; the game-over flash is showing until the
    /// session is replaced
    Colliding,
}

/// Complete state of one game, from spawn to game over
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub snake: Snake,
    /// Most recently requested heading, not yet applied
    pub pending_direction: Option<Direction>,
    pub food: Option<Cell>,
    pub score: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    pub phase: Phase,
}

impl GameSession {
    /// Create a running session with no food and a zero score
    pub fn new(snake: Snake, tick_rate: u32) -> Self {
        Self {
            snake,
            pending_direction: None,
            food: None,
            score: 0,
            tick_rate,
            phase: Phase::Running,
        }
    }

    /// Buffer a heading for the next tick, replacing any earlier request
    pub fn request_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Whether the simulation is currently stopped
    pub fn is_paused(&self) -> bool {
        self.phase != Phase::Running
    }

    /// Flip between `Running` and `Paused`.
    ///
    /// Returns the new paused state. A game-over session is left alone.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Colliding => Phase::Colliding,
        };
        self.is_paused()
    }
}
