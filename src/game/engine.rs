use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::{
    config::GameConfig,
    direction::Direction,
    food::place_food,
    grid::Grid,
    state::{Cell, GameSession, Phase, Snake},
};

/// What a single tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session was not running; nothing changed
    Idle,
    /// The snake advanced one cell without eating
    Moved,
    /// The snake ate and grew by one segment
    Ate {
        score: u32,
        tick_rate: u32,
        /// Whether this bite raised the tick rate
        sped_up: bool,
    },
    /// The new head landed on the body; the session is now `Colliding`
    Collided { at: Cell },
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    ///
    /// Food placement is seeded from `config.seed` when set, from OS entropy
    /// otherwise.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.grid();

        Self { config, grid, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Build a fresh session: snake at the center heading right, score zero,
    /// base speed and food already on the board.
    pub fn reset(&mut self) -> GameSession {
        let snake = Snake::spawn(
            &self.grid,
            self.grid.center(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut session = GameSession::new(snake, self.config.base_tick_rate);
        session.food = Some(self.spawn_food(&session.snake));
        session
    }

    /// Advance the session by one tick
    pub fn step(&mut self, session: &mut GameSession) -> StepOutcome {
        if session.phase != Phase::Running {
            return StepOutcome::Idle;
        }

        // Apply the buffered turn unless it would reverse into the neck
        if let Some(requested) = session.pending_direction.take() {
            if !session.snake.direction.is_opposite(requested) {
                session.snake.direction = requested;
            }
        }

        let new_head = self.grid.step(session.snake.head(), session.snake.direction);

        // The tail still counts: it has not moved yet this tick
        if session.snake.occupies(new_head) {
            session.phase = Phase::Colliding;
            return StepOutcome::Collided { at: new_head };
        }

        session.snake.push_head(new_head);

        if session.food == Some(new_head) {
            session.score += 1;

            let sped_up = session.score % self.config.speedup_every == 0
                && session.tick_rate < self.config.max_tick_rate;
            if sped_up {
                session.tick_rate += 1;
                debug!(
                    score = session.score,
                    tick_rate = session.tick_rate,
                    "speed increased"
                );
            }

            // A snake covering the whole board leaves no room; its next move collides
            session.food = if session.snake.len() < self.grid.cell_count() {
                Some(self.spawn_food(&session.snake))
            } else {
                None
            };

            return StepOutcome::Ate {
                score: session.score,
                tick_rate: session.tick_rate,
                sped_up,
            };
        }

        session.snake.pop_tail();
        StepOutcome::Moved
    }

    fn spawn_food(&mut self, snake: &Snake) -> Cell {
        let cell = place_food(&self.grid, snake, self.config.food_strategy, &mut self.rng);
        debug!(x = cell.x, y = cell.y, snake_len = snake.len(), "placed food");
        cell
    }
}
