use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::food::PlacementStrategy;
use super::grid::Grid;

/// Invalid game configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell_size must be at least 1 pixel")]
    ZeroCellSize,

    #[error("viewport {width}x{height} holds a {cols}x{rows} grid, at least 2x2 cells are needed")]
    GridTooSmall {
        width: u32,
        height: u32,
        cols: i32,
        rows: i32,
    },

    #[error("viewport {width}x{height} is larger than {max}x{max} pixels")]
    ViewportTooLarge { width: u32, height: u32, max: u32 },

    #[error("initial_snake_length must be between 1 and {max} (one row short of the board width), got {got}")]
    SnakeLength { got: usize, max: usize },

    #[error("base_tick_rate must be at least 1")]
    ZeroTickRate,

    #[error("max_tick_rate ({max}) cannot be below base_tick_rate ({base})")]
    TickRateBounds { base: u32, max: u32 },

    #[error("speedup_every must be at least 1")]
    ZeroSpeedupInterval,
}

/// Largest accepted viewport side in pixels
pub const MAX_VIEWPORT_SIDE: u32 = 4096;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Side of one grid cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Ticks per second at the start of a game
    pub base_tick_rate: u32,
    /// Speed never goes above this many ticks per second
    pub max_tick_rate: u32,
    /// The tick rate goes up by one every this many points
    pub speedup_every: u32,
    /// Wall-clock delay between a collision and the automatic restart
    pub reset_delay_ms: u64,
    /// How food finds a free cell
    pub food_strategy: PlacementStrategy,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400,
            viewport_height: 400,
            cell_size: 20,
            initial_snake_length: 1,
            base_tick_rate: 8,
            max_tick_rate: 20,
            speedup_every: 4,
            reset_delay_ms: 600,
            food_strategy: PlacementStrategy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration whose viewport holds exactly `cols` x `rows` cells
    pub fn with_grid(cols: u32, rows: u32) -> Self {
        let defaults = Self::default();
        Self {
            viewport_width: cols * defaults.cell_size,
            viewport_height: rows * defaults.cell_size,
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::with_grid(10, 10)
    }

    pub fn grid(&self) -> Grid {
        Grid::from_viewport(self.viewport_width, self.viewport_height, self.cell_size)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.viewport_width > MAX_VIEWPORT_SIDE || self.viewport_height > MAX_VIEWPORT_SIDE {
            return Err(ConfigError::ViewportTooLarge {
                width: self.viewport_width,
                height: self.viewport_height,
                max: MAX_VIEWPORT_SIDE,
            });
        }

        let grid = self.grid();
        if grid.cols() < 2 || grid.rows() < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.viewport_width,
                height: self.viewport_height,
                cols: grid.cols(),
                rows: grid.rows(),
            });
        }

        let max_length = grid.cols() as usize - 1;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(ConfigError::SnakeLength {
                got: self.initial_snake_length,
                max: max_length,
            });
        }

        if self.base_tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        if self.max_tick_rate < self.base_tick_rate {
            return Err(ConfigError::TickRateBounds {
                base: self.base_tick_rate,
                max: self.max_tick_rate,
            });
        }

        if self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedupInterval);
        }

        Ok(())
    }
}
