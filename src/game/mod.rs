//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller drives it from frame timestamps; tests drive it directly.

pub mod config;
pub mod controller;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use controller::{GameController, GameEvent};
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome};
pub use food::{place_food, PlacementStrategy};
pub use grid::Grid;
pub use state::{Cell, GameSession, Phase, Snake};
