//! Torus Snake - grid snake on a wrap-around board
//!
//! This library provides:
//! - Core game logic: grid, snake, food placement, game-over flow (game module)
//! - Fixed-step tick scheduling and one-shot timers (clock module)
//! - Pixel rendering onto a drawing surface and the terminal layout (render module)
//! - Keyboard mapping (input module), HUD figures (metrics module)
//! - The interactive terminal front end (modes module)

pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
