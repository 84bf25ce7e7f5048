//! Core game logic module for the hand-tracked snake
//!
//! The snake follows a point supplied once per frame, so the game has no
//! notion of grid, direction, or tick rate. It can be driven by a live
//! tracker or by a recorded track.

pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use engine::SnakeGame;
pub use food::FoodSprite;
pub use state::{FrameOutcome, Phase, Point, SnakePath};
