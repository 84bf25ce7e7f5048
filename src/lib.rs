//! Hand Snake - a snake game steered by a tracked hand over a camera frame
//!
//! This library provides:
//! - Core game logic (game module)
//! - Frame drawing and terminal display (render module)
//! - Frame sources, hand trackers and key handling (input module)
//! - Session metrics (metrics module)
//! - Interactive and replay drivers (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
