//! Drawing the game onto camera frames and showing frames in the terminal.

pub mod draw;
pub mod font;
pub mod renderer;
pub mod terminal;

use image::{Rgba, RgbaImage};

pub use renderer::Renderer;
pub use terminal::FrameView;

/// A camera frame; the game draws on it in place
pub type Frame = RgbaImage;

// Palette
pub const SNAKE_BODY_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const SNAKE_HEAD_COLOR: Rgba<u8> = Rgba([200, 0, 200, 255]);
pub const SCORE_BADGE_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);
pub const GAME_OVER_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BACKDROP_COLOR: Rgba<u8> = Rgba([24, 24, 32, 255]);
