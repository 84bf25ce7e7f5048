pub mod handler;
pub mod source;
pub mod tracker;

pub use handler::{InputHandler, KeyAction};
pub use source::{Backdrop, FrameSource};
pub use tracker::{Detection, HandTracker, PointerTracker, ScriptedTracker, Track};
