//! Hand trackers: anything that can turn a frame into a control point.
//!
//! A real landmark detector plugs in behind [`HandTracker`]. The crate ships
//! a terminal mouse pointer stand-in and a scripted tracker that replays a
//! recorded track.

use anyhow::{Context, Result};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::game::Point;
use crate::render::Frame;

fn full_confidence() -> f32 {
    1.0
}

/// A hand position reported by a tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

impl Detection {
    pub fn new(point: Point, confidence: f32) -> Self {
        Self {
            x: point.x,
            y: point.y,
            confidence,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The point, if the detection is at least `min_confidence` sure
    pub fn accepted(&self, min_confidence: f32) -> Option<Point> {
        (self.confidence >= min_confidence).then(|| self.point())
    }
}

/// Locates the control point (the index finger tip) in a frame
pub trait HandTracker {
    /// `None` when no hand is visible; that is not an error
    fn locate(&mut self, frame: &Frame) -> Option<Detection>;

    /// True once the tracker can produce nothing more
    fn finished(&self) -> bool {
        false
    }
}

/// Uses the terminal mouse pointer as the hand.
///
/// The play loop reports where the frame was drawn and forwards mouse
/// events; the tracker maps cell positions back to frame pixels. Each cell
/// shows two pixel rows.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    frame_width: u32,
    frame_height: u32,
    view: Rect,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn new(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            view: Rect::default(),
            last: None,
        }
    }

    /// Terminal area the frame is currently shown in
    pub fn set_view(&mut self, view: Rect) {
        self.view = view;
    }

    /// Record a pointer position in terminal cells. Positions outside the
    /// frame view are ignored and the last known position is kept.
    pub fn on_pointer(&mut self, column: u16, row: u16) {
        let view = self.view;
        if view.width == 0 || view.height == 0 {
            return;
        }
        if column < view.x
            || row < view.y
            || column >= view.x + view.width
            || row >= view.y + view.height
        {
            return;
        }

        let cx = (column - view.x) as u64;
        let cy = (row - view.y) as u64;
        // Centre of the cell, in frame pixels
        let x = (2 * cx + 1) * self.frame_width as u64 / (2 * view.width as u64);
        let y = (2 * cy + 1) * self.frame_height as u64 / (2 * view.height as u64);
        self.last = Some(Point::new(x as i32, y as i32));
    }

    /// Forget the pointer, e.g. after a reset
    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl HandTracker for PointerTracker {
    fn locate(&mut self, _frame: &Frame) -> Option<Detection> {
        self.last.map(|p| Detection::new(p, 1.0))
    }
}

/// A recorded sequence of per-frame detections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub frames: Vec<Option<Detection>>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, detection: Option<Detection>) {
        self.frames.push(detection);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read track {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse track {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create track directory")?;
            }
        }
        let json = serde_json::to_string(self).context("Failed to serialize track")?;
        fs::write(path, json).with_context(|| format!("Failed to write track {}", path.display()))
    }
}

/// Replays a [`Track`], one entry per frame
#[derive(Debug, Clone)]
pub struct ScriptedTracker {
    frames: VecDeque<Option<Detection>>,
}

impl ScriptedTracker {
    pub fn new(track: Track) -> Self {
        Self {
            frames: track.frames.into(),
        }
    }

    /// Convenience for tests and demos: every point fully confident
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        Self {
            frames: points
                .into_iter()
                .map(|p| Some(Detection::new(p, 1.0)))
                .collect(),
        }
    }
}

impl HandTracker for ScriptedTracker {
    fn locate(&mut self, _frame: &Frame) -> Option<Detection> {
        self.frames.pop_front().flatten()
    }

    fn finished(&self) -> bool {
        self.frames.is_empty()
    }
}
