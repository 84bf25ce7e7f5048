use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A pixel position on the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x as f32 - self.x as f32;
        let dy = other.y as f32 - self.y as f32;
        dx.hypot(dy)
    }

    /// Shortest distance from this point to the segment `a`-`b`
    pub fn distance_to_segment(&self, a: Point, b: Point) -> f32 {
        let (px, py) = (self.x as f32, self.y as f32);
        let (ax, ay) = (a.x as f32, a.y as f32);
        let (bx, by) = (b.x as f32, b.y as f32);

        let (abx, aby) = (bx - ax, by - ay);
        let len_sq = abx * abx + aby * aby;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }

        let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
        let (cx, cy) = (ax + t * abx, ay + t * aby);
        (px - cx).hypot(py - cy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Phase of a game: the only transitions are Playing -> GameOver on self
/// collision and GameOver -> Playing on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Playing,
    GameOver,
}

/// What a single `update` call did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The head moved and nothing was hit
    Moved,
    /// The head reached the food
    AteFood,
    /// The head ran into the body; the game is now over
    Collided,
    /// The game was already over; nothing changed
    Frozen,
}

/// The snake body as a polyline from tail (front) to head (back).
///
/// Each point carries the length of the link joining it to its predecessor.
/// The tail's link is always zero, so `length()` is exactly the polyline
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnakePath {
    points: VecDeque<Point>,
    links: VecDeque<f64>,
    length: f64,
}

impl SnakePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new head and return the length of the link it added
    pub fn push_head(&mut self, point: Point) -> f64 {
        let link = self.head().map_or(0.0, |head| {
            let dx = point.x as f64 - head.x as f64;
            let dy = point.y as f64 - head.y as f64;
            dx.hypot(dy)
        });
        self.points.push_back(point);
        self.links.push_back(link);
        self.length += link;
        link
    }

    /// Drop tail points until the path fits in `target`. The head is kept.
    pub fn trim_to(&mut self, target: f64) {
        while self.length > target && self.points.len() > 1 {
            self.points.pop_front();
            self.links.pop_front();
            if let Some(link) = self.links.front_mut() {
                self.length -= *link;
                *link = 0.0;
            }
        }
        if self.points.len() == 1 {
            // Avoid drift from repeated float subtraction
            self.length = 0.0;
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.links.clear();
        self.length = 0.0;
    }

    pub fn head(&self) -> Option<Point> {
        self.points.back().copied()
    }

    pub fn tail(&self) -> Option<Point> {
        self.points.front().copied()
    }

    /// Total polyline length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Consecutive point pairs from tail to head
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }

    /// True if `point` lies within `threshold` of the body, ignoring the last
    /// `excluded` points (head included).
    pub fn touches(&self, point: Point, threshold: f32, excluded: usize) -> bool {
        let checked = self.points.len().saturating_sub(excluded);
        match checked {
            0 => false,
            1 => point.distance_to(self.points[0]) <= threshold,
            _ => self
                .points
                .range(..checked)
                .zip(self.points.range(1..checked))
                .any(|(a, b)| point.distance_to_segment(*a, *b) <= threshold),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
