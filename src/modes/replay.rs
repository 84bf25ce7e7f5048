//! Headless mode: drive the game from a recorded track, frame by frame.
//!
//! Useful for checking a recording, tuning thresholds, or rendering the end
//! state of a game to a PNG without a terminal.

use anyhow::{Context, Result};
use rand::Rng;
use std::path::PathBuf;

use crate::game::{FrameOutcome, Phase, SnakeGame};
use crate::input::{FrameSource, HandTracker};
use crate::metrics::GameMetrics;
use crate::render::Frame;

/// What a replay ended with
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub frames_without_hand: u64,
    pub score: u32,
    pub target_length: u32,
    pub phase: Phase,
    /// Frame index at which the snake hit itself, if it did
    pub game_over_frame: Option<u64>,
}

pub struct ReplayMode<S, T, R> {
    game: SnakeGame<R>,
    source: S,
    tracker: T,
    metrics: GameMetrics,
    output: Option<PathBuf>,
}

impl<S: FrameSource, T: HandTracker, R: Rng> ReplayMode<S, T, R> {
    pub fn new(game: SnakeGame<R>, source: S, tracker: T) -> Self {
        Self {
            game,
            source,
            tracker,
            metrics: GameMetrics::new(),
            output: None,
        }
    }

    /// Save the last annotated frame as a PNG
    pub fn save_last_frame(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }

    pub fn run(&mut self) -> Result<ReplaySummary> {
        let min_confidence = self.game.config().detection_confidence;
        let mut last_frame: Option<Frame> = None;
        let mut game_over_frame = None;

        while !self.tracker.finished() {
            let Some(mut frame) = self.source.next_frame().context("Failed to read frame")? else {
                log::info!("Frame source exhausted");
                break;
            };

            let head = self
                .tracker
                .locate(&frame)
                .and_then(|d| d.accepted(min_confidence));
            let outcome = head.map(|head| self.game.update(&mut frame, head));
            self.metrics.on_frame(outcome);

            match outcome {
                Some(FrameOutcome::AteFood) => log::info!(
                    "Frame {}: food eaten, score {}",
                    self.metrics.frames,
                    self.game.score()
                ),
                Some(FrameOutcome::Collided) => {
                    log::info!(
                        "Frame {}: game over with score {}",
                        self.metrics.frames,
                        self.game.score()
                    );
                    self.metrics.on_game_over(self.game.score());
                    game_over_frame = Some(self.metrics.frames);
                }
                None => log::debug!("Frame {}: no hand", self.metrics.frames),
                _ => {}
            }

            last_frame = Some(frame);
        }

        if let (Some(path), Some(frame)) = (self.output.as_ref(), last_frame.as_ref()) {
            frame
                .save(path)
                .with_context(|| format!("Failed to save frame to {}", path.display()))?;
            log::info!("Last frame saved to {}", path.display());
        }

        Ok(ReplaySummary {
            frames: self.metrics.frames,
            frames_without_hand: self.metrics.frames_without_hand,
            score: self.game.score(),
            target_length: self.game.target_length(),
            phase: self.game.phase(),
            game_over_frame,
        })
    }

    pub fn game(&self) -> &SnakeGame<R> {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FoodSprite, GameConfig, Point};
    use crate::input::{Backdrop, Detection, ScriptedTracker, Track};
    use crate::render::BACKDROP_COLOR;
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn game(config: GameConfig) -> SnakeGame<StdRng> {
        let sprite = FoodSprite::from_image(RgbaImage::new(20, 20));
        SnakeGame::new(config, sprite, StdRng::seed_from_u64(11))
    }

    fn backdrop(config: &GameConfig) -> Backdrop {
        Backdrop::solid(config.window_width, config.window_height, BACKDROP_COLOR)
    }

    #[test]
    fn test_replay_counts_frames() {
        let config = GameConfig {
            pickup_threshold: Some(0.0),
            ..GameConfig::small()
        };
        let mut track = Track::new();
        track.push(Some(Detection::new(Point::new(100, 100), 1.0)));
        track.push(None);
        track.push(Some(Detection::new(Point::new(110, 100), 0.2)));
        track.push(Some(Detection::new(Point::new(120, 100), 0.9)));

        let source = backdrop(&config);
        let mut replay = ReplayMode::new(game(config), source, ScriptedTracker::new(track));
        let summary = replay.run().unwrap();

        assert_eq!(summary.frames, 4);
        assert_eq!(summary.frames_without_hand, 2);
        assert_eq!(summary.phase, Phase::Playing);
        assert_eq!(summary.game_over_frame, None);
        assert_eq!(replay.game().path().len(), 2);
    }

    #[test]
    fn test_replay_reports_game_over_and_saves_frame() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("last.png");
        let config = GameConfig {
            pickup_threshold: Some(0.0),
            ..GameConfig::small()
        };

        // Square loop closing on its start, then more frames after the crash
        let mut points: Vec<Point> = [
            (100, 100),
            (110, 100),
            (120, 100),
            (130, 100),
            (130, 110),
            (130, 120),
            (130, 130),
            (120, 130),
            (110, 130),
            (100, 130),
            (100, 120),
            (100, 110),
            (100, 100),
            (150, 150),
        ]
        .into_iter()
        .map(Point::from)
        .collect();
        points.push(Point::new(160, 150));

        let source = backdrop(&config);
        let mut replay = ReplayMode::new(game(config), source, ScriptedTracker::from_points(points))
            .save_last_frame(output.clone());
        let summary = replay.run().unwrap();

        assert_eq!(summary.phase, Phase::GameOver);
        assert_eq!(summary.game_over_frame, Some(13));
        assert_eq!(summary.frames, 15);
        assert_eq!(replay.game().path().head(), Some(Point::new(100, 100)));

        let saved = image::open(&output).unwrap();
        assert_eq!(saved.width(), 320);
    }
}
