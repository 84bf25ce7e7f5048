//! Interactive mode: the terminal shows the annotated frame and the mouse
//! pointer stands in for the tracked hand.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;

use crate::game::{FrameOutcome, SnakeGame};
use crate::input::{
    Detection, FrameSource, HandTracker, InputHandler, KeyAction, PointerTracker, Track,
};
use crate::metrics::GameMetrics;
use crate::render::{Frame, Renderer, renderer::Hud};

pub struct PlayMode<S, R> {
    game: SnakeGame<R>,
    source: S,
    tracker: PointerTracker,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    last_frame: Option<Frame>,
    hand_visible: bool,
    recording: Option<(PathBuf, Track)>,
    should_quit: bool,
}

impl<S: FrameSource, R: Rng> PlayMode<S, R> {
    pub fn new(game: SnakeGame<R>, source: S, fps: u32) -> Self {
        let config = game.config();
        let tracker = PointerTracker::new(config.window_width, config.window_height);

        Self {
            game,
            source,
            tracker,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_interval: Duration::from_millis(1000 / fps.clamp(1, 120) as u64),
            last_frame: None,
            hand_visible: false,
            recording: None,
            should_quit: false,
        }
    }

    /// Save every frame's detection to `path` when the session ends
    pub fn record_to(mut self, path: PathBuf) -> Self {
        self.recording = Some((path, Track::new()));
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        log::info!(
            "Play started: {}x{} frames every {:?}",
            self.game.config().window_width,
            self.game.config().window_height,
            self.frame_interval
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        self.finish()?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(self.frame_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Read, update and show one frame
                _ = frame_timer.tick() => {
                    if !self.process_frame()? {
                        log::info!("Frame source exhausted");
                        self.should_quit = true;
                    }
                    self.metrics.update();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some((column, row)) = self.input_handler.pointer_position(mouse) {
                    self.tracker.on_pointer(column, row);
                }
            }
            _ => {}
        }
    }

    /// Returns false once the frame source has nothing left
    fn process_frame(&mut self) -> Result<bool> {
        let Some(mut frame) = self.source.next_frame().context("Failed to read frame")? else {
            return Ok(false);
        };

        let detection = self.tracker.locate(&frame);
        let outcome = self.apply_detection(&mut frame, detection);
        self.hand_visible = outcome.is_some();

        if let Some((_, track)) = self.recording.as_mut() {
            track.push(detection);
        }

        self.last_frame = Some(frame);
        Ok(true)
    }

    /// Update the game when the detection is confident enough
    fn apply_detection(
        &mut self,
        frame: &mut Frame,
        detection: Option<Detection>,
    ) -> Option<FrameOutcome> {
        let min_confidence = self.game.config().detection_confidence;
        let head = detection.and_then(|d| d.accepted(min_confidence));
        let outcome = head.map(|head| self.game.update(frame, head));

        self.metrics.on_frame(outcome);
        if outcome == Some(FrameOutcome::Collided) {
            self.metrics.on_game_over(self.game.score());
        }
        outcome
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let Some(image) = self.last_frame.as_ref() else {
            return Ok(());
        };

        let hud = Hud {
            score: self.game.score(),
            target_length: self.game.target_length(),
            phase: self.game.phase(),
            hand_visible: self.hand_visible,
        };

        let mut view = Rect::default();
        terminal
            .draw(|frame| {
                view = self.renderer.render(frame, image, &hud, &self.metrics);
            })
            .context("Failed to draw frame")?;
        self.tracker.set_view(view);

        Ok(())
    }

    fn reset_game(&mut self) {
        log::info!("Game reset at score {}", self.game.score());
        self.game.reset();
        self.tracker.clear();
        self.metrics.on_game_start();
    }

    fn finish(&mut self) -> Result<()> {
        log::info!(
            "Session over: {} games, best score {}, {} food eaten",
            self.metrics.games_played,
            self.metrics.high_score,
            self.metrics.food_eaten
        );

        if let Some((path, track)) = self.recording.take() {
            track.save(&path)?;
            log::info!("Recorded {} frames to {}", track.len(), path.display());
        }
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FoodSprite, GameConfig, Phase, Point};
    use crate::input::Backdrop;
    use crate::render::BACKDROP_COLOR;
    use image::RgbaImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mode() -> PlayMode<Backdrop, StdRng> {
        // Food can never be eaten, so outcomes do not depend on placement
        let config = GameConfig {
            pickup_threshold: Some(0.0),
            ..GameConfig::small()
        };
        let source = Backdrop::solid(config.window_width, config.window_height, BACKDROP_COLOR);
        let sprite = FoodSprite::from_image(RgbaImage::new(20, 20));
        let game = SnakeGame::new(config, sprite, StdRng::seed_from_u64(5));
        PlayMode::new(game, source, 30)
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.game.phase(), Phase::Playing);
        assert_eq!(mode.game.score(), 0);
        assert_eq!(mode.frame_interval, Duration::from_millis(33));
    }

    #[test]
    fn test_frame_without_hand_skips_update() {
        let mut mode = mode();
        assert!(mode.process_frame().unwrap());

        assert!(!mode.hand_visible);
        assert!(mode.game.path().is_empty());
        assert_eq!(mode.metrics.frames_without_hand, 1);
        assert!(mode.last_frame.is_some());
    }

    #[test]
    fn test_low_confidence_is_ignored() {
        let mut mode = mode();
        let mut frame = Frame::new(320, 240);

        let weak = Detection::new(Point::new(100, 100), 0.5);
        assert_eq!(mode.apply_detection(&mut frame, Some(weak)), None);

        let sure = Detection::new(Point::new(100, 100), 0.9);
        assert_eq!(
            mode.apply_detection(&mut frame, Some(sure)),
            Some(FrameOutcome::Moved)
        );
        assert_eq!(mode.game.path().head(), Some(Point::new(100, 100)));
    }

    #[test]
    fn test_pointer_drives_snake_and_is_recorded() {
        let mut mode = mode();
        mode.recording = Some((PathBuf::from("unused.json"), Track::new()));
        mode.tracker.set_view(Rect::new(0, 0, 32, 12));
        mode.tracker.on_pointer(10, 5);

        assert!(mode.process_frame().unwrap());

        assert!(mode.hand_visible);
        assert_eq!(mode.game.path().head(), Some(Point::new(105, 110)));
        let (_, track) = mode.recording.as_ref().unwrap();
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        let mut frame = Frame::new(320, 240);
        mode.apply_detection(&mut frame, Some(Detection::new(Point::new(50, 50), 1.0)));
        mode.metrics.frames = 10;
        mode.tracker.set_view(Rect::new(0, 0, 32, 12));
        mode.tracker.on_pointer(3, 3);

        mode.reset_game();

        assert!(mode.game.path().is_empty());
        assert_eq!(mode.metrics.frames, 0);
        assert_eq!(mode.game.phase(), Phase::Playing);
        assert_eq!(mode.tracker.locate(&frame), None);
    }
}
