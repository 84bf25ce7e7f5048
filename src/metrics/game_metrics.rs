use std::time::{Duration, Instant};

use crate::game::FrameOutcome;

/// Per-session statistics shown in the status bar and logged on exit
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Frames read from the source in the current game
    pub frames: u64,
    /// Frames in which the tracker reported no usable hand
    pub frames_without_hand: u64,
    /// Food eaten across the session
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            frames: 0,
            frames_without_hand: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.frames = 0;
        self.frames_without_hand = 0;
    }

    /// Account for one processed frame. `outcome` is `None` when no hand was
    /// found and the game was not updated.
    pub fn on_frame(&mut self, outcome: Option<FrameOutcome>) {
        self.frames += 1;
        match outcome {
            None => self.frames_without_hand += 1,
            Some(FrameOutcome::AteFood) => self.food_eaten += 1,
            Some(_) => {}
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// Share of frames in the current game with a usable hand, 0 to 100
    pub fn tracking_rate(&self) -> f32 {
        if self.frames == 0 {
            return 0.0;
        }
        let tracked = self.frames - self.frames_without_hand;
        tracked as f32 * 100.0 / self.frames as f32
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
