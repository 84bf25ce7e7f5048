use anyhow::Result;
use rand::SeedableRng;
use rand::{Rng, rngs::StdRng};

use super::{
    config::GameConfig,
    food::{FoodSprite, random_location},
    state::{FrameOutcome, Phase, Point, SnakePath},
};
use crate::render::{
    draw::{draw_line, fill_circle, overlay_sprite},
    font::{put_text_rect, text_size},
    Frame, GAME_OVER_COLOR, SCORE_BADGE_COLOR, SNAKE_BODY_COLOR, SNAKE_HEAD_COLOR, TEXT_COLOR,
};

/// Top-left corner of the score badge text
const SCORE_ORIGIN: (i32, i32) = (50, 50);
const SCORE_SCALE: u32 = 4;
const BADGE_PADDING: u32 = 10;

/// The snake game: one snake following the tracked hand, one food item.
///
/// Food placement draws from the injected random source `R`, so a seeded
/// generator gives a reproducible game.
pub struct SnakeGame<R = StdRng> {
    config: GameConfig,
    sprite: FoodSprite,
    rng: R,
    path: SnakePath,
    target_length: u32,
    food: Point,
    score: u32,
    phase: Phase,
}

impl SnakeGame<StdRng> {
    /// Load the food image named by the config and seed food placement from
    /// `config.seed`, or from entropy when unset
    pub fn from_config(config: GameConfig) -> Result<Self> {
        let sprite = FoodSprite::load(&config.food_path)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::new(config, sprite, rng))
    }
}

impl<R: Rng> SnakeGame<R> {
    /// Create a game ready to play
    pub fn new(config: GameConfig, sprite: FoodSprite, rng: R) -> Self {
        let mut engine = Self {
            target_length: config.initial_snake_length,
            config,
            sprite,
            rng,
            path: SnakePath::new(),
            food: Point::default(),
            score: 0,
            phase: Phase::Playing,
        };
        engine.reset();
        engine
    }

    /// Start a new game
    pub fn reset(&mut self) {
        self.path.clear();
        self.target_length = self.config.initial_snake_length;
        self.score = 0;
        self.phase = Phase::Playing;
        self.food = self.generate_food_location();
    }

    /// Advance the game by one camera frame and draw the result onto `frame`.
    ///
    /// The frame that ends the game still shows the snake. From the next
    /// frame on only the game-over overlay is drawn and state stays frozen
    /// until `reset`.
    pub fn update(&mut self, frame: &mut Frame, head_pos: Point) -> FrameOutcome {
        if self.phase == Phase::GameOver {
            self.draw_game_over(frame);
            return FrameOutcome::Frozen;
        }

        self.update_snake_length(head_pos);

        let outcome = if self.check_food_collision(head_pos) {
            self.target_length = self
                .target_length
                .saturating_add(self.config.length_increment);
            self.score += 1;
            self.food = self.generate_food_location();
            log::debug!(
                "Food eaten at {:?}, score {}, next food at {:?}",
                head_pos,
                self.score,
                self.food
            );
            FrameOutcome::AteFood
        } else if self.check_self_collision(head_pos) {
            self.phase = Phase::GameOver;
            log::info!("Game over at {:?} with score {}", head_pos, self.score);
            FrameOutcome::Collided
        } else {
            FrameOutcome::Moved
        };

        self.draw_snake(frame);
        overlay_sprite(frame, self.sprite.image(), self.sprite.top_left(self.food));
        put_text_rect(
            frame,
            &format!("Score: {}", self.score),
            SCORE_ORIGIN,
            SCORE_SCALE,
            TEXT_COLOR,
            SCORE_BADGE_COLOR,
            BADGE_PADDING,
        );

        outcome
    }

    /// Uniform random food position inside the window margin
    pub fn generate_food_location(&mut self) -> Point {
        random_location(
            &mut self.rng,
            self.config.window_width,
            self.config.window_height,
            self.config.food_margin,
        )
    }

    /// True if the head is close enough to the food to eat it
    pub fn check_food_collision(&self, head_pos: Point) -> bool {
        head_pos.distance_to(self.food) < self.pickup_threshold()
    }

    /// True if the head touches the body outside the exclusion window
    pub fn check_self_collision(&self, head_pos: Point) -> bool {
        self.path.touches(
            head_pos,
            self.config.collision_threshold,
            self.config.exclusion_window,
        )
    }

    /// Append the new head and trim the tail back to the target length.
    /// A head that has not moved adds nothing; a still hand would otherwise
    /// pile points onto itself and collide.
    fn update_snake_length(&mut self, new_point: Point) {
        if self.path.head() == Some(new_point) {
            return;
        }
        self.path.push_head(new_point);
        self.path.trim_to(self.target_length as f64);
    }

    fn pickup_threshold(&self) -> f32 {
        self.config
            .pickup_threshold
            .unwrap_or_else(|| self.sprite.pickup_radius())
    }

    fn draw_snake(&self, frame: &mut Frame) {
        for (a, b) in self.path.segments() {
            draw_line(frame, a, b, self.config.line_thickness, SNAKE_BODY_COLOR);
        }
        if let Some(head) = self.path.head() {
            fill_circle(frame, head, self.config.circle_radius, SNAKE_HEAD_COLOR);
        }
    }

    fn draw_game_over(&self, frame: &mut Frame) {
        let title_scale = (frame.width() / 128).max(1);
        let score_scale = (title_scale * 3 / 4).max(1);
        let gap = (title_scale * 4) as i32;
        let mid_y = frame.height() as i32 / 2;

        let title = "Game Over";
        let (w, h) = text_size(title, title_scale);
        let x = (frame.width() as i32 - w as i32) / 2;
        put_text_rect(
            frame,
            title,
            (x, mid_y - gap - h as i32),
            title_scale,
            TEXT_COLOR,
            GAME_OVER_COLOR,
            BADGE_PADDING * 2,
        );

        let final_score = format!("Final Score: {}", self.score);
        let (w, _) = text_size(&final_score, score_scale);
        let x = (frame.width() as i32 - w as i32) / 2;
        put_text_rect(
            frame,
            &final_score,
            (x, mid_y + gap),
            score_scale,
            TEXT_COLOR,
            GAME_OVER_COLOR,
            BADGE_PADDING * 2,
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_length(&self) -> u32 {
        self.target_length
    }

    pub fn path(&self) -> &SnakePath {
        &self.path
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
