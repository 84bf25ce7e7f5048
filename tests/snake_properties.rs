use hand_snake::game::{FoodSprite, FrameOutcome, GameConfig, Phase, Point, SnakeGame};
use hand_snake::render::{BACKDROP_COLOR, Frame};
use image::{Rgba, RgbaImage};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn new_game(seed: u64) -> SnakeGame<StdRng> {
    let sprite = FoodSprite::from_image(RgbaImage::from_pixel(40, 40, Rgba([255, 160, 0, 255])));
    SnakeGame::new(GameConfig::small(), sprite, StdRng::seed_from_u64(seed))
}

fn blank_frame() -> Frame {
    let config = GameConfig::small();
    Frame::from_pixel(config.window_width, config.window_height, BACKDROP_COLOR)
}

fn in_food_bounds(p: Point) -> bool {
    let config = GameConfig::small();
    let margin = config.food_margin as i32;
    (margin..config.window_width as i32 - margin).contains(&p.x)
        && (margin..config.window_height as i32 - margin).contains(&p.y)
}

/// Walk from `from` to `to` in steps of at most `step` pixels
fn walk(from: Point, to: Point, step: i32) -> Vec<Point> {
    let dist = from.distance_to(to);
    let steps = (dist / step as f32).ceil().max(1.0) as i32;
    (1..=steps)
        .map(|i| {
            Point::new(
                from.x + (to.x - from.x) * i / steps,
                from.y + (to.y - from.y) * i / steps,
            )
        })
        .collect()
}

#[test]
fn scenario_eating_food_grows_snake() {
    let mut game = new_game(2024);
    let mut frame = blank_frame();
    assert_eq!(game.target_length(), 150);

    let food = game.food();
    // Approach from whichever side has room
    let start = if food.x > 160 {
        food.moved_by(-60, 0)
    } else {
        food.moved_by(60, 0)
    };
    game.update(&mut frame, start);

    let mut ate = false;
    for p in walk(start, food, 5) {
        if game.update(&mut frame, p) == FrameOutcome::AteFood {
            ate = true;
            break;
        }
    }

    assert!(ate);
    assert_eq!(game.target_length(), 200);
    assert_eq!(game.score(), 1);
    assert_ne!(game.food(), food);
    assert!(in_food_bounds(game.food()));
}

#[test]
fn scenario_looping_back_ends_game() {
    let mut game = new_game(7);
    let mut frame = blank_frame();
    let food = game.food();

    // A small square far enough from the food not to eat it
    let origin = if food.x > 160 {
        Point::new(40, 40)
    } else {
        Point::new(240, 160)
    };
    let mut track = vec![origin];
    for corner in [(30, 0), (30, 30), (0, 30), (0, 0)] {
        let from = *track.last().unwrap();
        track.extend(walk(from, origin.moved_by(corner.0, corner.1), 10));
    }

    let mut outcomes: Vec<FrameOutcome> =
        track.iter().map(|p| game.update(&mut frame, *p)).collect();
    assert_eq!(outcomes.pop(), Some(FrameOutcome::Collided));
    assert!(outcomes.iter().all(|o| *o == FrameOutcome::Moved));
    assert_eq!(game.phase(), Phase::GameOver);

    let path = game.path().clone();
    for p in walk(origin, Point::new(200, 200), 10) {
        assert_eq!(game.update(&mut frame, p), FrameOutcome::Frozen);
    }
    assert_eq!(game.path(), &path);
    assert_eq!(game.score(), 0);
    assert_eq!(game.target_length(), 150);
}

#[test]
fn reset_starts_over() {
    let mut game = new_game(1);
    let mut frame = blank_frame();
    for p in walk(Point::new(30, 30), Point::new(290, 210), 8) {
        game.update(&mut frame, p);
    }

    game.reset();

    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.target_length(), 150);
    assert_eq!(game.score(), 0);
    assert!(game.path().is_empty());
    assert!(in_food_bounds(game.food()));
}

fn step_strategy() -> impl Strategy<Value = (i32, i32)> {
    (-25i32..=25, -25i32..=25)
}

proptest! {
    /// Path length never exceeds the target, and the only way target and
    /// score change is by exactly one pickup's worth
    #[test]
    fn prop_length_and_growth(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..300)) {
        let mut game = new_game(seed);
        let mut frame = blank_frame();
        let mut head = Point::new(160, 120);

        for (dx, dy) in steps {
            head = Point::new((head.x + dx).clamp(0, 319), (head.y + dy).clamp(0, 239));
            let target = game.target_length();
            let score = game.score();
            let food = game.food();

            let outcome = game.update(&mut frame, head);

            match outcome {
                FrameOutcome::AteFood => {
                    prop_assert_eq!(game.target_length(), target + 50);
                    prop_assert_eq!(game.score(), score + 1);
                    prop_assert!(in_food_bounds(game.food()));
                }
                _ => {
                    prop_assert_eq!(game.target_length(), target);
                    prop_assert_eq!(game.score(), score);
                    prop_assert_eq!(game.food(), food);
                }
            }

            if outcome != FrameOutcome::Frozen {
                prop_assert!(game.path().length() <= game.target_length() as f64 + 1e-6);
                prop_assert_eq!(game.path().head(), Some(head));
            }
        }
    }

    /// Nothing moves once the game is over
    #[test]
    fn prop_game_over_is_terminal(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..50)) {
        let mut game = new_game(seed);
        let mut frame = blank_frame();
        let food = game.food();

        let origin = if food.x > 160 { Point::new(40, 40) } else { Point::new(240, 160) };
        let mut track = vec![origin];
        for corner in [(30, 0), (30, 30), (0, 30), (0, 0)] {
            let from = *track.last().unwrap();
            track.extend(walk(from, origin.moved_by(corner.0, corner.1), 10));
        }
        for p in track {
            game.update(&mut frame, p);
        }
        prop_assert_eq!(game.phase(), Phase::GameOver);

        let path = game.path().clone();
        let (score, target, food) = (game.score(), game.target_length(), game.food());
        let mut head = origin;
        for (dx, dy) in steps {
            head = head.moved_by(dx, dy);
            prop_assert_eq!(game.update(&mut frame, head), FrameOutcome::Frozen);
        }
        prop_assert_eq!(game.path(), &path);
        prop_assert_eq!(game.score(), score);
        prop_assert_eq!(game.target_length(), target);
        prop_assert_eq!(game.food(), food);
    }
}
