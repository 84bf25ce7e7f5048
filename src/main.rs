use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use hand_snake::game::{GameConfig, SnakeGame};
use hand_snake::input::{Backdrop, ScriptedTracker, Track};
use hand_snake::logging::{LogTarget, init_logging};
use hand_snake::modes::{PlayMode, ReplayMode};
use hand_snake::render::BACKDROP_COLOR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hand_snake")]
#[command(version, about = "Snake steered by a tracked hand, drawn over the camera frame")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON config file; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Food image (PNG with alpha)
    #[arg(long)]
    food: Option<PathBuf>,

    /// Still image used in place of the camera
    #[arg(long)]
    backdrop: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Recorded track: written by play mode, read by replay mode
    #[arg(long)]
    track: Option<PathBuf>,

    /// Replay only: save the last frame as PNG
    #[arg(long)]
    output: Option<PathBuf>,

    /// Frames per second in play mode
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Log file for play mode (replay logs to stderr)
    #[arg(long, default_value = "hand_snake.log")]
    log_file: PathBuf,

    /// Log debug messages
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play in the terminal, steering with the mouse
    Play,
    /// Run a recorded track headless and print a summary
    Replay,
}

impl Cli {
    /// Config file (or defaults) with command line overrides applied
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        if let Some(food) = &self.food {
            config.food_path = food.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }

    fn backdrop(&self, config: &GameConfig) -> Result<Backdrop> {
        match &self.backdrop {
            Some(path) => Backdrop::from_image(
                path,
                config.window_width,
                config.window_height,
                config.mirror,
            ),
            None => Ok(Backdrop::solid(
                config.window_width,
                config.window_height,
                BACKDROP_COLOR,
            )),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Play => init_logging(LogTarget::File(&cli.log_file), cli.verbose)?,
        Mode::Replay => init_logging(LogTarget::Stderr, cli.verbose)?,
    }

    let config = cli.game_config()?;
    let source = cli.backdrop(&config)?;
    let game = SnakeGame::from_config(config).context("Failed to start game")?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(game, source, cli.fps);
            if let Some(track) = &cli.track {
                play_mode = play_mode.record_to(track.clone());
            }
            play_mode.run().await?;
        }
        Mode::Replay => {
            let Some(track_path) = &cli.track else {
                bail!("Replay mode needs --track");
            };
            let track = Track::load(track_path)?;
            log::info!("Replaying {} frames from {}", track.len(), track_path.display());

            let mut replay_mode = ReplayMode::new(game, source, ScriptedTracker::new(track));
            if let Some(output) = &cli.output {
                replay_mode = replay_mode.save_last_frame(output.clone());
            }
            let summary = replay_mode.run()?;

            println!("Frames:        {}", summary.frames);
            println!("Without hand:  {}", summary.frames_without_hand);
            println!("Score:         {}", summary.score);
            println!("Target length: {}", summary.target_length);
            match summary.game_over_frame {
                Some(frame) => println!("Game over at frame {}", frame),
                None => println!("Still playing: {:?}", summary.phase),
            }
        }
    }

    Ok(())
}
