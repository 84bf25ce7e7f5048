use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the game
///
/// Lengths and sizes are in pixels. Fields missing from a config file take
/// their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the camera frame and game window
    pub window_width: u32,
    /// Height of the camera frame and game window
    pub window_height: u32,
    /// Target length of a fresh snake
    pub initial_snake_length: u32,
    /// Target length gained per food eaten
    pub length_increment: u32,

    /// Minimum confidence for the hand detector to report a hand
    pub detection_confidence: f32,
    /// Food image, must carry an alpha channel
    pub food_path: PathBuf,
    /// Flip captured frames horizontally so movement feels like a mirror
    pub mirror: bool,

    // Drawing
    /// Radius of the head marker
    pub circle_radius: u32,
    /// Thickness of the body line
    pub line_thickness: u32,

    // Tuning
    /// Distance kept between food and the window edges
    pub food_margin: u32,
    /// Head-to-food distance counted as eating. `None` derives it from the
    /// food image size.
    pub pickup_threshold: Option<f32>,
    /// Head-to-body distance counted as a self collision
    pub collision_threshold: f32,
    /// Number of most recent points (head included) ignored by the self
    /// collision check
    pub exclusion_window: usize,

    /// Seed for food placement; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            initial_snake_length: 150,
            length_increment: 50,
            detection_confidence: 0.8,
            food_path: PathBuf::from("Donut.png"),
            mirror: true,
            circle_radius: 20,
            line_thickness: 20,
            food_margin: 100,
            pickup_threshold: None,
            collision_threshold: 1.0,
            exclusion_window: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom window size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_width: width,
            window_height: height,
            ..Default::default()
        }
    }

    /// Create a small window for testing
    pub fn small() -> Self {
        Self {
            food_margin: 20,
            ..Self::new(320, 240)
        }
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err` with a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        if self.length_increment == 0 {
            return Err("length_increment must be at least 1".to_string());
        }

        if !(0.0..=1.0).contains(&self.detection_confidence) {
            return Err(format!(
                "detection_confidence must be in [0, 1], got {}",
                self.detection_confidence
            ));
        }

        if self.food_path.as_os_str().is_empty() {
            return Err("food_path must not be empty".to_string());
        }

        let max_size = self.window_width.max(self.window_height);
        if self.circle_radius == 0 || self.circle_radius > max_size {
            return Err(format!(
                "circle_radius must be in [1, {}], got {}",
                max_size, self.circle_radius
            ));
        }

        if self.line_thickness == 0 || self.line_thickness > max_size {
            return Err(format!(
                "line_thickness must be in [1, {}], got {}",
                max_size, self.line_thickness
            ));
        }

        if let Some(threshold) = self.pickup_threshold {
            if threshold.is_nan() || threshold < 0.0 {
                return Err(format!(
                    "pickup_threshold must be non-negative, got {}",
                    threshold
                ));
            }
        }

        if self.collision_threshold.is_nan() || self.collision_threshold < 0.0 {
            return Err(format!(
                "collision_threshold must be non-negative, got {}",
                self.collision_threshold
            ));
        }

        if self.exclusion_window == 0 {
            return Err("exclusion_window must be at least 1".to_string());
        }

        Ok(())
    }

    /// Load a configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
