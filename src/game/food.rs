use anyhow::{Context, Result};
use image::RgbaImage;
use rand::Rng;
use std::path::Path;

use super::state::Point;

/// The food image drawn centred on the food point
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSprite {
    image: RgbaImage,
}

impl FoodSprite {
    /// Load the food image. A missing or undecodable file is a startup error.
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Food image not found: {}", path.display()))?
            .into_rgba8();
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pickup distance implied by the image: half its larger side
    pub fn pickup_radius(&self) -> f32 {
        self.width().max(self.height()) as f32 / 2.0
    }

    /// Top-left corner that centres the sprite on `center`
    pub fn top_left(&self, center: Point) -> Point {
        center.moved_by(-(self.width() as i32 / 2), -(self.height() as i32 / 2))
    }
}

/// Uniform random point at least `margin` away from the window edges.
///
/// When the window is too small for the margin on an axis, that axis
/// collapses to the window centre.
pub fn random_location<R: Rng>(rng: &mut R, width: u32, height: u32, margin: u32) -> Point {
    Point::new(
        random_coordinate(rng, width, margin),
        random_coordinate(rng, height, margin),
    )
}

fn random_coordinate<R: Rng>(rng: &mut R, extent: u32, margin: u32) -> i32 {
    let low = margin as i32;
    let high = extent as i32 - margin as i32;
    if low >= high {
        extent as i32 / 2
    } else {
        rng.gen_range(low..high)
    }
}
