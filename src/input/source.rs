//! Frame sources. A camera capture backend plugs in behind [`FrameSource`].

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::Rgba;
use std::path::Path;

use crate::render::Frame;

/// Produces the frames the game is drawn over
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// A still background standing in for the camera: a solid colour or an
/// image scaled to the window. Never runs out.
#[derive(Debug, Clone)]
pub struct Backdrop {
    frame: Frame,
}

impl Backdrop {
    pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            frame: Frame::from_pixel(width, height, color),
        }
    }

    /// Load an image and scale it to the window, mirrored if asked
    pub fn from_image(path: &Path, width: u32, height: u32, mirror: bool) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to open backdrop image {}", path.display()))?
            .into_rgba8();
        let mut frame = if image.dimensions() == (width, height) {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Triangle)
        };
        if mirror {
            imageops::flip_horizontal_in_place(&mut frame);
        }
        Ok(Self { frame })
    }
}

impl FrameSource for Backdrop {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(Some(self.frame.clone()))
    }
}
