//! Raster primitives over an RGBA frame.
//!
//! Every primitive clips to the frame, so callers may pass coordinates that
//! lie partly or entirely off screen.

use image::{Rgba, RgbaImage};

use crate::game::Point;

/// Alpha-blend `color` onto the pixel at (x, y); no-op when off frame
pub fn blend_pixel(frame: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }

    let dst = frame.get_pixel_mut(x as u32, y as u32);
    let alpha = color[3] as u32;
    if alpha == 255 {
        *dst = color;
        return;
    }
    if alpha == 0 {
        return;
    }

    let inv = 255 - alpha;
    for c in 0..3 {
        dst[c] = ((color[c] as u32 * alpha + dst[c] as u32 * inv + 127) / 255) as u8;
    }
    dst[3] = dst[3].max(color[3]);
}

/// Fill the rectangle with top-left (x, y) and size w x h
pub fn fill_rect(frame: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w as i32).min(frame.width() as i32);
    let y1 = (y + h as i32).min(frame.height() as i32);

    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(frame, px, py, color);
        }
    }
}

/// Fill a disc centred on `center`
pub fn fill_circle(frame: &mut RgbaImage, center: Point, radius: u32, color: Rgba<u8>) {
    let r = radius as i64;
    let r_sq = (r as i128).pow(2);
    let (cx, cy) = (center.x as i64, center.y as i64);

    // Only pixels that land on the frame
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(frame.width() as i64 - 1);
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(frame.height() as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if ((x - cx) as i128).pow(2) + ((y - cy) as i128).pow(2) <= r_sq {
                blend_pixel(frame, x as i32, y as i32, color);
            }
        }
    }
}

/// Draw a line `thickness` pixels wide with round caps
pub fn draw_line(frame: &mut RgbaImage, a: Point, b: Point, thickness: u32, color: Rgba<u8>) {
    let half = thickness.max(1) as f32 / 2.0;
    let pad = half.ceil() as i32;

    let x0 = a.x.min(b.x).saturating_sub(pad).max(0);
    let y0 = a.y.min(b.y).saturating_sub(pad).max(0);
    let x1 = a.x.max(b.x).saturating_add(pad).min(frame.width() as i32 - 1);
    let y1 = a.y.max(b.y).saturating_add(pad).min(frame.height() as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if Point::new(x, y).distance_to_segment(a, b) <= half {
                blend_pixel(frame, x, y, color);
            }
        }
    }
}

/// Blend `sprite` onto the frame with its top-left corner at `top_left`,
/// using the sprite's alpha channel
pub fn overlay_sprite(frame: &mut RgbaImage, sprite: &RgbaImage, top_left: Point) {
    for (sx, sy, pixel) in sprite.enumerate_pixels() {
        blend_pixel(frame, top_left.x + sx as i32, top_left.y + sy as i32, *pixel);
    }
}
