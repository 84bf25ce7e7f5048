use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::Frame;

/// Shows a camera frame in the terminal, two pixel rows per cell using the
/// upper half block with the top pixel as foreground and the bottom pixel as
/// background. The frame is sampled, not filtered.
pub struct FrameView<'a> {
    frame: &'a Frame,
}

impl<'a> FrameView<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        Self { frame }
    }

    /// Largest rect inside `area`, centred, that keeps the frame's aspect
    /// ratio (a cell is one pixel wide and two pixels tall)
    pub fn fit(area: Rect, frame_width: u32, frame_height: u32) -> Rect {
        if area.width == 0 || area.height == 0 || frame_width == 0 || frame_height == 0 {
            return Rect::new(area.x, area.y, 0, 0);
        }

        let (fw, fh) = (frame_width as u64, frame_height as u64);
        let mut width = area.width as u64;
        let mut height = (width * fh).div_ceil(fw * 2);
        if height > area.height as u64 {
            height = area.height as u64;
            width = (height * 2 * fw / fh).clamp(1, area.width as u64);
        }

        let (width, height) = (width as u16, height.max(1) as u16);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

fn to_color(pixel: &image::Rgba<u8>) -> Color {
    Color::Rgb(pixel[0], pixel[1], pixel[2])
}

impl Widget for FrameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (fw, fh) = (self.frame.width() as u64, self.frame.height() as u64);
        if fw == 0 || fh == 0 || area.width == 0 || area.height == 0 {
            return;
        }
        let (w, h) = (area.width as u64, area.height as u64);

        for cy in 0..area.height {
            // Centres of the upper and lower half of the cell
            let top = ((4 * cy as u64 + 1) * fh / (4 * h)).min(fh - 1) as u32;
            let bottom = ((4 * cy as u64 + 3) * fh / (4 * h)).min(fh - 1) as u32;

            for cx in 0..area.width {
                let px = ((2 * cx as u64 + 1) * fw / (2 * w)).min(fw - 1) as u32;
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_symbol("▀")
                        .set_fg(to_color(self.frame.get_pixel(px, top)))
                        .set_bg(to_color(self.frame.get_pixel(px, bottom)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fit_keeps_aspect() {
        // 16:9 frame in a wide terminal is limited by height
        let rect = FrameView::fit(Rect::new(0, 0, 200, 40), 1280, 720);
        assert_eq!(rect, Rect::new(29, 0, 142, 40));

        // and in a tall terminal by width
        let rect = FrameView::fit(Rect::new(2, 1, 64, 100), 1280, 720);
        assert_eq!(rect, Rect::new(2, 42, 64, 18));
    }

    #[test]
    fn test_fit_empty_area() {
        let rect = FrameView::fit(Rect::new(3, 3, 0, 10), 1280, 720);
        assert_eq!(rect.area(), 0);
    }

    #[test]
    fn test_render_half_blocks() {
        // Top half red, bottom half blue
        let mut frame = Frame::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        for x in 0..4 {
            for y in 0..2 {
                frame.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        FrameView::new(&frame).render(area, &mut buf);

        let cell = &buf[(1, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }
}
