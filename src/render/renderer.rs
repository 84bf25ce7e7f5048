use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{Frame as CameraFrame, FrameView};
use crate::game::Phase;
use crate::metrics::GameMetrics;

/// Game facts shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub target_length: u32,
    pub phase: Phase,
    pub hand_visible: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the screen and return the area the camera frame occupies, so
    /// pointer positions can be mapped back to frame pixels
    pub fn render(
        &self,
        frame: &mut Frame,
        image: &CameraFrame,
        hud: &Hud,
        metrics: &GameMetrics,
    ) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Camera view
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(hud, metrics);
        frame.render_widget(stats, chunks[0]);

        let border_color = match hud.phase {
            Phase::Playing => Color::White,
            Phase::GameOver => Color::Red,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(border_color))
            .title(" Hand Snake ");
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let view = FrameView::fit(inner, image.width(), image.height());
        frame.render_widget(FrameView::new(image), view);

        let controls = self.render_controls(hud);
        frame.render_widget(controls, chunks[2]);

        view
    }

    fn render_stats(&self, hud: &Hud, metrics: &GameMetrics) -> Paragraph<'_> {
        let hand = if hud.hand_visible {
            Span::styled("tracking", Style::default().fg(Color::Green))
        } else {
            Span::styled("no hand", Style::default().fg(Color::DarkGray))
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                hud.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(hud.target_length.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            hand,
            Span::styled(
                format!(" {:.0}%", metrics.tracking_rate()),
                Style::default().fg(Color::DarkGray),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if hud.phase == Phase::GameOver {
            spans.push(Span::styled(
                "GAME OVER  ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        spans.extend([
            Span::styled("Mouse", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::FrameOutcome;
    use image::Rgba;
    use ratatui::{Terminal, backend::TestBackend};

    fn hud(phase: Phase) -> Hud {
        Hud {
            score: 3,
            target_length: 300,
            phase,
            hand_visible: true,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_render_reports_view_inside_border() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let image = CameraFrame::from_pixel(1280, 720, Rgba([0, 128, 0, 255]));
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        let mut view = Rect::default();
        terminal
            .draw(|f| view = renderer.render(f, &image, &hud(Phase::Playing), &metrics))
            .unwrap();

        // Header row + top border
        assert!(view.y >= 2);
        assert!(view.width > 0 && view.height > 0);
        assert!(view.x + view.width <= 79);

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 3"));
        assert!(text.contains("tracking 0%"));
        assert!(text.contains("Hand Snake"));
    }

    #[test]
    fn test_header_shows_tracking_rate() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let image = CameraFrame::new(64, 36);
        let renderer = Renderer::new();
        let mut metrics = GameMetrics::new();
        metrics.on_frame(Some(FrameOutcome::Moved));
        metrics.on_frame(None);
        metrics.on_frame(Some(FrameOutcome::Moved));
        metrics.on_frame(Some(FrameOutcome::Moved));

        terminal
            .draw(|f| {
                renderer.render(f, &image, &hud(Phase::Playing), &metrics);
            })
            .unwrap();

        assert!(screen_text(&terminal).contains("tracking 75%"));
    }

    #[test]
    fn test_game_over_footer() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let image = CameraFrame::new(64, 36);
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|f| {
                renderer.render(f, &image, &hud(Phase::GameOver), &metrics);
            })
            .unwrap();

        assert!(screen_text(&terminal).contains("GAME OVER"));
    }
}
