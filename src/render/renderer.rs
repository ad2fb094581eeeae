use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::Phase;
use crate::metrics::GameMetrics;

use super::canvas::PixelCanvas;

pub const RESTART_LABEL: &str = "[ Restart ]";

/// Terminal layout: stats header, the game canvas, controls footer
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. Returns the screen area of the restart button so
    /// mouse clicks can be hit-tested against it.
    pub fn render(
        &self,
        frame: &mut Frame,
        canvas: &PixelCanvas,
        metrics: &GameMetrics,
        phase: Phase,
    ) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(metrics), chunks[0]);

        let block = self.board_block(phase);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        frame.render_widget(canvas, inner);

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(RESTART_LABEL.len() as u16 + 2),
            ])
            .split(chunks[2]);

        frame.render_widget(self.render_controls(), footer[0]);
        let button = Rect {
            y: footer[1].y + footer[1].height / 2,
            height: footer[1].height.min(1),
            ..footer[1]
        };
        frame.render_widget(self.render_restart_button(), button);

        button
    }

    fn board_block(&self, phase: Phase) -> Block<'_> {
        let (title, color) = match phase {
            Phase::Colliding => (" Game Over ", Color::Red),
            Phase::Paused => (" Paused ", Color::Yellow),
            Phase::Running => (" Snake ", Color::White),
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(color))
            .title(title)
    }

    fn render_stats(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}/s", metrics.tick_rate), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];
        if metrics.paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(""), Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" to pause | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_restart_button(&self) -> Paragraph<'_> {
        Paragraph::new(Span::styled(
            RESTART_LABEL,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
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
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, layout::Position};

    use crate::render::surface::{Rgba, Surface};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(metrics: &GameMetrics, phase: Phase) -> (Buffer, Rect) {
        let mut canvas = PixelCanvas::new(40, 40);
        canvas.fill_rect(0, 0, 40, 40, Rgba::rgb(10, 20, 30));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut button = Rect::default();
        terminal
            .draw(|frame| {
                button = Renderer::new().render(frame, &canvas, metrics, phase);
            })
            .unwrap();
        (terminal.backend().buffer().clone(), button)
    }

    #[test]
    fn test_header_shows_stats() {
        let mut metrics = GameMetrics::new();
        metrics.score = 7;
        metrics.high_score = 12;
        metrics.tick_rate = 9;

        let (buf, _) = draw(&metrics, Phase::Running);
        let header = row_text(&buf, 1);
        assert!(header.contains("Score: 7"), "{header}");
        assert!(header.contains("Best: 12"));
        assert!(header.contains("Speed: 9/s"));
        assert!(header.contains("Time: 00:00"));
        assert!(!header.contains("PAUSED"));
    }

    #[test]
    fn test_paused_marker() {
        let mut metrics = GameMetrics::new();
        metrics.paused = true;
        let (buf, _) = draw(&metrics, Phase::Paused);
        assert!(row_text(&buf, 1).contains("PAUSED"));
        assert!(screen_text(&buf).contains(" Paused "));
    }

    #[test]
    fn test_game_over_title() {
        let (buf, _) = draw(&GameMetrics::new(), Phase::Colliding);
        assert!(screen_text(&buf).contains(" Game Over "));
    }

    #[test]
    fn test_restart_button_area() {
        let (buf, button) = draw(&GameMetrics::new(), Phase::Running);

        assert_eq!(button.height, 1);
        assert_eq!(button.y, 28);
        assert!(button.right() <= 100);
        assert!(row_text(&buf, button.y).contains(RESTART_LABEL));

        let label_x = row_text(&buf, button.y)
            .find(RESTART_LABEL)
            .map(|byte_offset| row_text(&buf, button.y)[..byte_offset].chars().count() as u16)
            .unwrap();
        assert!(button.contains(Position::new(label_x, button.y)));
        assert!(!button.contains(Position::new(0, button.y)));
    }

    #[test]
    fn test_canvas_is_drawn_inside_board() {
        let (buf, _) = draw(&GameMetrics::new(), Phase::Running);
        let picture = (3..27)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].symbol() == "\u{2580}")
            .count();
        assert!(picture > 0);
        assert_eq!(buf[(50, 15)].fg, Color::Rgb(10, 20, 30));
    }
}
