use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{EndReason, GameState, Position, Status};
use crate::metrics::GameMetrics;

const HEAD: Color = Color::Yellow;
const BODY: Color = Color::Blue;
const HEALTHY: Color = Color::Green;
const UNHEALTHY: Color = Color::Red;
const BACKGROUND: Color = Color::DarkGray;

/// Which screen the interactive mode is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Seconds left before the round starts
    Countdown(u64),
    Playing,
    /// `accepting_input` is false during the pause after the round ends
    GameOver { accepting_input: bool },
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        screen: Screen,
        state: &GameState,
        metrics: &GameMetrics,
        tick_rate: u32,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, tick_rate);
        frame.render_widget(stats, chunks[0]);

        let game_area = centered(chunks[1], state);

        let body = match screen {
            Screen::Countdown(secs) => self.render_countdown(game_area, secs),
            Screen::Playing => self.render_grid(state),
            Screen::GameOver { accepting_input } => {
                self.render_game_over(game_area, state, accepting_input)
            }
        };
        frame.render_widget(body, game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);
                let cell = Style::default().bg(BACKGROUND);

                let span = if pos == head {
                    Span::styled("██", cell.fg(HEAD))
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("██", cell.fg(BODY))
                } else if pos == state.healthy_food {
                    // ring with a bright center
                    Span::styled("◉ ", cell.fg(HEALTHY).add_modifier(Modifier::BOLD))
                } else if pos == state.unhealthy_food {
                    Span::styled("● ", cell.fg(UNHEALTHY))
                } else {
                    Span::styled("  ", cell)
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Healthy Snake "),
        )
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        tick_rate: u32,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let head = state.snake.head();
        let (dx, dy) = state.snake.direction.delta();

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
                Span::raw("    "),
                Span::styled("Speed: ", label),
                Span::styled(format!("{tick_rate}/s"), value),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(metrics.high_score.to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
            ]),
            Line::from(Span::styled(
                format!("Head: ({}, {})  Dir: ({}, {})", head.x, head.y, dx, dy),
                Style::default().fg(Color::Rgb(255, 200, 0)),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
    }

    fn render_countdown(&self, area: Rect, secs: u64) -> Paragraph<'_> {
        let mut text = padding(area, 1);
        text.push(Line::from(Span::styled(
            secs.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Get ready "),
        )
    }

    fn render_game_over(
        &self,
        area: Rect,
        state: &GameState,
        accepting_input: bool,
    ) -> Paragraph<'_> {
        let red = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        let mut text = padding(area, 4);
        text.push(Line::from(Span::styled(
            format!("Game Over! Score: {}", state.score),
            red,
        )));
        if state.status == Status::Over(EndReason::BoardFull) {
            text.push(Line::from(Span::styled(
                "The board is full",
                Style::default().fg(Color::Green),
            )));
        } else {
            text.push(Line::from(""));
        }
        text.push(Line::from(""));
        if accepting_input {
            text.push(Line::from(vec![
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", red),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("◉", Style::default().fg(HEALTHY)),
            Span::raw(" grows | "),
            Span::styled("●", Style::default().fg(UNHEALTHY)),
            Span::raw(" does nothing | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Area sized to the grid (two columns per cell plus borders), centered in
/// `area` and clamped to it
fn centered(area: Rect, state: &GameState) -> Rect {
    let width = (state.grid_width as u16).saturating_mul(2).saturating_add(2);
    let height = (state.grid_height as u16).saturating_add(2);
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Blank lines that push `content_lines` lines of text to the vertical middle
fn padding(area: Rect, content_lines: u16) -> Vec<Line<'static>> {
    let inner = area.height.saturating_sub(2);
    let top = inner.saturating_sub(content_lines) / 2;
    (0..top).map(|_| Line::from("")).collect()
}
