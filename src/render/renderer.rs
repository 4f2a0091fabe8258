use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::pulse::FruitPulse;
use crate::game::{self, SceneView, SessionState};
use crate::metrics::GameMetrics;

/// Pulse scale above which the fruit is drawn in its swollen form
const SWOLLEN_SCALE: f32 = 1.5;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        scene: &SceneView<'_>,
        pulse: &FruitPulse,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(4), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], scene, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(chunks[1], scene, pulse);
        frame.render_widget(grid, chunks[1]);

        let footer = match scene.state {
            SessionState::GameOver => self.render_game_over(chunks[2], scene),
            _ => self.render_controls(chunks[2], scene.state),
        };
        frame.render_widget(footer, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, scene: &SceneView<'_>, pulse: &FruitPulse) -> Paragraph<'_> {
        let grid = scene.grid;
        let columns = grid.columns() as usize;
        let rows = grid.rows() as usize;

        // Paint tail first so the head wins if segments overlap after a collision
        let mut cells: Vec<Option<(usize, game::Color)>> = vec![None; columns * rows];
        for (index, segment) in scene.segments.iter().enumerate().rev() {
            let (column, row) = grid.index_of(segment.cell);
            cells[row as usize * columns + column as usize] = Some((index, segment.color));
        }

        let fruit_cell = match pulse.target() {
            Some((cell, _)) => Some(cell),
            None if scene.fruit_respawn_pending => None,
            None => Some(scene.fruit.cell),
        };
        let fruit_color = pulse.target().map_or(scene.fruit.color, |(_, color)| color);

        let mut lines = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut spans = Vec::with_capacity(columns);

            for column in 0..columns {
                let cell = grid.cell_at(column as i32, row as i32);

                let span = if fruit_cell == Some(cell) {
                    let glyph = if pulse.scale() > SWOLLEN_SCALE { "◉ " } else { "● " };
                    Span::styled(
                        glyph,
                        Style::default()
                            .fg(to_tui_color(fruit_color))
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some((index, color)) = cells[row * columns + column] {
                    let style = Style::default().fg(to_tui_color(color));
                    if index == 0 {
                        // Snake head - bold so it stands out from its own colour trail
                        Span::styled("■ ", style.add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled("▪ ", style)
                    }
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let title = match scene.state {
            SessionState::Paused => " Snake (paused) ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, scene: &SceneView<'_>, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scene.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(scene.segments.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, _area: Rect, scene: &SceneView<'_>) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![
                Span::styled(
                    "Game Over! ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("Your score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scene.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect, state: SessionState) -> Paragraph<'_> {
        let hint = match state {
            SessionState::Idle => "Press Enter to start",
            SessionState::Paused => "Paused - Space to resume",
            _ => "",
        };

        let text = vec![
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" start | "),
                Span::styled("Space", Style::default().fg(Color::Yellow)),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_tui_color(color: game::Color) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}
