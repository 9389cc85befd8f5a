use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::palette::Palette;
use crate::game::{GameConfig, GamePhase, Overlay, Position, RenderSnapshot};

/// Everything on screen that is not part of the board itself
#[derive(Debug, Clone)]
pub struct Hud {
    pub elapsed: String,
    pub games_played: u32,
    pub config: GameConfig,
    /// One-off message, e.g. a rejected settings change
    pub notice: Option<String>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &RenderSnapshot, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, hud), chunks[0]);

        let game_area = centered(chunks[1], snapshot.grid_size);
        let palette = Palette::for_background(hud.config.background);

        match &snapshot.overlay {
            Some(overlay) => {
                frame.render_widget(self.render_overlay(overlay, snapshot.phase), game_area)
            }
            None => frame.render_widget(self.render_grid(snapshot, &palette), game_area),
        }

        frame.render_widget(self.render_controls(snapshot.phase, hud), chunks[2]);
    }

    fn render_grid(&self, snapshot: &RenderSnapshot, palette: &Palette) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid_size);

        for y in 0..snapshot.grid_size {
            let mut spans = Vec::with_capacity(snapshot.grid_size);

            for x in 0..snapshot.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let colour = if Some(pos) == head {
                    palette.head
                } else if snapshot.cells.contains(&pos) {
                    palette.body
                } else if pos == snapshot.food.position {
                    palette.food(snapshot.food.kind)
                } else {
                    palette.background
                };

                spans.push(Span::styled("  ", Style::default().bg(colour)));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, snapshot: &RenderSnapshot, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", snapshot.speed), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.elapsed.clone(), value),
            Span::raw("    "),
            Span::styled(snapshot.phase.label(), Style::default().fg(Color::Cyan)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, overlay: &Overlay, phase: GamePhase) -> Paragraph<'_> {
        let title_colour = match phase {
            GamePhase::Over => Color::Red,
            _ => Color::Yellow,
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                overlay.title.clone(),
                Style::default()
                    .fg(title_colour)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                overlay.score_text.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                overlay.message.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(title_colour)),
        )
    }

    fn render_controls(&self, phase: GamePhase, hud: &Hud) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let mut spans = match phase {
            GamePhase::Idle | GamePhase::Over => vec![
                Span::styled("Space", key),
                Span::raw(" start | "),
                Span::styled("+/-", key),
                Span::raw(format!(" speed {} | ", hud.config.base_speed)),
                Span::styled("B", key),
                Span::raw(format!(" board {}px | ", hud.config.board_size.pixels())),
                Span::styled("C", key),
                Span::raw(" colour | "),
            ],
            GamePhase::Running | GamePhase::Paused => vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" move | "),
                Span::styled("P", key),
                Span::raw(" pause | "),
            ],
        };
        spans.extend([
            Span::styled("R", key),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        let mut lines = vec![Line::from(spans)];
        if let Some(notice) = &hud.notice {
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Magenta),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("games played: {}", hud.games_played),
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Board-sized rect in the middle of `area`, two columns per cell plus borders
fn centered(area: Rect, grid_size: usize) -> Rect {
    let width = (grid_size as u16).saturating_mul(2).saturating_add(2).min(area.width);
    let height = (grid_size as u16).saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
