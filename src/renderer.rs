use crate::entities::{Bullet, BulletOwner, Enemy, Player, Status};
use crate::game::Snapshot;
use crate::geometry::Vec2;
use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const STAR_COUNT: usize = 60;
/// Width of the enemy health bar in world units
const HEALTH_BAR_WIDTH: f32 = 0.2;

/// Maps a world position onto a terminal cell inside `area`.
///
/// The world's [-1, 1] square is stretched over the whole area, +y pointing up.
/// Returns `None` for positions outside the visible square or an empty area.
pub fn world_to_cell(position: Vec2, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if position.x.abs() > 1.0 || position.y.abs() > 1.0 {
        return None;
    }

    let span_x = (area.width - 1) as f32;
    let span_y = (area.height - 1) as f32;
    let col = ((position.x + 1.0) / 2.0 * span_x).round() as u16;
    let row = ((1.0 - position.y) / 2.0 * span_y).round() as u16;
    Some((area.x + col, area.y + row))
}

/// World position at the centre of a terminal cell
fn cell_to_world(col: u16, row: u16, area: Rect) -> Vec2 {
    let span_x = area.width.saturating_sub(1).max(1) as f32;
    let span_y = area.height.saturating_sub(1).max(1) as f32;
    Vec2::new(
        (col - area.x) as f32 / span_x * 2.0 - 1.0,
        1.0 - (row - area.y) as f32 / span_y * 2.0,
    )
}

/// Writes a single character if the cell lies inside `area`
fn put(buffer: &mut Buffer, area: Rect, col: u16, row: u16, ch: char, style: Style) {
    if col < area.x || col >= area.right() || row < area.y || row >= area.bottom() {
        return;
    }
    if let Some(cell) = buffer.cell_mut((col, row)) {
        cell.set_char(ch).set_style(style);
    }
}

/// Draws a [`Snapshot`] into a terminal frame
pub struct GameRenderer {
    /// Background stars in world coordinates, fixed for the renderer's lifetime
    stars: Vec<Vec2>,
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    /// Creates a new GameRenderer with a random starfield
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let stars = (0..STAR_COUNT)
            .map(|_| Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect();
        Self { stars }
    }

    /// Main render method: the playfield, then any banner on top of it
    pub fn render(&self, frame: &mut Frame, view: &Snapshot) {
        let area = frame.area();
        if area.height < 3 || area.width < 3 {
            return;
        }

        self.render_game(frame, view);
        match view.status {
            Status::Normal => {}
            Status::EnemyDestroyed => self.render_banner(frame, view),
            Status::GameOver => self.render_game_over(frame),
        }
    }

    /// Renders the HUD, the bordered playfield and everything inside it
    fn render_game(&self, frame: &mut Frame, view: &Snapshot) {
        let area = frame.area();

        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(field_area);
        frame.render_widget(block, field_area);

        let buffer = frame.buffer_mut();
        self.render_stars(buffer, field, view.tick_count);
        render_enemy(buffer, field, view.enemy);
        render_player(buffer, field, view.player);
        render_bullets(buffer, field, view.bullets);

        // Stats overlay at the top
        let enemy_hp = if view.enemy.is_alive() {
            view.enemy.health
        } else {
            0
        };
        let stats = Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.lives),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Enemy HP: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", enemy_hp),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [R: Reset] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_stars(&self, buffer: &mut Buffer, field: Rect, tick_count: u64) {
        let style = Style::default().fg(Color::DarkGray);
        for (i, star) in self.stars.iter().enumerate() {
            // A few stars blink out in turn
            if (tick_count / 10 + i as u64) % 7 == 0 {
                continue;
            }
            if let Some((col, row)) = world_to_cell(*star, field) {
                put(buffer, field, col, row, '.', style);
            }
        }
    }

    /// One-line message across the middle of the playfield
    fn render_banner(&self, frame: &mut Frame, view: &Snapshot) {
        let Some(message) = view.status.message() else {
            return;
        };
        let area = frame.area();
        let banner_area = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(message).centered().bold().yellow()),
            banner_area,
        );
    }

    /// Renders the game over box over the frozen playfield
    fn render_game_over(&self, frame: &mut Frame) {
        let area = frame.area();
        let text = vec![
            Line::from(""),
            Line::from(Status::GameOver.message().unwrap_or_default())
                .centered()
                .red()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let width = area.width.min(30);
        let height = area.height.min(7);
        let box_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, box_area);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            box_area,
        );
    }
}

fn render_player(buffer: &mut Buffer, field: Rect, player: &Player) {
    if !player.is_alive() {
        return;
    }
    let Some((col, row)) = world_to_cell(player.position, field) else {
        return;
    };
    let style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    put(buffer, field, col.saturating_sub(1), row, '/', style);
    put(buffer, field, col, row, '^', style);
    put(buffer, field, col + 1, row, '\\', style);
}

fn render_enemy(buffer: &mut Buffer, field: Rect, enemy: &Enemy) {
    if !enemy.is_alive() {
        return;
    }
    let Some((center_col, center_row)) = world_to_cell(enemy.position, field) else {
        return;
    };

    // Fill every cell whose centre lies on the disc, plus the centre itself
    let body = Style::default().fg(Color::Magenta);
    for row in field.top()..field.bottom() {
        for col in field.left()..field.right() {
            let offset = cell_to_world(col, row, field) - enemy.position;
            if offset.length() <= enemy.size || (col, row) == (center_col, center_row) {
                put(buffer, field, col, row, '●', body);
            }
        }
    }

    // Health bar one row above the disc
    let top = enemy.position + Vec2::new(0.0, enemy.size);
    let Some((_, bar_row)) = world_to_cell(top, field) else {
        return;
    };
    let bar_row = bar_row.min(center_row).saturating_sub(1);
    let left = enemy.position - Vec2::new(HEALTH_BAR_WIDTH / 2.0, 0.0);
    let right = enemy.position + Vec2::new(HEALTH_BAR_WIDTH / 2.0, 0.0);
    let (Some((left_col, _)), Some((right_col, _))) =
        (world_to_cell(left, field), world_to_cell(right, field))
    else {
        return;
    };

    let ratio = enemy.health_ratio();
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };
    let cells = right_col - left_col + 1;
    let filled = (cells as f32 * ratio).round() as u16;
    for i in 0..cells {
        if i < filled {
            put(buffer, field, left_col + i, bar_row, '█', Style::default().fg(color));
        } else {
            put(buffer, field, left_col + i, bar_row, '░', Style::default().fg(Color::DarkGray));
        }
    }
}

fn render_bullets(buffer: &mut Buffer, field: Rect, bullets: &[Bullet]) {
    for bullet in bullets {
        let Some((col, row)) = world_to_cell(bullet.position, field) else {
            continue;
        };
        let (ch, color) = match bullet.owner {
            BulletOwner::Player => ('|', Color::Yellow),
            BulletOwner::Enemy => ('•', Color::Red),
        };
        put(buffer, field, col, row, ch, Style::default().fg(color));
    }
}
