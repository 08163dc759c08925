pub mod field;
pub mod hud;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🚗 Road Dodge ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Score
            Constraint::Min(4),    // Road
            Constraint::Length(1), // Help
        ])
        .split(inner);

    hud::render_score(frame, app, chunks[0]);

    let geometry = app.session.geometry();
    let road_area = fit_canvas(chunks[1], geometry.canvas_width, geometry.canvas_height);
    let lines = field::render_field(
        app.canvas.commands(),
        geometry,
        road_area.width as usize,
        road_area.height as usize,
    );
    frame.render_widget(Paragraph::new(lines), road_area);

    hud::render_help(frame, app, chunks[2]);

    if app.canvas.shows_game_over() {
        render_game_over(frame, road_area);
    }
}

/// Largest centred area with the canvas' aspect ratio, counting a terminal
/// cell as twice as tall as it is wide.
fn fit_canvas(area: Rect, canvas_width: f32, canvas_height: f32) -> Rect {
    if canvas_width <= 0.0 || canvas_height <= 0.0 {
        return area;
    }
    let cols_per_row = 2.0 * canvas_width / canvas_height;
    let mut width = area.width;
    let mut height = (width as f32 / cols_per_row).round() as u16;
    if height > area.height {
        height = area.height;
        width = ((height as f32 * cols_per_row).round() as u16).min(area.width);
    }
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn render_game_over(frame: &mut Frame, area: Rect) {
    let overlay_w = 30u16.min(area.width);
    let overlay_h = 6u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Game Over",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press ENTER to try again",
            Style::default().fg(Color::White),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
