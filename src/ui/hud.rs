use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

pub fn render_score(frame: &mut Frame, app: &App, area: Rect) {
    let score = app.canvas.score().unwrap_or(0);
    let status = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Obstacles: {} ", app.session.obstacles().len()),
            Style::default().fg(Color::Rgb(150, 80, 35)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    let sep = Style::default().fg(Color::Rgb(60, 60, 60));

    let line = if app.is_over() {
        Line::from(vec![
            Span::styled(" 💀 GAME OVER ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", sep),
            Span::styled("Enter", key),
            Span::styled(" restart ", text),
            Span::styled("│ ", sep),
            Span::styled("Q", key),
            Span::styled(" quit", text),
        ])
    } else if app.is_paused() {
        Line::from(vec![
            Span::styled(" ⏸ PAUSED ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("│ ", sep),
            Span::styled("R", key),
            Span::styled(" resume", text),
        ])
    } else {
        Line::from(vec![
            Span::styled(" ←/→", key),
            Span::styled(" steer ", text),
            Span::styled("│ ", sep),
            Span::styled("P", key),
            Span::styled(" pause ", text),
            Span::styled("│ ", sep),
            Span::styled("R", key),
            Span::styled(" resume ", text),
            Span::styled("│ ", sep),
            Span::styled("Q", key),
            Span::styled(" quit", text),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}
