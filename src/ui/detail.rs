use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let title = app
        .detail
        .as_ref()
        .map(|pr| format!("PR #{}", pr.number))
        .unwrap_or_else(|| "PR details".to_string());

    let width = area.width as usize;
    frame.render_widget(
        Paragraph::new(header_line(&title, width)),
        chunks[0],
    );

    let lines: Vec<Line> = app
        .viewer
        .visible_lines()
        .iter()
        .map(|l| Line::from(l.replace('\t', "    ")))
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), chunks[1]);

    let percent = format!("{:3.0}%", app.viewer.scroll_fraction() * 100.0);
    frame.render_widget(
        Paragraph::new(footer_line(&percent, width)),
        chunks[2],
    );
}

/// `┤ title ├────` with the rule clamped to the available width.
fn header_line(title: &str, width: usize) -> Line<'static> {
    let label = format!("┤ {} ├", title);
    let fill = "─".repeat(width.saturating_sub(label.chars().count()));
    Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(fill, Style::default().fg(Color::DarkGray)),
    ])
}

/// `────┤ 42% ├` with the rule clamped to the available width.
fn footer_line(percent: &str, width: usize) -> Line<'static> {
    let label = format!("┤ {} ├", percent);
    let fill = "─".repeat(width.saturating_sub(label.chars().count()));
    Line::from(vec![
        Span::styled(fill, Style::default().fg(Color::DarkGray)),
        Span::styled(label, Style::default().fg(Color::Cyan)),
    ])
}
