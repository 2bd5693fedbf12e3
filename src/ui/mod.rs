mod detail;
mod list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, View};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match &app.view {
        View::ListLoading | View::DetailLoading => render_loading(frame, chunks[1]),
        View::List => list::render(frame, app, chunks[1]),
        View::Detail => detail::render(frame, app, chunks[1]),
        View::Error(message) => render_error(frame, message, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match (&app.view, &app.detail) {
        (View::Detail, Some(pr)) => {
            format!("prow - {} - PR #{}: {}", app.repo, pr.number, pr.title)
        }
        _ => format!("prow - {}", app.repo),
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new(Line::from(Span::styled(
        "Loading...",
        Style::default().fg(Color::Yellow),
    )));
    frame.render_widget(loading, area);
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "q: quit | h: back to list",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(notice) = &app.notice {
        Line::from(vec![Span::styled(
            notice.clone(),
            Style::default().fg(Color::Red),
        )])
    } else {
        let help = match app.view {
            View::List => {
                "j/k: nav | /: filter | i: details | d: diff | o: browser | r: refresh | q: quit"
            }
            View::Detail => "j/k/g/G: scroll | Ctrl+d/u: page | h: back | q: quit",
            _ => "q: quit",
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}
