//! Main funnel renderer: shared chrome plus the screen of the current step.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::funnel::state::{FunnelApp, Step};

use super::{home, landing, payment, preview, quiz, result};

/// Render the funnel based on the current step.
pub fn render(frame: &mut Frame, app: &FunnelApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(10)]).split(area);
    render_header(frame, chunks[0], app);

    let mut body = chunks[1];
    if let Some(message) = &app.error {
        let split = Layout::vertical([Constraint::Length(4), Constraint::Min(8)]).split(body);
        render_error_banner(frame, split[0], message);
        body = split[1];
    }

    match app.step {
        Step::Home => home::render(frame, body, app),
        Step::Landing => landing::render(frame, body, app),
        Step::Quiz => quiz::render(frame, body, app),
        Step::Preview => preview::render(frame, body, app),
        Step::Payment => payment::render(frame, body, app),
        Step::Result => result::render(frame, body, app),
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let chunks = Layout::horizontal([Constraint::Min(10), Constraint::Length(16)]).split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" PER", Style::default().fg(Color::White).bold()),
        Span::styled("FILY", Style::default().fg(Color::Cyan).bold()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(title, chunks[0]);

    let badge = if app.step != Step::Home && !app.session.id.is_empty() {
        let short: String = app.session.id.chars().take(8).collect();
        format!("ID: {short} ")
    } else {
        String::new()
    };
    let widget = Paragraph::new(badge)
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, chunks[1]);
}

fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(Span::styled(
            "Ops! Algo deu errado.",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Erro · [X] fechar ")
            .title_style(Style::default().fg(Color::Red))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}
