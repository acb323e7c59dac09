//! Home screen: the test catalog.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::data;
use crate::funnel::state::FunnelApp;

/// Render the home screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // headline
        Constraint::Min(10),   // catalog
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_headline(frame, chunks[0]);
    render_catalog(frame, chunks[1], app);
    render_controls(frame, chunks[2], app);
}

fn render_headline(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Bem-vindo ao Perfily",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            "Mapeie quem você é, sua carreira e seus relacionamentos com diagnósticos de alta precisão.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_catalog(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let lines: Vec<Line> = data::CATALOG
        .iter()
        .enumerate()
        .flat_map(|(i, test)| {
            let is_selected = i == app.home_selected;
            let prefix = if is_selected { "> " } else { "  " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            vec![
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(format!("{} {}", test.icon, test.title), style),
                ]),
                Line::from(Span::styled(
                    format!("     {}", test.description),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ]
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Testes ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let (text, color) = if app.loading {
        ("Iniciando teste...", Color::Yellow)
    } else {
        (
            "j/k ou setas para escolher  ·  Enter para começar  ·  q sair",
            Color::DarkGray,
        )
    };

    let widget = Paragraph::new(text).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, area);
}
