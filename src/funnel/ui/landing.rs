//! Landing screen of the selected test.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::data;
use crate::funnel::state::FunnelApp;

use super::home;

/// Render the landing screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let Some(kind) = app.session.test_kind else {
        // No active test to land on.
        home::render(frame, area, app);
        return;
    };
    let config = data::config_for(kind);

    let chunks = Layout::vertical([
        Constraint::Percentage(25),
        Constraint::Length(14),
        Constraint::Percentage(25),
    ])
    .split(area);

    let start_line = if app.loading {
        Line::from(Span::styled(
            "Carregando perguntas...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "[Enter] Começar mapeamento",
            Style::default().fg(Color::Green).bold(),
        ))
    };

    let content = vec![
        Line::from(Span::styled(
            format!("{} {}", config.icon, config.title),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            config.landing_headline,
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            config.description,
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Receba um relatório completo e acionável em menos de 2 minutos.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        start_line,
        Line::from(""),
        Line::from(Span::styled(
            "+12.000 diagnósticos realizados este mês",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Esc] voltar  ·  [Q] sair",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
