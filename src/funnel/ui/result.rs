//! Result screen: the full report, or what is left of it for a teaser.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::funnel::state::FunnelApp;

use super::preview;

/// Render the result screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let (Some(profile), Some(kind)) = (&app.session.result, app.session.test_kind) else {
        render_missing_result(frame, area);
        return;
    };

    if !profile.informacoes_completas {
        // The report is still locked; show the teaser instead.
        preview::render(frame, area, app);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(5), // profile header
        Constraint::Min(8),    // report
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_profile_header(frame, chunks[0], kind.slug(), &profile.perfil, &profile.frase);
    render_full_report(frame, chunks[1], profile.texto.as_deref(), app.result_scroll);
    render_controls(frame, chunks[2]);
}

fn render_missing_result(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(5),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(
            "Não foi possível carregar o resultado completo.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Voltar ao início",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_profile_header(frame: &mut Frame, area: Rect, slug: &str, perfil: &str, frase: &str) {
    let content = vec![
        Line::from(Span::styled(
            format!("Diagnóstico Perfily: {slug}"),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            perfil.to_string(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("\"{frase}\""),
            Style::default().fg(Color::Gray).italic(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, area);
}

fn render_full_report(frame: &mut Frame, area: Rect, texto: Option<&str>, scroll: usize) {
    let body = texto.unwrap_or("Resultado completo indisponível no momento.");

    let widget = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Resultado Completo ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k rolar  ·  [Esc] início  ·  q sair")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
