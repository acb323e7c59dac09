//! Teaser preview screen: the unlocked part of the result plus the
//! locked-report card.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::data;
use crate::funnel::state::FunnelApp;

use super::result;

/// Render the preview screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let Some(profile) = &app.session.result else {
        render_missing_result(frame, area);
        return;
    };

    if profile.informacoes_completas {
        // Already unlocked; nothing left to tease.
        result::render(frame, area, app);
        return;
    }

    let has_summary = profile.texto.is_some();

    let chunks = if has_summary {
        Layout::vertical([
            Constraint::Length(2), // confirmation
            Constraint::Length(5), // profile
            Constraint::Length(5), // summary
            Constraint::Min(8),    // locked card
            Constraint::Length(2), // controls
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(area)
    };

    render_confirmation(frame, chunks[0]);
    render_profile(frame, chunks[1], &profile.perfil, &profile.frase);

    if has_summary {
        render_summary(frame, chunks[2], profile.texto.as_deref().unwrap_or(""));
        render_locked_card(frame, chunks[3], app);
        render_controls(frame, chunks[4]);
    } else {
        render_locked_card(frame, chunks[2], app);
        render_controls(frame, chunks[3]);
    }
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
            "Não foi possível carregar o resultado do teste.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Voltar",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_confirmation(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("Análise concluída com sucesso!")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green).bold());
    frame.render_widget(widget, area);
}

fn render_profile(frame: &mut Frame, area: Rect, perfil: &str, frase: &str) {
    let content = vec![
        Line::from(Span::styled(
            "Seu Perfil Principal é:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            perfil.to_string(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!("\"{frase}\""),
            Style::default().fg(Color::Gray).italic(),
        )),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_summary(frame: &mut Frame, area: Rect, texto: &str) {
    let widget = Paragraph::new(texto)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Resumo do Perfil ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_locked_card(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let pitch = app
        .session
        .test_kind
        .map(|kind| data::config_for(kind).preview_pitch)
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Você descobriu seu perfil, mas ainda falta o mais importante:",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(pitch, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Desbloquear Resultado  ·  de ",
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(
                data::format_brl(data::PRICE_OLD),
                Style::default().fg(Color::DarkGray).crossed_out(),
            ),
            Span::styled(" por ", Style::default().fg(Color::White).bold()),
            Span::styled(
                data::format_brl(data::PRICE_NEW),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Acesso Vitalício Imediato",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Relatório Completo Bloqueado ")
                .title_style(Style::default().fg(Color::Yellow).bold())
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("[Enter] Desbloquear  ·  [Esc] início  ·  q sair")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
