//! Quiz screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::funnel::state::FunnelApp;
use crate::models::Question;

/// Render the quiz screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let Some(question) = app.current_question() else {
        render_missing_questions(frame, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // progress
        Constraint::Length(7), // question text
        Constraint::Min(8),    // options
        Constraint::Length(2), // controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app.current_index(), app.total_questions());
    render_question_text(frame, chunks[1], &question.text);
    render_options(frame, chunks[2], question, app.selected_option());
    render_controls(frame, chunks[3], app.submitting);
}

fn render_missing_questions(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(5),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(
            "Não foi possível carregar as perguntas do teste.",
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

fn render_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let ratio = if total > 0 {
        current as f64 / total as f64
    } else {
        0.0
    };

    let widget = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Progresso do Mapeamento ")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .label(format!("Questão {} de {}", current + 1, total))
        .ratio(ratio);

    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, selected: usize) {
    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}) ", option.value), style),
                Span::styled(option.label.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Alternativas ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, submitting: bool) {
    let (text, color) = if submitting {
        ("Enviando respostas...", Color::Yellow)
    } else {
        (
            "j/k escolher  ·  Enter responder  ·  h questão anterior  ·  q sair",
            Color::DarkGray,
        )
    };

    let widget = Paragraph::new(text).alignment(Alignment::Center).fg(color);
    frame.render_widget(widget, area);
}
