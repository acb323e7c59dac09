//! Payment screen: QR placeholder, countdown and unlock checks.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::data;
use crate::funnel::state::FunnelApp;

/// How long the payment code stays valid on screen. Display-only.
const PAYMENT_CODE_TTL: Duration = Duration::from_secs(600);

/// Render the payment screen.
pub fn render(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let chunks = Layout::vertical([
        Constraint::Length(8), // QR placeholder
        Constraint::Length(4), // price
        Constraint::Length(2), // countdown
        Constraint::Length(3), // status
        Constraint::Length(3), // controls
    ])
    .margin(1)
    .split(area);

    render_qr_placeholder(frame, chunks[0]);
    render_price(frame, chunks[1]);
    render_countdown(frame, chunks[2], app.payment_entered_at);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn render_qr_placeholder(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QR CODE PIX",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled("Em breve", Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Pix ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_price(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "Valor a pagar",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(
                data::format_brl(data::PRICE_OLD),
                Style::default().fg(Color::DarkGray).crossed_out(),
            ),
            Span::styled("  ", Style::default()),
            Span::styled(
                data::format_brl(data::PRICE_NEW),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(Span::styled(
            "Desconto aplicado",
            Style::default().fg(Color::Green),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_countdown(frame: &mut Frame, area: Rect, entered_at: Option<Instant>) {
    let remaining = entered_at
        .map(|at| PAYMENT_CODE_TTL.saturating_sub(at.elapsed()))
        .unwrap_or(PAYMENT_CODE_TTL);

    let widget = Paragraph::new(format!(
        "O código expira em {}",
        format_clock(remaining)
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Cyan));

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &FunnelApp) {
    let mut content = Vec::new();

    if app.submitting {
        content.push(Line::from(Span::styled(
            "Verificando liberação...",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(note) = &app.payment_note {
        content.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "[Enter] Já paguei, verificar liberação  ·  [Esc] Voltar ao preview",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Após o pagamento, o seu resultado será liberado automaticamente.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn format_clock(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
