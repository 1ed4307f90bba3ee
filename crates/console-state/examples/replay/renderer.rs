use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Sparkline, Wrap},
};
use vigil_console_interface::Role;
use vigil_console_state::ConsoleFrame;
use vigil_viz::{FrameParams, pulse_intensity};

use crate::App;

const STATUS_PANEL_WIDTH: u16 = 34;

pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.state.frame();
    let params = vigil_viz::compute_frame(
        app.elapsed_secs(),
        &snapshot.spectral,
        snapshot.speaking,
        &app.motion,
    );

    let [header_area, body_area, spectrum_area, timeline_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [transcript_area, status_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(STATUS_PANEL_WIDTH)])
            .areas(body_area);

    render_header(frame, app, header_area);
    render_transcript(frame, &snapshot, transcript_area);
    render_status(frame, app, &snapshot, &params, status_area);
    render_spectrum(frame, &snapshot, spectrum_area);
    render_timeline(frame, app, timeline_area);
    render_hints(frame, hint_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.paused {
        "⏸ PAUSED"
    } else {
        "▶ PLAYING"
    };
    let text = format!(
        " {} | {} | {}ms/event ",
        app.fixture_name, status, app.speed_ms
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_transcript(frame: &mut Frame, snapshot: &ConsoleFrame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for message in &snapshot.messages {
        let (label, label_color) = match message.role {
            Role::User => ("operator", Color::Magenta),
            Role::Agent => ("agent", Color::Cyan),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", message.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{label:<8} "),
                Style::default()
                    .fg(label_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(message.text.clone()),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "waiting for channel input...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the tail in view.
    let visible = area.height as usize;
    let skip = lines.len().saturating_sub(visible);

    frame.render_widget(
        Paragraph::new(lines.split_off(skip)).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status(
    frame: &mut Frame,
    app: &App,
    snapshot: &ConsoleFrame,
    params: &FrameParams,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" console ", Style::default().fg(Color::DarkGray)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [lines_area, pulse_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);

    let speaking_line = if snapshot.speaking {
        Line::from(Span::styled(
            "● speaking",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled("○ silent", Style::default().fg(Color::DarkGray)))
    };

    let mut lines = vec![
        speaking_line,
        Line::raw(""),
        Line::from(vec![
            Span::styled("messages  ", Style::default().fg(Color::DarkGray)),
            Span::raw(snapshot.messages.len().to_string()),
        ]),
        Line::from(vec![
            Span::styled("rotation  ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "y {:.2}  z {:.2}",
                params.rotation_y, params.rotation_z
            )),
        ]),
    ];

    if !snapshot.vitals.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "vitals",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::UNDERLINED),
        )));
        for (name, value) in &snapshot.vitals {
            lines.push(Line::from(vec![
                Span::styled(format!("{name:<10}"), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{value:.1}")),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), lines_area);

    // Pulse gauge: where the scale currently sits inside its envelope.
    let intensity = pulse_intensity(&snapshot.spectral, snapshot.speaking, &app.motion);
    let ratio = if intensity > 0.0 {
        (((params.scale - 1.0) / intensity + 1.0) / 2.0).clamp(0.0, 1.0) as f64
    } else {
        0.5
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(ratio)
        .label(format!("scale {:.3}", params.scale));
    frame.render_widget(gauge, pulse_area);
}

fn render_spectrum(frame: &mut Frame, snapshot: &ConsoleFrame, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" spectrum ", Style::default().fg(Color::DarkGray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let samples: Vec<u64> = snapshot
        .spectral
        .iter()
        .map(|m| (m.max(0.0) * 100.0) as u64)
        .collect();

    frame.render_widget(
        Sparkline::default()
            .data(&samples)
            .max(100)
            .style(Style::default().fg(Color::Cyan)),
        inner,
    );
}

fn render_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.total();
    let ratio = if total == 0 {
        0.0
    } else {
        app.position as f64 / total as f64
    };
    let label = format!("{}/{}", app.position, total);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(
            " [Space] pause/resume  [←/→] seek  [↑/↓] speed  [Home/End] jump  [q] quit ",
        )
        .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
