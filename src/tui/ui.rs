//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::focus::report::format_day;
use crate::focus::{format_duration_mmss, progress, IntervalKind, TRAILING_WINDOW_DAYS};
use crate::tui::app::{App, SessionOutcome};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Countdown
            Constraint::Length(3), // Gauge
            Constraint::Min(0),    // Plan and stats
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[3]);

    render_header(frame, app, chunks[0]);
    render_countdown(frame, app, chunks[1]);
    render_gauge(frame, app, chunks[2]);
    render_plan(frame, app, body[0]);
    render_stats(frame, app, body[1]);
    render_status_bar(frame, app, chunks[4]);
}

fn kind_color(kind: IntervalKind) -> Color {
    match kind {
        IntervalKind::Work => Color::Green,
        IntervalKind::Break => Color::Cyan,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (title, color) = match (app.outcome, app.current_interval()) {
        (Some(SessionOutcome::Finished), _) => (" Session complete ".to_string(), Color::Green),
        (Some(SessionOutcome::Aborted), _) => (" Session aborted ".to_string(), Color::Red),
        (None, Some(interval)) if app.is_paused() => {
            (format!(" {} (paused) ", interval.kind.display_name()), Color::Yellow)
        }
        (None, Some(interval)) => (
            format!(" {} ", interval.kind.display_name()),
            kind_color(interval.kind),
        ),
        (None, None) => (" Starting ".to_string(), Color::White),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

fn render_countdown(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let countdown = Paragraph::new(format_duration_mmss(app.remaining()))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Remaining "));

    frame.render_widget(countdown, area);
}

fn render_gauge(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let (ratio, color) = app.current_interval().map_or((0.0, Color::DarkGray), |interval| {
        (
            progress(interval.duration(), app.remaining()),
            kind_color(interval.kind),
        )
    });

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_plan(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let current = app.current_interval();
    let mut selected = None;

    let items: Vec<ListItem<'_>> = app
        .plan()
        .intervals()
        .iter()
        .enumerate()
        .map(|(i, interval)| {
            let is_current = current.is_some_and(|c| c.start == interval.start);
            if is_current {
                selected = Some(i);
            }

            let spans = vec![
                Span::styled(
                    format!(
                        "{}-{} ",
                        interval.start.format("%H:%M"),
                        interval.end.format("%H:%M")
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<5}", interval.kind.display_name()),
                    Style::default()
                        .fg(kind_color(interval.kind))
                        .add_modifier(if is_current {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                ),
                Span::raw(format!(" {}m", interval.duration().num_minutes())),
            ];

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Plan "))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(selected);

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_stats(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Today: {:.1} hours", app.stats.today_hours()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let entries = app.stats.entries();
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No focus sessions recorded.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(entries.iter().map(|entry| Line::from(format_day(entry))));
        lines.push(Line::from(format!("  Total: {:.1}h", app.stats.total_hours())));
    }

    let stats = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Last {TRAILING_WINDOW_DAYS} days ")),
    );

    frame.render_widget(stats, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("p:pause | a:abort | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
