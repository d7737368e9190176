pub mod app_bar;
pub mod form;
pub mod status_bar;
pub mod task_list;

use crate::app::AppState;
use crate::app::mode::Mode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, state: &mut AppState) {
    let background = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(background, f.area());

    let has_error = state.controller.error().is_some();

    let mut constraints = vec![Constraint::Length(3)];
    if has_error {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut next = 0;
    app_bar::render(f, state, chunks[next]);
    next += 1;

    if has_error {
        render_error_banner(f, state, chunks[next]);
        next += 1;
    }

    task_list::render(f, state, chunks[next]);
    status_bar::render(f, state, chunks[next + 1]);

    if state.mode == Mode::Form {
        form::render(f, state);
    }

    if state.show_help {
        render_help_overlay(f, state);
    }
}

/// Single banner for the most recent remote failure. It is replaced by the
/// next failure and disappears when a load or refresh starts.
fn render_error_banner(f: &mut Frame, state: &AppState, area: Rect) {
    let message = state.controller.error().unwrap_or_default().to_string();

    let banner = Paragraph::new(Line::from(vec![
        Span::styled("⚠ ", Style::default().fg(state.theme.error)),
        Span::styled(message, Style::default().fg(state.theme.error)),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::bordered().border_style(Style::default().fg(state.theme.error)));

    f.render_widget(banner, area);
}

fn render_help_overlay(f: &mut Frame, state: &AppState) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(state.theme.text);
    let section_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(Span::styled(
        "  Ocean Tasks Help",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  ── Navigation ──", section_style)));
    lines.push(Line::from(vec![
        Span::styled("    j / ↓           ", key_style),
        Span::styled("Move cursor down", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    k / ↑           ", key_style),
        Span::styled("Move cursor up", desc_style),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  ── Tasks ──", section_style)));
    lines.push(Line::from(vec![
        Span::styled("    x / Space       ", key_style),
        Span::styled("Toggle done/undone", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    a / n           ", key_style),
        Span::styled("New task", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    e / Enter       ", key_style),
        Span::styled("Edit selected task", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    h / ←           ", key_style),
        Span::styled("Reveal edit/delete actions", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    r               ", key_style),
        Span::styled("Refresh from the task store", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    y               ", key_style),
        Span::styled("Yank (copy) task to clipboard", desc_style),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  ── Form ──", section_style)));
    lines.push(Line::from(vec![
        Span::styled("    Tab             ", key_style),
        Span::styled("Switch between title and description", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    Enter           ", key_style),
        Span::styled("Save", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    Esc             ", key_style),
        Span::styled("Cancel", desc_style),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  ── General ──", section_style)));
    lines.push(Line::from(vec![
        Span::styled("    ?               ", key_style),
        Span::styled("Toggle this help", desc_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    q               ", key_style),
        Span::styled("Quit", desc_style),
    ]));

    let popup = centered_rect(60, 80, f.area());
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .title(" Help ")
                .border_style(Style::default().fg(state.theme.divider)),
        ),
        popup,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
