use crate::app::AppState;
use crate::app::controller::LoadPhase;
use crate::app::mode::Mode;
use crate::app::state::ActionFocus;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

pub fn render(f: &mut Frame, state: &mut AppState, area: Rect) {
    if state.controller.tasks().is_empty() {
        if state.controller.phase() == LoadPhase::Loading {
            render_loading(f, state, area);
        } else {
            render_empty(f, state, area);
        }
        return;
    }

    let theme = state.theme.clone();
    let mode = state.mode;
    let action_focus = state.action_focus;
    let selected = state.cursor_position;

    let mut rows: Vec<ListItem> = Vec::with_capacity(state.controller.tasks().len());
    for (index, task) in state.controller.tasks().iter().enumerate() {
        let locked = state.controller.is_item_locked(&task.id);

        let marker = if task.completed { " [x] " } else { " [ ] " };
        let marker_style = if task.completed {
            Style::default().fg(theme.primary)
        } else {
            Style::default().fg(theme.muted)
        };

        let title_style = if task.completed {
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![
            Span::styled(marker.to_string(), marker_style),
            Span::styled(task.title.clone(), title_style),
        ];
        if locked {
            // A call for this row is still in flight.
            spans.push(Span::styled("  ⋯".to_string(), Style::default().fg(theme.muted)));
        }
        if index == selected && mode == Mode::Actions {
            spans.push(Span::raw("  "));
            spans.push(action_span(
                "Edit",
                action_focus == ActionFocus::Edit,
                theme.secondary,
            ));
            spans.push(Span::raw(" "));
            spans.push(action_span(
                "Delete",
                action_focus == ActionFocus::Delete,
                theme.error,
            ));
        }

        let mut lines = vec![Line::from(spans)];
        if let Some(description) = &task.description {
            lines.push(Line::from(Span::styled(
                format!("      {description}"),
                Style::default().fg(theme.muted),
            )));
        }

        rows.push(ListItem::new(lines));
    }

    let list = List::new(rows).highlight_style(Style::default().bg(theme.surface));
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn action_span(label: &str, focused: bool, color: Color) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn render_loading(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Loading tasks…", state.spinner()),
            Style::default().fg(state.theme.primary),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_empty(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No tasks yet",
            Style::default()
                .fg(state.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press 'a' to add your first task.",
            Style::default().fg(state.theme.muted),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
