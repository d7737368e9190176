use crate::app::AppState;
use crate::app::state::{FormField, FormState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Bottom-sheet create/edit form, slid over the lower edge of the screen.
pub fn render(f: &mut Frame, state: &AppState) {
    let Some(form) = &state.form else { return };

    let area = f.area();
    let height = 10.min(area.height);
    let sheet = Rect {
        x: 0,
        y: area.height.saturating_sub(height),
        width: area.width,
        height,
    };

    f.render_widget(Clear, sheet);

    let block = Block::bordered()
        .title(format!(" {} ", form.heading()))
        .title_style(
            Style::default()
                .fg(state.theme.text)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(state.theme.primary));
    let inner = block.inner(sheet);
    f.render_widget(block, sheet);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title label
            Constraint::Length(1), // title input
            Constraint::Length(1), // description label
            Constraint::Length(1), // description input
            Constraint::Length(1), // validation message
            Constraint::Min(0),
            Constraint::Length(1), // key hints
        ])
        .split(inner);

    let label_style = Style::default().fg(state.theme.muted);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(" Title", label_style))),
        rows[0],
    );
    render_input(f, state, form, FormField::Title, rows[1]);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Description (optional)",
            label_style,
        ))),
        rows[2],
    );
    render_input(f, state, form, FormField::Description, rows[3]);

    if let Some(error) = &form.error {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(state.theme.error),
            ))),
            rows[4],
        );
    }

    let hint_key = Style::default().fg(state.theme.secondary);
    let hint_text = Style::default().fg(state.theme.muted);
    let hints = Line::from(vec![
        Span::styled(" Enter ", hint_key),
        Span::styled("save", hint_text),
        Span::styled("  Esc ", hint_key),
        Span::styled("cancel", hint_text),
        Span::styled("  Tab ", hint_key),
        Span::styled("next field", hint_text),
    ]);
    f.render_widget(Paragraph::new(hints), rows[6]);
}

fn render_input(f: &mut Frame, state: &AppState, form: &FormState, field: FormField, area: Rect) {
    let focused = form.focus == field;
    let (buffer, cursor) = match field {
        FormField::Title => (&form.title, form.title_cursor),
        FormField::Description => (&form.description, form.description_cursor),
    };

    let prefix = if focused { " ❯ " } else { "   " };
    let text_style = if focused {
        Style::default().fg(state.theme.text)
    } else {
        Style::default().fg(state.theme.muted)
    };

    let line = Line::from(vec![
        Span::styled(prefix.to_string(), Style::default().fg(state.theme.secondary)),
        Span::styled(buffer.clone(), text_style),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if focused {
        let x = area.x + (prefix.width() + buffer[..cursor].width()) as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}
