use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    if let Some((message, time)) = &state.status_message
        && time.elapsed().as_secs() <= 3
    {
        render_status_message(f, message, area);
        return;
    }

    let sync_indicator = if state.controller.is_refreshing() {
        format!("  {} refreshing", state.spinner())
    } else if state.controller.busy() {
        format!("  {} syncing", state.spinner())
    } else {
        String::new()
    };

    let count = state.controller.tasks().len();
    let left_content = format!(
        " {} | {} item{}{}",
        state.mode,
        count,
        if count == 1 { "" } else { "s" },
        sync_indicator
    );
    let hints = "a add  e edit  x done  r refresh  ? help  q quit";
    let version_text = format!("v{VERSION}");

    // Spaces: 1 between padding and hints, 1 before version, 1 trailing.
    let used = left_content.width() + hints.width() + version_text.width() + 3;
    let padding = (area.width as usize).saturating_sub(used);

    let status_line = format!(
        "{} {:>padding$}{} {} ",
        left_content,
        "",
        hints,
        version_text,
        padding = padding
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);
    let status = Paragraph::new(Line::from(Span::styled(status_line, style)));

    f.render_widget(status, area);
}

fn render_status_message(f: &mut Frame, message: &str, area: Rect) {
    let display_message = format!(" {message} ");

    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = (area.width as usize).saturating_sub(display_message.width());
    let status_line = format!(
        "{}{:padding$}",
        display_message,
        "",
        padding = padding
    );

    let status = Paragraph::new(Line::from(Span::styled(status_line, style)));
    f.render_widget(status, area);
}
