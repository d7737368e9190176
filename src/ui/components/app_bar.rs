use crate::app::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(state.theme.divider));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Ocean Tasks",
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Stay organized", Style::default().fg(state.theme.muted)),
    ]));
    f.render_widget(title, inner);

    // Decorative wave on the right, matching the app's nautical theme.
    let wave = Paragraph::new(Line::from(Span::styled(
        "≈≈ ",
        Style::default().fg(state.theme.secondary),
    )))
    .alignment(Alignment::Right);
    f.render_widget(wave, inner);
}
