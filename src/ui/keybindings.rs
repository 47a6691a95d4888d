use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{hint_style, title_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Enter start/stop timer   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("d delete   "),
            Span::raw("/ search   "),
            Span::raw("f filter   "),
            Span::raw("q quit"),
        ]),
        UiMode::Searching => Line::from(vec![
            Span::raw(" type to search   "),
            Span::raw("Enter keep   "),
            Span::raw("Esc clear"),
        ]),
        UiMode::AddingTask | UiMode::EditingTask => Line::from(vec![
            Span::raw(" Tab/↑/↓ field   "),
            Span::raw("←/→ change choice   "),
            Span::raw("Enter save   "),
            Span::raw("Esc cancel"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the search text and priority filter under the hint bar
pub fn render_filter_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let cursor = if app.ui_mode == UiMode::Searching { "█" } else { "" };
    let line = Line::from(vec![
        Span::styled(" Search: ", title_style()),
        Span::raw(format!("{}{}", app.filter.search, cursor)),
        Span::raw("   "),
        Span::styled("Priority: ", title_style()),
        Span::raw(app.filter.priority.label()),
        Span::styled(
            format!("   ({} of {} tasks)", app.rows.len(), app.tasks.len()),
            hint_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
