use crate::app::AppState;
use crate::schedule::format_duration;
use crate::ui::styles::{border_style, default_style, priority_style, running_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(row) = app.selected_row() else {
        let empty = Paragraph::new("No task selected").block(block);
        f.render_widget(empty, area);
        return;
    };
    let task = &row.task;

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Title: ", title_style()),
        Span::raw(task.title.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Priority: ", title_style()),
        Span::styled(task.priority.label(), priority_style(task.priority)),
    ]));

    let when = match task.slot() {
        Some(slot) => format!("{} at {}", slot.date, slot.clock_label()),
        None => "unscheduled".to_string(),
    };
    lines.push(Line::from(vec![Span::styled("When: ", title_style()), Span::raw(when)]));

    lines.push(Line::from(vec![
        Span::styled("Est:     ", title_style()),
        Span::raw(format_duration(task.estimated_ms())),
    ]));

    let running = app.timer.map(|t| t.task_id) == Some(row.id);
    let spent_style = if running { running_style() } else { default_style() };
    lines.push(Line::from(vec![
        Span::styled("Spent:   ", title_style()),
        Span::styled(format_duration(app.live_time_spent(row)), spent_style),
        Span::raw(if running { "  (timer running)" } else { "" }),
    ]));

    let status = if task.status.is_empty() { "-" } else { task.status.as_str() };
    lines.push(Line::from(vec![
        Span::styled("Status: ", title_style()),
        Span::raw(status.to_string()),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("Body:", title_style())));
    for body_line in task.body.lines() {
        lines.push(Line::raw(format!("  {}", body_line)));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
