use crate::app::AppState;
use crate::domain::TaskRow;
use crate::schedule::format_duration;
use crate::ui::styles::{
    border_style, default_style, over_estimate_style, priority_style, running_style, selected_style,
    title_style,
};
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// "Mon Jun 10 9 AM", or just the date when the hour is missing
fn slot_label(row: &TaskRow) -> String {
    match (row.task.slot(), row.task.date) {
        (Some(slot), _) => format!("{} {}", slot.date.format("%a %b %d"), slot.clock_label()),
        (None, Some(date)) => date.format("%a %b %d").to_string(),
        (None, None) => "-".to_string(),
    }
}

/// Table cells for one task: #, title, priority, slot, estimate, spent, status
fn create_task_row(row: &TaskRow, spent_ms: u64, running: bool) -> Row<'static> {
    let task = &row.task;
    let estimate_ms = task.estimated_ms();

    let spent_style = if running {
        running_style()
    } else if estimate_ms > 0 && spent_ms > estimate_ms {
        over_estimate_style()
    } else {
        default_style()
    };
    let spent = if running {
        format!("▶ {}", format_duration(spent_ms))
    } else {
        format_duration(spent_ms)
    };

    Row::new(vec![
        Cell::from(row.original_index.to_string()),
        Cell::from(task.title.clone()),
        Cell::from(Span::styled(task.priority.label(), priority_style(task.priority))),
        Cell::from(slot_label(row)),
        Cell::from(task.estimate_label()),
        Cell::from(Span::styled(spent, spent_style)),
        Cell::from(task.status.clone()),
    ])
}

/// Render the task table
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let running_id = app.timer.map(|t| t.task_id);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = create_task_row(row, app.live_time_spent(row), running_id == Some(row.id));
            if idx == app.selected_index {
                line.style(selected_style())
            } else {
                line
            }
        })
        .collect();

    let header = Row::new(vec!["#", "Title", "Priority", "Slot", "Est", "Spent", "Status"]).style(title_style());

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let title = format!(" Tasks ({}) ", app.rows.len());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(table, area);
}
