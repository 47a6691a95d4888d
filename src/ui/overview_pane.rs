use crate::app::AppState;
use crate::report::{DayStats, WeeklyTotals};
use crate::schedule::format_duration;
use crate::ui::styles::{bar_style, border_style, over_estimate_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BAR_WIDTH: f64 = 16.0;

/// Header and totals lines: "Week of <today>", estimated, actual
fn summary_lines(totals: &WeeklyTotals) -> Vec<Line<'static>> {
    let actual_style = if totals.total_actual_ms > totals.total_estimated_ms {
        over_estimate_style()
    } else {
        bar_style()
    };

    vec![
        Line::from(Span::styled(
            format!("Week of {}", totals.today.format("%a %b %d, %Y")),
            title_style(),
        )),
        Line::from(vec![
            Span::styled("Estimated: ", title_style()),
            Span::raw(format_duration(totals.total_estimated_ms)),
        ]),
        Line::from(vec![
            Span::styled("Actual:    ", title_style()),
            Span::styled(format_duration(totals.total_actual_ms), actual_style),
        ]),
        Line::from(vec![
            Span::styled("Tasks:     ", title_style()),
            Span::raw(totals.task_count.to_string()),
        ]),
    ]
}

/// One bar per day, scaled to the busiest day's logged time
fn daily_lines(days: &[DayStats]) -> Vec<Line<'static>> {
    let max_ms = days.iter().map(|d| d.actual_ms).max().unwrap_or(0).max(1);

    days.iter()
        .map(|day| {
            let width = ((day.actual_ms as f64 / max_ms as f64) * BAR_WIDTH).round() as usize;
            let bar = if day.actual_ms == 0 { String::new() } else { "█".repeat(width.max(1)) };
            Line::from(vec![
                Span::raw(format!(
                    "{} {:>7} / {:<7} ",
                    day.date.format("%a"),
                    format_duration(day.actual_ms),
                    format_duration(day.estimated_ms)
                )),
                Span::styled(bar, bar_style()),
            ])
        })
        .collect()
}

/// Render the weekly overview pane
pub fn render_overview_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let totals = app.weekly_overview();
    let days = app.daily_breakdown(&totals);

    let mut lines = summary_lines(&totals);
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Actual / estimated by day", title_style())));
    lines.extend(daily_lines(&days));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Weekly Overview ", title_style())),
    );

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_summary_lines() {
        let totals = WeeklyTotals {
            week_start: june(9),
            today: june(12),
            total_estimated_ms: 7_200_000,
            total_actual_ms: 1_800_000,
            task_count: 1,
        };
        let text = format!("{:?}", summary_lines(&totals));
        assert!(text.contains("Week of Wed Jun 12, 2024"));
        assert!(text.contains("2h"));
        assert!(text.contains("30m"));
    }

    #[test]
    fn test_daily_lines_scale_to_busiest_day() {
        let day = |d: u32, actual_ms: u64| DayStats {
            date: june(d),
            task_count: 1,
            estimated_ms: 3_600_000,
            actual_ms,
        };
        let lines = daily_lines(&[day(9, 3_600_000), day(10, 0), day(11, 1_800_000)]);
        assert_eq!(lines.len(), 3);

        let bar_len = |line: &Line| line.spans[1].content.chars().count();
        assert_eq!(bar_len(&lines[0]), 16);
        assert_eq!(bar_len(&lines[1]), 0);
        assert_eq!(bar_len(&lines[2]), 8);
    }
}
