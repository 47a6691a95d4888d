use crate::app::{AppState, InputFormState};
use crate::domain::{FormField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Nine fields, a blank, the error line and the instructions, plus borders
const FORM_HEIGHT: u16 = 16;

fn field_line(form: &InputFormState, field: FormField) -> Line<'static> {
    let active = form.field == field;
    let marker = if active { "▸ " } else { "  " };
    let value = form.value(field);

    let mut spans = vec![
        Span::raw(marker),
        Span::raw(format!("{:<20}", field.label())),
    ];
    if field.is_choice() {
        spans.push(Span::styled(format!("‹ {} ›", value), modal_title_style()));
    } else {
        spans.push(Span::styled(value, modal_title_style()));
        if active {
            spans.push(Span::styled("█", modal_title_style())); // Cursor
        }
    }
    Line::from(spans)
}

/// Render the add/edit task form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else { return };
    let modal_area = create_modal_area(area, FORM_HEIGHT);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if app.ui_mode == UiMode::EditingTask {
        " Edit Task "
    } else {
        " Add Task "
    };

    let mut lines: Vec<Line> = FormField::all().iter().map(|field| field_line(form, *field)).collect();
    lines.push(Line::raw(""));

    match &form.error {
        Some(error) => lines.push(Line::from(Span::styled(error.clone(), error_style()))),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::from(Span::styled(
        "Tab next field  ·  ←/→ change choice  ·  Enter save  ·  Esc cancel",
        hint_style(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskDraft;

    fn form(field: FormField) -> InputFormState {
        InputFormState {
            draft: TaskDraft {
                title: "Plan".to_string(),
                ..TaskDraft::default()
            },
            field,
            editing: None,
            error: None,
        }
    }

    #[test]
    fn test_active_text_field_shows_cursor() {
        let text = format!("{:?}", field_line(&form(FormField::Title), FormField::Title));
        assert!(text.contains("Plan"));
        assert!(text.contains("█"));

        let inactive = format!("{:?}", field_line(&form(FormField::Body), FormField::Title));
        assert!(!inactive.contains("█"));
    }

    #[test]
    fn test_choice_field_shows_value() {
        let text = format!("{:?}", field_line(&form(FormField::Meridiem), FormField::Meridiem));
        assert!(text.contains("‹ AM ›"));
    }
}
