pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod overview_pane;
pub mod styles;

use crate::app::AppState;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::{render_filter_bar, render_keybindings};
use layout::create_layout;
use list_pane::render_list_pane;
use overview_pane::render_overview_pane;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use styles::toast_style;

/// Render the toast line at the bottom of the screen
fn render_toast(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(toast) = &app.toast {
        let line = Span::styled(format!(" {}", toast.message), toast_style(toast.kind));
        f.render_widget(Paragraph::new(line), area);
    }
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_filter_bar(f, app, layout.filter_area);

    // Render panes
    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_overview_pane(f, app, layout.overview_area);
    render_toast(f, app, layout.toast_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
