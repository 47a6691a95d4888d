use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub filter_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub overview_area: Rect,
    pub toast_area: Rect,
}

/// Create the main layout
/// - Top: keybindings (1 row), search/filter bar (1 row)
/// - Main area: List (65%) | Details above Weekly overview (35%)
/// - Bottom: toast line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(1), // Search / filter bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Toast
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    MainLayout {
        keybindings_area: rows[0],
        filter_area: rows[1],
        list_area: columns[0],
        details_area: side[0],
        overview_area: side[1],
        toast_area: rows[3],
    }
}

/// Create centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.filter_area.height, 1);
        assert_eq!(layout.toast_area.height, 1);
        assert_eq!(layout.toast_area.y, 49);
        assert!(layout.list_area.width > layout.details_area.width);
        assert!(layout.details_area.height > 0);
        assert!(layout.overview_area.height > 0);
        assert_eq!(layout.details_area.x, layout.overview_area.x);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 20);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 20);
    }
}
