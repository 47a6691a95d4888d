use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Start/stop the work timer
        KeyCode::Enter => {
            app.toggle_timer();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Edit task (open form with existing data)
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }

        // Delete task
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Search by title
        KeyCode::Char('/') => {
            app.start_search();
            Ok(false)
        }

        // Cycle priority filter
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.cycle_priority_filter();
            Ok(false)
        }

        // Escape clears an active search
        KeyCode::Esc => {
            if !app.filter.search.is_empty() {
                app.clear_search();
            }
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while typing in the search bar
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.finish_search();
            Ok(false)
        }
        KeyCode::Esc => {
            app.clear_search();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.search_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.search_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or editing)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Move between fields
        KeyCode::Tab | KeyCode::Down => {
            app.input_form_next_field();
            Ok(false)
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.input_form_prev_field();
            Ok(false)
        }

        // Cycle priority / AM-PM / unit
        KeyCode::Left | KeyCode::Right => {
            app.input_form_cycle_choice();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BoxedStore;
    use crate::domain::{Meridiem, Priority, PriorityFilter, Task, TimeUnit};
    use crate::persistence::{AppSettings, MemoryStore};
    use crate::task_list::TaskList;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use uuid::Uuid;

    fn create_test_app() -> AppState {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Test task".to_string(),
            body: "body".to_string(),
            priority: Priority::High,
            status: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            time_start: Some(9),
            ante_meridiem: Meridiem::Am,
            estimated_time: "1".to_string(),
            time_unit: TimeUnit::Hours,
            time_spent: 0,
        };
        let store: BoxedStore = Box::new(MemoryStore::with_tasks(vec![task]));
        AppState::new(TaskList::load(store).unwrap(), AppSettings::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.tasks.len();

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // Title, body
        type_text(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "Details");

        // Skip priority and status, keep today's date, set hour
        for _ in 0..4 {
            handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        }
        type_text(&mut app, "3");

        // Meridiem -> PM, then estimate
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "45");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.tasks.len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());

        let added = app.tasks.all().last().unwrap();
        assert_eq!(added.title, "New");
        assert_eq!(added.time_start, Some(3));
        assert_eq!(added.ante_meridiem, Meridiem::Pm);
        assert_eq!(added.estimated_time, "45");
    }

    #[test]
    fn test_incomplete_form_stays_open() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "No body");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.as_ref().unwrap().error.is_some());
        assert_eq!(app.tasks.len(), 1);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_handle_delete() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert!(app.tasks.is_empty());
        assert!(app.rows.is_empty());

        // Nothing selected: no-op
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_handle_search() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Searching);

        // 'q' is text while searching, not quit
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(app.rows.is_empty());

        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        type_text(&mut app, "test");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.filter.search, "test");
        assert_eq!(app.rows.len(), 1);
    }

    #[test]
    fn test_handle_filter_cycle() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.filter.priority, PriorityFilter::Only(Priority::High));
        assert_eq!(app.rows.len(), 1);

        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.filter.priority, PriorityFilter::Only(Priority::Medium));
        assert!(app.rows.is_empty());
    }

    #[test]
    fn test_handle_timer_toggle() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.timer.is_some());
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.timer.is_none());
    }
}
