use crate::domain::{FormField, TaskDraft, TaskId, TaskRow, UiMode, ViewFilter};
use crate::error::{TaskError, TaskResult};
use crate::notifications::Toast;
use crate::persistence::{AppSettings, TaskStore};
use crate::report::{calculate_daily_stats, DayStats, WeeklyTotals};
use crate::task_list::TaskList;
use crate::ticker::ActiveTimer;
use chrono::{Local, NaiveDateTime};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Store behind the running app (JSON file in production, memory in tests)
pub type BoxedStore = Box<dyn TaskStore>;

/// Input form state for adding or editing a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub draft: TaskDraft,
    pub field: FormField,
    /// Some when editing an existing task
    pub editing: Option<TaskId>,
    /// Last rejection, shown inside the form
    pub error: Option<String>,
}

impl InputFormState {
    /// Current text of a field as shown in the form
    pub fn value(&self, field: FormField) -> String {
        let d = &self.draft;
        match field {
            FormField::Title => d.title.clone(),
            FormField::Body => d.body.clone(),
            FormField::Priority => d.priority.label().to_string(),
            FormField::Status => d.status.clone(),
            FormField::Date => d.date.clone(),
            FormField::Hour => d.hour.clone(),
            FormField::Meridiem => d.meridiem.to_tag().to_string(),
            FormField::Estimate => d.estimated_time.clone(),
            FormField::Unit => d.time_unit.label().to_string(),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        let d = &mut self.draft;
        match self.field {
            FormField::Title => Some(&mut d.title),
            FormField::Body => Some(&mut d.body),
            FormField::Status => Some(&mut d.status),
            FormField::Date => Some(&mut d.date),
            FormField::Hour => Some(&mut d.hour),
            FormField::Estimate => Some(&mut d.estimated_time),
            FormField::Priority | FormField::Meridiem | FormField::Unit => None,
        }
    }

    fn cycle_choice(&mut self) {
        let d = &mut self.draft;
        match self.field {
            FormField::Priority => d.priority = d.priority.cycle(),
            FormField::Meridiem => d.meridiem = d.meridiem.opposite(),
            FormField::Unit => d.time_unit = d.time_unit.toggle(),
            _ => {}
        }
    }
}

/// Main application state
pub struct AppState {
    pub tasks: TaskList<BoxedStore>,
    pub settings: AppSettings,
    pub filter: ViewFilter,
    /// Visible rows; rebuilt after every mutation and filter change
    pub rows: Vec<TaskRow>,
    /// Index into `rows`
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub toast: Option<Toast>,
    pub timer: Option<ActiveTimer>,
}

impl AppState {
    pub fn new(tasks: TaskList<BoxedStore>, settings: AppSettings) -> Self {
        let mut app = Self {
            tasks,
            settings,
            filter: ViewFilter::default(),
            rows: Vec::new(),
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            toast: None,
            timer: None,
        };
        app.refresh_rows();
        app
    }

    fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.settings.toast_secs)
    }

    fn show_failure(&mut self, error: &TaskError) {
        warn!(error = %error, "action rejected");
        self.toast = Some(Toast::failure(error, self.toast_ttl()));
    }

    /// Rebuild rows from the current list and keep the selection in range
    pub fn refresh_rows(&mut self) {
        self.rows = self.tasks.rows(&self.filter);
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
    }

    pub fn selected_row(&self) -> Option<&TaskRow> {
        self.rows.get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    /// Open an empty form prefilled with today's date and the configured defaults
    pub fn start_add_task(&mut self) {
        let draft = TaskDraft {
            priority: self.settings.default_priority,
            time_unit: self.settings.default_time_unit,
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            ..TaskDraft::default()
        };
        self.input_form = Some(InputFormState {
            draft,
            field: FormField::Title,
            editing: None,
            error: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form on the selected task
    pub fn start_edit_task(&mut self) {
        let Some(row) = self.selected_row() else { return };
        let form = InputFormState {
            draft: TaskDraft::from_task(&row.task),
            field: FormField::Title,
            editing: Some(row.id),
            error: None,
        };
        self.input_form = Some(form);
        self.ui_mode = UiMode::EditingTask;
    }

    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field = form.field.next();
        }
    }

    pub fn input_form_prev_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field = form.field.prev();
        }
    }

    /// Type into a text field; on a choice field any key cycles the value
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.text_mut() {
                Some(text) => text.push(c),
                None => form.cycle_choice(),
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            if let Some(text) = form.text_mut() {
                text.pop();
            }
        }
    }

    pub fn input_form_cycle_choice(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.cycle_choice();
        }
    }

    /// Create or update from the form. On failure the form stays open with the error.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.as_ref() else { return };
        let editing = form.editing;
        let result = match editing {
            None => self.tasks.create_task(&form.draft),
            Some(id) => self.tasks.update_task(id, &form.draft),
        };

        match result {
            Ok(outcome) => {
                let ttl = self.toast_ttl();
                self.toast = Some(match editing {
                    None => Toast::task_added(outcome.conflicted, ttl),
                    Some(_) => Toast::task_updated(outcome.conflicted, ttl),
                });
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.refresh_rows();
                if let Some(pos) = self.rows.iter().position(|r| r.id == outcome.id) {
                    self.selected_index = pos;
                }
            }
            Err(e) => {
                if let Some(form) = &mut self.input_form {
                    form.error = Some(e.to_string());
                }
                self.show_failure(&e);
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_row().map(|r| r.id) else { return };

        match self.tasks.remove_task(id) {
            Ok(_) => {
                if self.timer.map(|t| t.task_id) == Some(id) {
                    self.timer = None;
                }
                self.toast = Some(Toast::task_deleted(self.toast_ttl()));
                self.refresh_rows();
            }
            Err(e) => self.show_failure(&e),
        }
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn search_add_char(&mut self, c: char) {
        self.filter.search.push(c);
        self.selected_index = 0;
        self.refresh_rows();
    }

    pub fn search_backspace(&mut self) {
        self.filter.search.pop();
        self.refresh_rows();
    }

    /// Leave search mode keeping the current text
    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.filter.search.clear();
        self.ui_mode = UiMode::Normal;
        self.refresh_rows();
    }

    pub fn cycle_priority_filter(&mut self) {
        self.filter.priority = self.filter.priority.cycle();
        self.selected_index = 0;
        self.refresh_rows();
    }

    /// Start the timer on the selected task, or stop it if it is already running there.
    /// Starting on another task stops (and logs) the running one first.
    pub fn toggle_timer(&mut self) {
        let Some(id) = self.selected_row().map(|r| r.id) else { return };

        let was_running_here = self.timer.map(|t| t.task_id) == Some(id);
        if self.stop_timer().is_err() && self.timer.is_some() {
            return;
        }
        if !was_running_here {
            self.timer = Some(ActiveTimer::start(id));
            info!(%id, "timer started");
        }
    }

    /// Stop the running timer and log its elapsed time.
    /// If the save fails the timer keeps running so the time can be logged on a later stop.
    pub fn stop_timer(&mut self) -> TaskResult<()> {
        let Some(timer) = self.timer.take() else { return Ok(()) };
        let elapsed = timer.elapsed_ms(Instant::now());

        match self.tasks.log_time(timer.task_id, elapsed) {
            Ok(total) => {
                info!(id = %timer.task_id, elapsed_ms = elapsed, total_ms = total, "timer stopped");
                self.refresh_rows();
                Ok(())
            }
            Err(e) => {
                if matches!(e, TaskError::StorageUnavailable(_)) {
                    self.timer = Some(timer);
                }
                self.show_failure(&e);
                Err(e)
            }
        }
    }

    /// Logged time plus the running timer, for display
    pub fn live_time_spent(&self, row: &TaskRow) -> u64 {
        let running = match self.timer {
            Some(timer) if timer.task_id == row.id => timer.elapsed_ms(Instant::now()),
            _ => 0,
        };
        row.task.time_spent.saturating_add(running)
    }

    /// Expire the toast
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(Instant::now())) {
            self.toast = None;
        }
    }

    pub fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn weekly_overview(&self) -> WeeklyTotals {
        self.tasks.weekly_overview(Self::now())
    }

    pub fn daily_breakdown(&self, totals: &WeeklyTotals) -> Vec<DayStats> {
        calculate_daily_stats(self.tasks.all(), totals)
    }
}
