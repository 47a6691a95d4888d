mod app;
mod domain;
mod error;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod schedule;
mod task_list;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, BoxedStore};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Meridiem, Priority, PriorityFilter, TaskDraft, TimeUnit, ViewFilter};
use persistence::{
    ensure_data_dir, init_local_data_dir, load_settings, save_settings, settings_file, tasks_file, AppSettings,
    JsonFileStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use schedule::{duration_to_ms, format_duration};
use std::io;
use std::path::{Path, PathBuf};
use task_list::TaskList;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "slotwise")]
#[command(about = "Hour-slot task planner with conflict-free scheduling and weekly time totals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Task fields shared by `add` and `edit`
#[derive(Args, Debug)]
struct TaskFields {
    /// Short title
    #[arg(short, long)]
    title: Option<String>,
    /// Description
    #[arg(short, long)]
    body: Option<String>,
    /// low, medium or high
    #[arg(short, long)]
    priority: Option<String>,
    /// Free-form status
    #[arg(short, long)]
    status: Option<String>,
    /// Scheduled date (YYYY-MM-DD). Defaults to today when adding.
    #[arg(short, long)]
    date: Option<String>,
    /// Start hour, 1-12
    #[arg(long)]
    hour: Option<String>,
    /// AM or PM
    #[arg(short, long)]
    meridiem: Option<String>,
    /// Estimated time, a positive whole number
    #[arg(short, long)]
    estimate: Option<String>,
    /// M (minutes) or H (hours)
    #[arg(short, long)]
    unit: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .slotwise directory in the current directory
    Init,
    /// Add a task; a taken hour moves to the nearest free one
    Add {
        #[command(flatten)]
        fields: TaskFields,
    },
    /// List tasks with their index
    List {
        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,
        /// all, low, medium or high
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Edit the task at INDEX (as shown by `list`)
    Edit {
        index: usize,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete the task at INDEX (as shown by `list`)
    Delete { index: usize },
    /// Log time spent on the task at INDEX
    Log {
        index: usize,
        amount: u32,
        /// M (minutes) or H (hours)
        #[arg(default_value = "M")]
        unit: String,
    },
    /// Print estimated vs. actual time for the current week
    Week {
        /// Any date in the week (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Generate a weekly report in Markdown
    Report {
        /// Any date in the week (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data dir>/report-week-<week start>.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => init(),
        command => {
            let data_dir = ensure_data_dir()?;
            let settings = load_settings(settings_file(&data_dir))?;
            if let Err(e) = logging::init_logging(&data_dir, &settings.log_level) {
                eprintln!("Warning: logging disabled: {:#}", e);
            }
            run_command(command, &data_dir, settings)
        }
    }
}

/// Initialize local .slotwise directory
fn init() -> Result<()> {
    let current_dir = std::env::current_dir().context("Could not determine current directory")?;
    let data_dir = init_local_data_dir(&current_dir)?;
    save_settings(settings_file(&data_dir), &AppSettings::default())?;
    println!("Initialized slotwise directory: {}", data_dir.display());
    println!();
    println!("slotwise will now use this local directory for task storage.");
    println!("Run 'slotwise' to start planning.");
    Ok(())
}

fn run_command(command: Option<Commands>, data_dir: &Path, settings: AppSettings) -> Result<()> {
    match command {
        None => run_tui(data_dir, settings),
        Some(Commands::Init) => init(),
        Some(Commands::Add { fields }) => {
            let mut tasks = open_task_list(data_dir)?;
            let draft = fields.apply_to(new_draft(&settings))?;
            let outcome = tasks.add_task(&draft)?;
            let message = if outcome.conflicted {
                notifications::ADDED_ADJUSTED
            } else {
                notifications::ADDED
            };
            println!("{}", message);
            println!("Scheduled {} at {}", outcome.slot.date, outcome.slot.clock_label());
            Ok(())
        }
        Some(Commands::List { search, priority }) => {
            let tasks = open_task_list(data_dir)?;
            let filter = ViewFilter {
                search: search.unwrap_or_default(),
                priority: match priority {
                    Some(tag) => PriorityFilter::from_tag(&tag)
                        .with_context(|| format!("Unknown priority filter '{}'", tag))?,
                    None => PriorityFilter::All,
                },
            };
            print_rows(&tasks, &filter);
            Ok(())
        }
        Some(Commands::Edit { index, fields }) => {
            let mut tasks = open_task_list(data_dir)?;
            let id = tasks.id_at(index)?;
            let existing = tasks.get(id).context("Task disappeared")?;
            let draft = fields.apply_to(TaskDraft::from_task(existing))?;
            let outcome = tasks.edit_task(index, &draft)?;
            let message = if outcome.conflicted {
                notifications::UPDATED_ADJUSTED
            } else {
                notifications::UPDATED
            };
            println!("{}", message);
            Ok(())
        }
        Some(Commands::Delete { index }) => {
            let mut tasks = open_task_list(data_dir)?;
            let removed = tasks.delete_task(index)?;
            println!("{} ({})", notifications::DELETED, removed.title);
            Ok(())
        }
        Some(Commands::Log { index, amount, unit }) => {
            let mut tasks = open_task_list(data_dir)?;
            let unit = TimeUnit::from_tag(&unit).with_context(|| format!("Unknown time unit '{}'", unit))?;
            let id = tasks.id_at(index)?;
            let total = tasks.log_time(id, duration_to_ms(amount, unit))?;
            println!("Logged. Total time spent: {}", format_duration(total));
            Ok(())
        }
        Some(Commands::Week { date }) => {
            let tasks = open_task_list(data_dir)?;
            let totals = tasks.weekly_overview(as_of(date)?);
            println!("Week of {} ({} through {})", totals.today, totals.week_start, totals.today);
            println!("  Tasks:     {}", totals.task_count);
            println!("  Estimated: {}", format_duration(totals.total_estimated_ms));
            println!("  Actual:    {}", format_duration(totals.total_actual_ms));
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let tasks = open_task_list(data_dir)?;
            let as_of = as_of(date)?;
            let output_path = output.map(PathBuf::from);

            println!("Generating report for the week of {}...", as_of.date());
            let report_path = report::generate_report(tasks.all(), as_of, data_dir, output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
    }
}

impl TaskFields {
    /// Overlay the given flags on a draft
    fn apply_to(self, mut draft: TaskDraft) -> Result<TaskDraft> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(body) = self.body {
            draft.body = body;
        }
        if let Some(tag) = self.priority {
            draft.priority = Priority::from_tag(&tag).with_context(|| format!("Unknown priority '{}'", tag))?;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if let Some(hour) = self.hour {
            draft.hour = hour;
        }
        if let Some(tag) = self.meridiem {
            draft.meridiem = Meridiem::from_tag(&tag).with_context(|| format!("Expected AM or PM, got '{}'", tag))?;
        }
        if let Some(estimate) = self.estimate {
            draft.estimated_time = estimate;
        }
        if let Some(tag) = self.unit {
            draft.time_unit = TimeUnit::from_tag(&tag).with_context(|| format!("Unknown time unit '{}'", tag))?;
        }
        Ok(draft)
    }
}

fn new_draft(settings: &AppSettings) -> TaskDraft {
    TaskDraft {
        priority: settings.default_priority,
        time_unit: settings.default_time_unit,
        date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        ..TaskDraft::default()
    }
}

fn open_task_list(data_dir: &Path) -> Result<TaskList<JsonFileStore>> {
    let store = JsonFileStore::new(tasks_file(data_dir));
    Ok(TaskList::load(store)?)
}

/// Midnight of `--date`, or now
fn as_of(date: Option<String>) -> Result<NaiveDateTime> {
    match date {
        Some(date_str) => {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?;
            Ok(date.and_time(NaiveTime::MIN))
        }
        None => Ok(Local::now().naive_local()),
    }
}

fn print_rows(tasks: &TaskList<JsonFileStore>, filter: &ViewFilter) {
    let rows = tasks.rows(filter);
    if tasks.is_empty() {
        println!("No tasks yet. Add one with 'slotwise add'.");
        return;
    }
    if rows.is_empty() && filter.is_active() {
        println!("No tasks match the filter.");
        return;
    }

    for row in rows {
        let task = &row.task;
        let when = task
            .slot()
            .map(|s| format!("{} {}", s.date, s.clock_label()))
            .unwrap_or_else(|| "-".to_string());
        let status = if task.status.is_empty() {
            String::new()
        } else {
            format!("  [{}]", task.status)
        };
        println!(
            "{:>3}  {:<30} {:<6} {:<16} est {:<6} spent {}{}",
            row.original_index,
            task.title,
            task.priority.label(),
            when,
            task.estimate_label(),
            format_duration(task.time_spent),
            status
        );
    }
}

fn run_tui(data_dir: &Path, settings: AppSettings) -> Result<()> {
    // Show which directory we're using
    eprintln!("Using slotwise directory: {}", data_dir.display());

    let store: BoxedStore = Box::new(JsonFileStore::new(tasks_file(data_dir)));
    let tasks = TaskList::load(store)?;
    let mut app = AppState::new(tasks, settings);
    info!(count = app.tasks.len(), "starting terminal ui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Log a running timer before exit
    if let Err(err) = app.stop_timer() {
        eprintln!("Error saving logged time: {}", err);
    }

    // Print any errors
    if let Err(err) = result {
        error!(error = %err, "terminal ui stopped");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Expire toasts
        app.tick();
    }
}
