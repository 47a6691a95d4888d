pub mod generator;
pub mod stats;
pub mod weekly;

pub use generator::generate_report;
pub use stats::{calculate_daily_stats, DayStats};
pub use weekly::{aggregate, WeeklyTotals};
