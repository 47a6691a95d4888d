pub mod conflict;
pub mod time;

pub use conflict::{resolve, resolve_excluding};
pub use time::{duration_to_ms, format_duration, normalize_date, start_of_week};
