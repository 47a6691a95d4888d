pub mod enums;
pub mod task;
pub mod views;

pub use enums::{FormField, Meridiem, Priority, PriorityFilter, TimeUnit, UiMode};
pub use task::{Slot, Task, TaskDraft, TaskId};
pub use views::{build_rows, TaskRow, ViewFilter};
