pub mod files;
pub mod settings;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, init_local_data_dir, log_file, settings_file, tasks_file};
pub use settings::{load_settings, save_settings, AppSettings};
pub use store::{JsonFileStore, TaskStore};
#[cfg(test)]
pub use store::MemoryStore;
