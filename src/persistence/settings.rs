use crate::domain::{Priority, TimeUnit};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_toast_secs() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Priority preselected in the add form
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(default)]
    pub default_time_unit: TimeUnit,
    /// How long a toast stays on screen
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    /// tracing filter used when SLOTWISE_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_priority: Priority::default(),
            default_time_unit: TimeUnit::default(),
            toast_secs: default_toast_secs(),
            log_level: default_log_level(),
        }
    }
}

/// Load settings from settings.json
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let path = path.as_ref();

    if !path.exists() {
        // If file doesn't exist, return default settings
        return Ok(AppSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: AppSettings = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
    Ok(settings)
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.toast_secs, 3);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_priority":"high"}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.default_priority, Priority::High);
        assert_eq!(settings.default_time_unit, TimeUnit::Hours);
        assert_eq!(settings.toast_secs, 3);
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = AppSettings {
            default_priority: Priority::Medium,
            default_time_unit: TimeUnit::Minutes,
            toast_secs: 5,
            log_level: "debug".to_string(),
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }
}
