use super::enums::{Meridiem, Priority, TimeUnit};
use crate::error::{TaskError, TaskResult};
use crate::schedule::duration_to_ms;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier, assigned at creation
pub type TaskId = Uuid;

/// A (date, hour, meridiem) triple: when a task is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: NaiveDate,
    /// Clock hour, 1..=12
    pub hour: u8,
    pub meridiem: Meridiem,
}

impl Slot {
    pub fn new(date: NaiveDate, hour: u8, meridiem: Meridiem) -> Self {
        Self {
            date,
            hour,
            meridiem,
        }
    }

    /// 24-hour clock hour (12 AM is 0, 12 PM is 12)
    pub fn hour_of_day(&self) -> u8 {
        let base = self.hour % 12;
        match self.meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + 12,
        }
    }

    /// Hour and meridiem as shown in lists, e.g. "9 AM"
    pub fn clock_label(&self) -> String {
        format!("{} {}", self.hour, self.meridiem)
    }
}

/// The persisted task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: String,
    #[serde(default, with = "calendar_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_hour", skip_serializing_if = "Option::is_none")]
    pub time_start: Option<u8>,
    #[serde(default)]
    pub ante_meridiem: Meridiem,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub time_unit: TimeUnit,
    /// Milliseconds of logged work
    #[serde(default, deserialize_with = "lenient_ms")]
    pub time_spent: u64,
}

impl Task {
    /// The scheduled slot, if the record has a date and a valid clock hour
    pub fn slot(&self) -> Option<Slot> {
        let date = self.date?;
        let hour = self.time_start.filter(|h| (1..=12).contains(h))?;
        Some(Slot::new(date, hour, self.ante_meridiem))
    }

    /// Estimated time in milliseconds; records with an unparseable estimate count as 0
    pub fn estimated_ms(&self) -> u64 {
        parse_positive_int(&self.estimated_time)
            .map(|amount| duration_to_ms(amount, self.time_unit))
            .unwrap_or(0)
    }

    /// "2 H", "90 M", or "-" when no estimate is recorded
    pub fn estimate_label(&self) -> String {
        if self.estimated_time.trim().is_empty() {
            "-".to_string()
        } else {
            format!("{} {}", self.estimated_time.trim(), self.time_unit.to_tag())
        }
    }

    pub fn matches_title(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Parse a strictly positive integer such as an estimate or an hour
pub fn parse_positive_int(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Raw form input for creating or editing a task
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub status: String,
    /// YYYY-MM-DD
    pub date: String,
    pub hour: String,
    pub meridiem: Meridiem,
    pub estimated_time: String,
    pub time_unit: TimeUnit,
}

/// A draft whose fields passed write-time validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub status: String,
    pub slot: Slot,
    pub estimate: u32,
    pub time_unit: TimeUnit,
}

impl TaskDraft {
    /// Prefill a draft from an existing task (for the edit form)
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            body: task.body.clone(),
            priority: task.priority,
            status: task.status.clone(),
            date: task
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            hour: task.time_start.map(|h| h.to_string()).unwrap_or_default(),
            meridiem: task.ante_meridiem,
            estimated_time: task.estimated_time.clone(),
            time_unit: task.time_unit,
        }
    }

    /// Check required fields and numeric input
    pub fn validate(&self) -> TaskResult<ValidDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskError::validation("title", "must not be empty"));
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(TaskError::validation("body", "must not be empty"));
        }

        let date_text = self.date.trim();
        if date_text.is_empty() {
            return Err(TaskError::validation("date", "pick a date"));
        }
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| {
            TaskError::validation("date", format!("'{}' is not a YYYY-MM-DD date", date_text))
        })?;

        let hour = parse_positive_int(&self.hour)
            .filter(|h| *h <= 12)
            .ok_or_else(|| {
                TaskError::validation("timeStart", format!("'{}' is not an hour from 1 to 12", self.hour.trim()))
            })?;

        let estimate = parse_positive_int(&self.estimated_time).ok_or_else(|| {
            TaskError::validation(
                "estimatedTime",
                format!("'{}' is not a positive whole number", self.estimated_time.trim()),
            )
        })?;

        Ok(ValidDraft {
            title: title.to_string(),
            body: body.to_string(),
            priority: self.priority,
            status: self.status.trim().to_string(),
            slot: Slot::new(date, hour as u8, self.meridiem),
            estimate,
            time_unit: self.time_unit,
        })
    }
}

impl ValidDraft {
    /// Build the stored record at the (possibly reassigned) slot
    pub fn into_task(self, id: TaskId, slot: Slot, time_spent: u64) -> Task {
        Task {
            id,
            title: self.title,
            body: self.body,
            priority: self.priority,
            status: self.status,
            date: Some(slot.date),
            time_start: Some(slot.hour),
            ante_meridiem: slot.meridiem,
            estimated_time: self.estimate.to_string(),
            time_unit: self.time_unit,
            time_spent,
        }
    }
}

/// Numbers, or strings holding a number, as an f64
fn numeric(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts integer or fractional millisecond counts; negatives and junk read as 0
fn lenient_ms<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(numeric)
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u64)
        .unwrap_or(0))
}

/// Whole numbers that fit a u8 are kept; `Task::slot` rejects those outside 1..=12
fn lenient_hour<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(numeric)
        .filter(|h| h.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(h))
        .map(|h| h as u8))
}

/// `date` is written as YYYY-MM-DD; full RFC 3339 timestamps are read as the local calendar date
mod calendar_date {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(text) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        if let Ok(date) = NaiveDate::parse_from_str(&text, FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| Some(dt.with_timezone(&Local).date_naive()))
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", text, e)))
    }
}
