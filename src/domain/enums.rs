use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse from "low" / "medium" / "high" (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Next priority in form order (wraps)
    pub fn cycle(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Low
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_tag())
    }
}

/// Half of the 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "AM" => Some(Self::Am),
            "PM" => Some(Self::Pm),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

impl Default for Meridiem {
    fn default() -> Self {
        Self::Am
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_tag())
    }
}

/// Unit of an estimated time amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "M")]
    Minutes,
    #[serde(rename = "H")]
    Hours,
}

impl TimeUnit {
    /// Parse from "M" / "H", also accepting "min" / "hours" style spellings
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "M" | "MIN" | "MINS" | "MINUTE" | "MINUTES" => Some(Self::Minutes),
            "H" | "HR" | "HRS" | "HOUR" | "HOURS" => Some(Self::Hours),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Minutes => "M",
            Self::Hours => "H",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minutes => "Minute(s)",
            Self::Hours => "Hour(s)",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Minutes => Self::Hours,
            Self::Hours => Self::Minutes,
        }
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::Hours
    }
}

/// Priority dropdown filter for the task view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Parse "all" or a priority tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Priority::from_tag(tag).map(Self::Only)
    }

    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => *p == priority,
        }
    }

    /// All -> High -> Medium -> Low -> All
    pub fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Only(Priority::High),
            Self::Only(Priority::High) => Self::Only(Priority::Medium),
            Self::Only(Priority::Medium) => Self::Only(Priority::Low),
            Self::Only(Priority::Low) => Self::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(p) => p.label(),
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Searching,
    AddingTask,
    EditingTask,
}

/// Input form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    Priority,
    Status,
    Date,
    Hour,
    Meridiem,
    Estimate,
    Unit,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Title,
            FormField::Body,
            FormField::Priority,
            FormField::Status,
            FormField::Date,
            FormField::Hour,
            FormField::Meridiem,
            FormField::Estimate,
            FormField::Unit,
        ]
    }

    fn position(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }

    /// Choice fields cycle through values instead of taking text
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::Priority | FormField::Meridiem | FormField::Unit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title*",
            FormField::Body => "Body*",
            FormField::Priority => "Priority*",
            FormField::Status => "Status",
            FormField::Date => "Date* (YYYY-MM-DD)",
            FormField::Hour => "Hour* (1-12)",
            FormField::Meridiem => "AM/PM*",
            FormField::Estimate => "Estimated time*",
            FormField::Unit => "Unit",
        }
    }
}
