//! Maintenance task (fault log entry) model.
//!
//! # Responsibility
//! - Define the complete `Task` record and its partial `TaskDraft` input.
//! - Fill documented defaults when a draft becomes a record.
//!
//! # Invariants
//! - `id` is never empty and stays stable across edits.
//! - `date` is the only grouping key used by the daily agenda.
//! - `timestamp` is informational and never used for ordering.

use crate::clock::Clock;
use crate::model::non_blank;
use crate::model::record_date::{format_record_date, parse_record_date};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable task identifier as stored in the persisted collection.
pub type TaskId = String;

pub const DEFAULT_TASK_CATEGORY: &str = "otros";

/// Categories offered by the fault form. Other values are kept verbatim.
pub const KNOWN_TASK_CATEGORIES: &[&str] = &[
    "clima",
    "cocina",
    "piscina",
    "calentador",
    "iluminacion",
    "otros",
];

/// Label shown for tasks whose solution has not been recorded yet.
pub const PENDING_SOLUTION_LABEL: &str = "Pendiente";

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Fault severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Parses a severity tag, falling back to `medium` for missing or
    /// unrecognized input.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|text| text.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => Self::Low,
            Some("medium") => Self::Medium,
            Some("high") => Self::High,
            Some("critical") => Self::Critical,
            _ => Self::default(),
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete maintenance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    /// Empty means the fault is still pending.
    pub solution: String,
    /// Opaque photo reference (URL or data URI).
    pub image: Option<String>,
    #[serde(with = "crate::model::record_date::serde_format")]
    pub date: NaiveDate,
    pub timestamp: String,
}

/// Partial task input as submitted by a form or read from storage.
///
/// Every field is optional; [`Task::from_draft`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub solution: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub timestamp: Option<String>,
}

impl TaskDraft {
    /// Starts a draft with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl Task {
    /// Builds a complete task from a draft.
    ///
    /// # Defaults
    /// - `id`: fresh UUID v4 text when absent or blank.
    /// - `category`: `otros`; `severity`: `medium`.
    /// - `title`, `description`, `solution`: empty.
    /// - `image`: none when absent or blank.
    /// - `date`: clock's today when absent or not a valid `YYYY-MM-DD`.
    /// - `timestamp`: clock's now, formatted `DD/MM/YYYY, HH:MM:SS`.
    pub fn from_draft(draft: TaskDraft, clock: &dyn Clock) -> Self {
        let date = draft
            .date
            .as_deref()
            .and_then(parse_record_date)
            .unwrap_or_else(|| clock.today());

        Self {
            id: non_blank(draft.id).unwrap_or_else(new_task_id),
            title: draft.title.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            category: non_blank(draft.category)
                .unwrap_or_else(|| DEFAULT_TASK_CATEGORY.to_string()),
            severity: Severity::parse_or_default(draft.severity.as_deref()),
            solution: draft.solution.unwrap_or_default(),
            image: non_blank(draft.image),
            date,
            timestamp: non_blank(draft.timestamp)
                .unwrap_or_else(|| format_timestamp(clock.now())),
        }
    }

    /// Converts the record back into a fully populated draft.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            id: Some(self.id.clone()),
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category: Some(self.category.clone()),
            severity: Some(self.severity.as_str().to_string()),
            solution: Some(self.solution.clone()),
            image: self.image.clone(),
            date: Some(self.date_string()),
            timestamp: Some(self.timestamp.clone()),
        }
    }

    /// Date as the `YYYY-MM-DD` string used for agenda grouping.
    pub fn date_string(&self) -> String {
        format_record_date(self.date)
    }

    pub fn is_pending(&self) -> bool {
        self.solution.trim().is_empty()
    }

    /// Solution text, or `Pendiente` while none is recorded.
    pub fn solution_label(&self) -> &str {
        if self.is_pending() {
            PENDING_SOLUTION_LABEL
        } else {
            self.solution.as_str()
        }
    }

    /// Case-insensitive substring match over title, description and category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.description, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
