//! Task status characters and their semantic categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a task status character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    Completed,
    InProgress,
    Abandoned,
    Planned,
    NotStarted,
    Unknown,
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCategory::Completed => write!(f, "completed"),
            StatusCategory::InProgress => write!(f, "in-progress"),
            StatusCategory::Abandoned => write!(f, "abandoned"),
            StatusCategory::Planned => write!(f, "planned"),
            StatusCategory::NotStarted => write!(f, "not-started"),
            StatusCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Configured status characters per category, each a `|`-delimited list
/// such as `x|X`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStatusSets {
    pub completed: String,
    pub in_progress: String,
    pub abandoned: String,
    pub planned: String,
    pub not_started: String,
}

impl Default for TaskStatusSets {
    fn default() -> Self {
        TaskStatusSets {
            completed: "x|X".to_string(),
            in_progress: ">|/".to_string(),
            abandoned: "-".to_string(),
            planned: "?".to_string(),
            not_started: " ".to_string(),
        }
    }
}

impl TaskStatusSets {
    /// Classify a status character.
    ///
    /// Categories are tested in a fixed order (completed, in progress,
    /// abandoned, planned, not started) and the first set containing the
    /// character wins, so a character configured twice always lands in the
    /// earlier category.
    pub fn classify(&self, status: char) -> StatusCategory {
        let ordered = [
            (&self.completed, StatusCategory::Completed),
            (&self.in_progress, StatusCategory::InProgress),
            (&self.abandoned, StatusCategory::Abandoned),
            (&self.planned, StatusCategory::Planned),
            (&self.not_started, StatusCategory::NotStarted),
        ];

        ordered
            .into_iter()
            .find(|(set, _)| set_contains(set, status))
            .map(|(_, category)| category)
            .unwrap_or(StatusCategory::Unknown)
    }
}

/// Whether a `|`-delimited set lists `status` as one of its entries.
/// Entries are compared whole, so `ab` never matches `a`.
fn set_contains(set: &str, status: char) -> bool {
    let mut buf = [0u8; 4];
    let needle = status.encode_utf8(&mut buf);
    set.split('|').any(|entry| entry == needle)
}
