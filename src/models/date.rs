//! Lifecycle date kinds, annotation syntax and date formatting

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Regex fragment matching a date value with an optional time of day
pub const DATE_VALUE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}(?:\s+\d{2}:\d{2}(?::\d{2})?)?";

/// Which lifecycle date an annotation records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateKind {
    Start,
    Completed,
    Cancelled,
}

impl DateKind {
    /// Marker used in emoji format when none is configured
    pub fn default_marker(self) -> &'static str {
        match self {
            DateKind::Start => "🚀",
            DateKind::Completed => "✅",
            DateKind::Cancelled => "❌",
        }
    }

    /// Inline field name used in dataview format
    pub fn dataview_field(self) -> &'static str {
        match self {
            DateKind::Start => "start",
            DateKind::Completed => "completion",
            DateKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateKind::Start => write!(f, "start"),
            DateKind::Completed => write!(f, "completed"),
            DateKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Annotation syntax for dates written into task lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetadataFormat {
    /// `✅ 2025-01-01`
    #[default]
    #[serde(alias = "tasks")]
    Emoji,
    /// `[completion::2025-01-01]`
    Dataview,
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataFormat::Emoji => write!(f, "emoji"),
            MetadataFormat::Dataview => write!(f, "dataview"),
        }
    }
}

/// A single planned edit to a task line's date annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOperation {
    /// Insert a new annotation, formatted with `format`
    Add { kind: DateKind, format: String },
    /// Remove every existing annotation of this kind
    Remove { kind: DateKind },
}

impl DateOperation {
    pub fn kind(&self) -> DateKind {
        match self {
            DateOperation::Add { kind, .. } | DateOperation::Remove { kind } => *kind,
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self, DateOperation::Add { .. })
    }
}

impl fmt::Display for DateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOperation::Add { kind, format } => write!(f, "add {} ({})", kind, format),
            DateOperation::Remove { kind } => write!(f, "remove {}", kind),
        }
    }
}

/// Format `now` using the host's token syntax.
///
/// Recognised tokens are `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss`; only the
/// first occurrence of each is substituted and everything else is copied
/// literally.
pub fn format_date(format: &str, now: NaiveDateTime) -> String {
    let format = if format.is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        format
    };

    // `%` must survive chrono's formatter as a literal
    let mut pattern = format.replace('%', "%%");
    for (token, spec) in [
        ("YYYY", "%Y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ] {
        pattern = pattern.replacen(token, spec, 1);
    }

    now.format(&pattern).to_string()
}
