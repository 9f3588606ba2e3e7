//! Data models for task lines, statuses and lifecycle dates

pub mod date;
pub mod status;
pub mod task_line;

pub use date::{
    DATE_VALUE_PATTERN, DEFAULT_DATE_FORMAT, DateKind, DateOperation, MetadataFormat, format_date,
};
pub use status::{StatusCategory, TaskStatusSets};
pub use task_line::{BlockReference, TaskLine};
