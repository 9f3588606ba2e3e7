//! autodate - automatic lifecycle dates for Markdown task lists
//!
//! This library watches edits to task lines such as `- [ ] Write report`
//! and, when a task's status character changes, inserts or removes start,
//! completed and cancelled date annotations in emoji (`✅ 2025-01-01`) or
//! dataview (`[completion::2025-01-01]`) syntax.

pub mod cli;
pub mod editor;
pub mod manager;
pub mod models;
pub mod settings;

pub use editor::{Document, FilterOutcome, TextChange, Transaction, TransactionSpec};
pub use manager::{AutoDateManager, handle_transaction};
pub use models::{DateKind, DateOperation, MetadataFormat, StatusCategory, TaskStatusSets};
pub use settings::{AutoDateSettings, Settings, SettingsError};
