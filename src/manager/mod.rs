//! Automatic lifecycle dates for task status edits
//!
//! Runs once per edit transaction as a pure filter:
//!
//! 1. [`classifier`] drops transactions that cannot be a status edit
//!    (unchanged, disabled, our own output, paste/set, line moves).
//! 2. [`detector`] finds the task line whose status character changed.
//! 3. [`planner`] maps the old/new status categories to date additions and
//!    removals.
//! 4. [`position`] and [`applier`] place each annotation in the line and
//!    return the amended transaction, tagged so it is not processed again.

pub mod applier;
pub mod classifier;
pub mod detector;
pub mod patterns;
pub mod planner;
pub mod position;

pub use applier::apply_date_operations;
pub use classifier::{SkipReason, is_move_operation, skip_reason};
pub use detector::{StatusChange, find_task_status_change};
pub use planner::{has_existing_date, plan_date_operations};
pub use position::{completed_insert_position, resolve_insert_position};

use crate::editor::{FilterOutcome, Transaction};
use crate::settings::Settings;
use chrono::{Local, NaiveDateTime};

/// Run the whole pipeline over `tr`, dating annotations with `now`
pub fn handle_transaction(
    tr: &Transaction,
    settings: &Settings,
    now: NaiveDateTime,
) -> FilterOutcome {
    if let Some(reason) = skip_reason(tr, settings) {
        log::debug!("Skipping transaction: {}", reason);
        return FilterOutcome::PassThrough;
    }

    let Some(change) = find_task_status_change(tr) else {
        return FilterOutcome::PassThrough;
    };
    let Some(line) = change.doc.line(change.line_number) else {
        return FilterOutcome::PassThrough;
    };

    let operations =
        plan_date_operations(change.old_status, change.new_status, settings, line.text);
    if operations.is_empty() {
        return FilterOutcome::PassThrough;
    }

    apply_date_operations(tr, change.line_number, &operations, settings, now)
}

/// Settings-bound front door to [`handle_transaction`]
#[derive(Debug, Clone, Default)]
pub struct AutoDateManager {
    settings: Settings,
}

impl AutoDateManager {
    pub fn new(settings: Settings) -> Self {
        AutoDateManager { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Filter `tr`, dating annotations with the local wall clock
    pub fn filter(&self, tr: &Transaction) -> FilterOutcome {
        self.filter_at(tr, Local::now().naive_local())
    }

    pub fn filter_at(&self, tr: &Transaction, now: NaiveDateTime) -> FilterOutcome {
        handle_transaction(tr, &self.settings, now)
    }
}
