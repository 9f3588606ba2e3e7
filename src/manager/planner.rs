//! Deciding which date annotations a status transition adds or removes

use crate::manager::patterns;
use crate::models::{DateKind, DateOperation, StatusCategory};
use crate::settings::Settings;

/// Plan the date operations for a transition from `old_status` to
/// `new_status` on `line`.
///
/// Removals come first, then additions. Start dates are never removed: once
/// a task has been started, the start date stays through later transitions.
pub fn plan_date_operations(
    old_status: char,
    new_status: char,
    settings: &Settings,
    line: &str,
) -> Vec<DateOperation> {
    let statuses = &settings.task_statuses;
    let manager = &settings.auto_date_manager;
    let old_category = statuses.classify(old_status);
    let new_category = statuses.classify(new_status);

    let mut operations = Vec::new();
    if old_category == new_category {
        return operations;
    }

    if manager.manages(DateKind::Completed) && old_category == StatusCategory::Completed {
        operations.push(DateOperation::Remove {
            kind: DateKind::Completed,
        });
    }
    if manager.manages(DateKind::Cancelled) && old_category == StatusCategory::Abandoned {
        operations.push(DateOperation::Remove {
            kind: DateKind::Cancelled,
        });
    }

    if manager.manages(DateKind::Completed) && new_category == StatusCategory::Completed {
        operations.push(add(DateKind::Completed, settings));
    }
    if manager.manages(DateKind::Start)
        && new_category == StatusCategory::InProgress
        && !has_existing_date(line, DateKind::Start, settings)
    {
        operations.push(add(DateKind::Start, settings));
    }
    if manager.manages(DateKind::Cancelled) && new_category == StatusCategory::Abandoned {
        operations.push(add(DateKind::Cancelled, settings));
    }

    log::debug!(
        "{} -> {}: {} date operation(s)",
        old_category,
        new_category,
        operations.len()
    );
    operations
}

/// Whether `line` already carries a date of `kind` in the configured format
pub fn has_existing_date(line: &str, kind: DateKind, settings: &Settings) -> bool {
    patterns::existing_date(kind, settings).is_some_and(|re| re.is_match(line))
}

fn add(kind: DateKind, settings: &Settings) -> DateOperation {
    DateOperation::Add {
        kind,
        format: settings.auto_date_manager.format(kind).to_string(),
    }
}
