//! Finding the task whose status an edit changed

use crate::editor::{ChangeRange, Document, Transaction};
use crate::models::TaskLine;

/// A task status transition found in a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange<'a> {
    /// The post-edit document
    pub doc: &'a Document,
    /// 1-based line of the task in `doc`
    pub line_number: usize,
    pub old_status: char,
    pub new_status: char,
}

/// Report the first task line whose status character differs before and
/// after the transaction.
///
/// The pre-edit status comes from a deleted task line with the same content
/// (which survives indentation or marker changes), or failing that from the
/// old line under the edit, provided the edit touches the status brackets.
/// Anything else is not reported.
pub fn find_task_status_change(tr: &Transaction) -> Option<StatusChange<'_>> {
    for change in tr.changes().iter().filter(|c| !c.inserted.is_empty()) {
        let Some(new_line) = tr.new_doc().line_at(change.from_b) else {
            continue;
        };
        let Some(new_task) = TaskLine::parse(new_line.text) else {
            continue;
        };

        let old_status = status_from_deleted_task(tr, new_task.content())
            .or_else(|| status_under_edit(tr, change, new_line.from, &new_task));

        match old_status {
            Some(old_status) if old_status != new_task.status() => {
                log::debug!(
                    "Task status changed on line {}: {:?} -> {:?}",
                    new_line.number,
                    old_status,
                    new_task.status()
                );
                return Some(StatusChange {
                    doc: tr.new_doc(),
                    line_number: new_line.number,
                    old_status,
                    new_status: new_task.status(),
                });
            }
            Some(_) => log::debug!("Line {} kept its status", new_line.number),
            None => log::debug!("No pre-edit task found for line {}", new_line.number),
        }
    }

    None
}

/// Status of a deleted task line whose content equals `content`
fn status_from_deleted_task(tr: &Transaction, content: &str) -> Option<char> {
    tr.changes()
        .iter()
        .filter(|c| c.from_a < c.to_a)
        .filter_map(|c| tr.start_doc().slice(c.from_a, c.to_a))
        .flat_map(|deleted| deleted.split('\n'))
        .filter_map(TaskLine::parse)
        .find(|old_task| old_task.content() == content)
        .map(|old_task| old_task.status())
}

/// Status of the pre-edit line under `change`, if the change overlaps the
/// new line's `[`..`]` region
fn status_under_edit(
    tr: &Transaction,
    change: &ChangeRange,
    line_from: usize,
    new_task: &TaskLine<'_>,
) -> Option<char> {
    let bracket_inner = line_from + new_task.status_offset();
    let bracket_close = bracket_inner + new_task.status().len_utf8();
    if change.from_b > bracket_close || change.to_b < bracket_inner {
        return None;
    }

    if change.from_a >= tr.start_doc().len() {
        return None;
    }
    let old_line = tr.start_doc().line_at(change.from_a)?;
    TaskLine::parse(old_line.text).map(|old_task| old_task.status())
}
