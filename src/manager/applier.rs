//! Turning planned date operations into concrete text changes

use crate::editor::{FilterOutcome, Origin, TextChange, Transaction, TransactionSpec};
use crate::manager::patterns;
use crate::manager::position::{completed_insert_position, resolve_insert_position};
use crate::models::{DateKind, DateOperation, format_date};
use crate::settings::Settings;
use chrono::NaiveDateTime;

/// Apply `operations` to line `line_number` of the transaction's post-edit
/// document.
///
/// Each operation sees the line as left by the operations before it, and
/// the emitted changes follow the same order. Returns the transaction
/// amended with the new changes and tagged as self-generated, or
/// `PassThrough` when nothing changed.
pub fn apply_date_operations(
    tr: &Transaction,
    line_number: usize,
    operations: &[DateOperation],
    settings: &Settings,
    now: NaiveDateTime,
) -> FilterOutcome {
    let Some(line) = tr.new_doc().line(line_number) else {
        return FilterOutcome::PassThrough;
    };
    let mut text = line.text.to_string();
    let mut changes = Vec::new();

    for operation in operations {
        match operation {
            DateOperation::Add { kind, format } => {
                let date = format_date(format, now);
                let annotation = patterns::annotation(*kind, &date, settings);
                let position = match kind {
                    DateKind::Completed => completed_insert_position(&text),
                    DateKind::Start | DateKind::Cancelled => {
                        resolve_insert_position(&text, settings, *kind)
                    }
                };

                log::debug!(
                    "Inserting {} date {:?} at {} (line offset {})",
                    kind,
                    annotation,
                    line.from + position,
                    position
                );
                changes.push(TextChange::insert(line.from + position, annotation.clone()));
                text.insert_str(position, &annotation);
            }
            DateOperation::Remove { kind } => {
                let Some(re) = patterns::removable_date(*kind, settings) else {
                    continue;
                };
                let matches: Vec<(usize, usize)> =
                    re.find_iter(&text).map(|m| (m.start(), m.end())).collect();

                for (start, end) in matches.into_iter().rev() {
                    log::debug!("Removing {} date {:?}", kind, &text[start..end]);
                    changes.push(TextChange::delete(line.from + start, line.from + end));
                    text.replace_range(start..end, "");
                }
            }
        }
    }

    if changes.is_empty() {
        return FilterOutcome::PassThrough;
    }

    FilterOutcome::Amended(TransactionSpec {
        base: tr.clone(),
        follow_up: changes,
        selection: tr.selection(),
        origin: Origin::SelfGenerated,
    })
}
