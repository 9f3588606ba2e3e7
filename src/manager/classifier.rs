//! Deciding which transactions the date manager looks at

use crate::editor::{Origin, Transaction, UserEvent};
use crate::settings::Settings;
use std::fmt;

/// Why a transaction is passed through untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DocUnchanged,
    Disabled,
    SelfGenerated,
    BulkEdit,
    Move,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DocUnchanged => write!(f, "document unchanged"),
            SkipReason::Disabled => write!(f, "date management disabled"),
            SkipReason::SelfGenerated => write!(f, "own transaction"),
            SkipReason::BulkEdit => write!(f, "paste or bulk replacement"),
            SkipReason::Move => write!(f, "line move"),
        }
    }
}

/// The reason to skip `tr`, or `None` if it may contain a status edit
pub fn skip_reason(tr: &Transaction, settings: &Settings) -> Option<SkipReason> {
    if !tr.doc_changed() {
        return Some(SkipReason::DocUnchanged);
    }
    if !settings.auto_date_manager.enabled {
        return Some(SkipReason::Disabled);
    }
    if tr.origin() == Origin::SelfGenerated {
        return Some(SkipReason::SelfGenerated);
    }
    if tr.is_user_event(UserEvent::Paste) || tr.is_user_event(UserEvent::Set) {
        return Some(SkipReason::BulkEdit);
    }
    if is_move_operation(tr) {
        return Some(SkipReason::Move);
    }
    None
}

/// Whether `tr` relocates lines rather than editing them: some deleted span
/// and some inserted span hold the same non-blank lines, compared trimmed.
///
/// This is a heuristic. A genuine edit whose transaction also deletes and
/// re-inserts identical text elsewhere is treated as a move.
pub fn is_move_operation(tr: &Transaction) -> bool {
    let deletions: Vec<Vec<&str>> = tr
        .changes()
        .iter()
        .filter(|c| c.from_a < c.to_a)
        .filter_map(|c| tr.start_doc().slice(c.from_a, c.to_a))
        .map(non_blank_lines)
        .collect();
    let insertions: Vec<Vec<&str>> = tr
        .changes()
        .iter()
        .filter(|c| !c.inserted.is_empty())
        .map(|c| non_blank_lines(&c.inserted))
        .collect();

    deletions.iter().any(|deleted| {
        !deleted.is_empty() && insertions.iter().any(|inserted| inserted == deleted)
    })
}

fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
