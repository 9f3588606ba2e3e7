//! Edit transactions between two document versions

use crate::editor::document::Document;
use crate::models::TaskLine;
use thiserror::Error;

/// Errors raised while building or applying transactions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Change {from}..{to} is out of bounds for a document of length {len}")]
    OutOfBounds { from: usize, to: usize, len: usize },
    #[error("Change starting at {from} overlaps the previous change ending at {previous_end}")]
    Overlapping { previous_end: usize, from: usize },
    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    #[error("Line {0} does not exist")]
    LineOutOfRange(usize),
    #[error("Line {0} is not a task line")]
    NotATaskLine(usize),
}

/// A replacement of `from..to` with `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextChange {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        TextChange {
            from: at,
            to: at,
            insert: text.into(),
        }
    }

    pub fn delete(from: usize, to: usize) -> Self {
        TextChange {
            from,
            to,
            insert: String::new(),
        }
    }

    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        TextChange {
            from,
            to,
            insert: text.into(),
        }
    }

    fn is_noop(&self) -> bool {
        self.from == self.to && self.insert.is_empty()
    }

    /// Apply to `text` in place after checking bounds and char boundaries
    pub fn apply_to(&self, text: &mut String) -> Result<(), TransactionError> {
        self.validate(text)?;
        text.replace_range(self.from..self.to, &self.insert);
        Ok(())
    }

    fn validate(&self, text: &str) -> Result<(), TransactionError> {
        if self.from > self.to || self.to > text.len() {
            return Err(TransactionError::OutOfBounds {
                from: self.from,
                to: self.to,
                len: text.len(),
            });
        }
        for pos in [self.from, self.to] {
            if !text.is_char_boundary(pos) {
                return Err(TransactionError::NotCharBoundary(pos));
            }
        }
        Ok(())
    }
}

/// One changed range: `from_a..to_a` in the old document became
/// `from_b..to_b` (holding `inserted`) in the new one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRange {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
    pub inserted: String,
}

/// Where a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    User,
    /// Produced by the date manager itself; never re-processed
    SelfGenerated,
}

/// The kind of user action behind a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    Input,
    Delete,
    Paste,
    /// Bulk document replacement
    Set,
    Move,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Selection {
            anchor: pos,
            head: pos,
        }
    }
}

/// A set of simultaneous changes taking `start_doc` to `new_doc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    start_doc: Document,
    new_doc: Document,
    changes: Vec<ChangeRange>,
    selection: Option<Selection>,
    origin: Origin,
    user_event: Option<UserEvent>,
}

impl Transaction {
    /// Build a transaction from changes expressed in `start_doc` coordinates.
    /// Changes must be sorted and must not overlap; no-op changes are dropped.
    pub fn new(start_doc: Document, changes: Vec<TextChange>) -> Result<Self, TransactionError> {
        let old_text = start_doc.text();
        let mut new_text = String::with_capacity(old_text.len());
        let mut ranges = Vec::with_capacity(changes.len());
        let mut cursor = 0;

        for change in changes.into_iter().filter(|c| !c.is_noop()) {
            change.validate(old_text)?;
            if change.from < cursor {
                return Err(TransactionError::Overlapping {
                    previous_end: cursor,
                    from: change.from,
                });
            }

            new_text.push_str(&old_text[cursor..change.from]);
            let from_b = new_text.len();
            new_text.push_str(&change.insert);

            ranges.push(ChangeRange {
                from_a: change.from,
                to_a: change.to,
                from_b,
                to_b: new_text.len(),
                inserted: change.insert,
            });
            cursor = change.to;
        }
        new_text.push_str(&old_text[cursor..]);

        Ok(Transaction {
            start_doc,
            new_doc: Document::new(new_text),
            changes: ranges,
            selection: None,
            origin: Origin::User,
            user_event: None,
        })
    }

    /// The single-character replacement produced by clicking or typing a
    /// task's status
    pub fn set_task_status(
        doc: Document,
        line_number: usize,
        status: char,
    ) -> Result<Self, TransactionError> {
        let line = doc
            .line(line_number)
            .ok_or(TransactionError::LineOutOfRange(line_number))?;
        let task = TaskLine::parse(line.text).ok_or(TransactionError::NotATaskLine(line_number))?;

        let from = line.from + task.status_offset();
        let to = from + task.status().len_utf8();
        let cursor = from + status.len_utf8();

        Ok(Transaction::new(doc, vec![TextChange::replace(from, to, status.to_string())])?
            .with_user_event(UserEvent::Input)
            .with_selection(Selection::cursor(cursor)))
    }

    /// A single-change transaction turning `start_doc` into `new_text`,
    /// covering only the span where they differ
    pub fn between(start_doc: Document, new_text: &str) -> Result<Self, TransactionError> {
        let old_text = start_doc.text();
        let prefix = common_prefix_len(old_text, new_text);
        let suffix = common_suffix_len(&old_text[prefix..], &new_text[prefix..]);

        let change = TextChange::replace(
            prefix,
            old_text.len() - suffix,
            &new_text[prefix..new_text.len() - suffix],
        );
        Transaction::new(start_doc, vec![change])
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_user_event(mut self, event: UserEvent) -> Self {
        self.user_event = Some(event);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn start_doc(&self) -> &Document {
        &self.start_doc
    }

    pub fn new_doc(&self) -> &Document {
        &self.new_doc
    }

    pub fn changes(&self) -> &[ChangeRange] {
        &self.changes
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn user_event(&self) -> Option<UserEvent> {
        self.user_event
    }

    pub fn is_user_event(&self, event: UserEvent) -> bool {
        self.user_event == Some(event)
    }

    pub fn doc_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// A transaction amended by the date manager: the original changes followed
/// by `follow_up` changes. Follow-up changes apply one after another to the
/// post-edit document, each in the coordinates left by the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSpec {
    pub base: Transaction,
    pub follow_up: Vec<TextChange>,
    pub selection: Option<Selection>,
    pub origin: Origin,
}

impl TransactionSpec {
    /// Final document text after the original and follow-up changes
    pub fn apply(&self) -> Result<String, TransactionError> {
        let mut text = self.base.new_doc().text().to_string();
        for change in &self.follow_up {
            change.apply_to(&mut text)?;
        }
        Ok(text)
    }

    /// Collapse into one transaction from the original start document,
    /// carrying this spec's selection and origin
    pub fn into_transaction(self) -> Result<Transaction, TransactionError> {
        let final_text = self.apply()?;
        let mut transaction = Transaction::between(self.base.start_doc.clone(), &final_text)?
            .with_origin(self.origin);
        transaction.selection = self.selection;
        transaction.user_event = self.base.user_event;
        Ok(transaction)
    }
}

/// What the date manager did with a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Leave the transaction as it is
    PassThrough,
    /// Replace the transaction with an amended one
    Amended(TransactionSpec),
}

impl FilterOutcome {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, FilterOutcome::PassThrough)
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_ranges_and_doc() {
        let doc = Document::new("hello world");
        let tr = Transaction::new(
            doc,
            vec![TextChange::replace(0, 5, "howdy, big"), TextChange::delete(5, 11)],
        )
        .unwrap();

        assert_eq!(tr.new_doc().text(), "howdy, big");
        assert_eq!(tr.changes().len(), 2);
        assert_eq!(tr.changes()[0].from_b, 0);
        assert_eq!(tr.changes()[0].to_b, 10);
        assert_eq!(tr.changes()[1].from_a, 5);
        assert_eq!(tr.changes()[1].from_b, 10);
        assert_eq!(tr.changes()[1].to_b, 10);
        assert!(tr.doc_changed());
        assert_eq!(tr.origin(), Origin::User);
    }

    #[test]
    fn test_new_rejects_bad_changes() {
        let doc = Document::new("abc✅");
        assert!(matches!(
            Transaction::new(doc.clone(), vec![TextChange::delete(2, 10)]),
            Err(TransactionError::OutOfBounds { .. })
        ));
        assert_eq!(
            Transaction::new(doc.clone(), vec![TextChange::delete(4, 5)]),
            Err(TransactionError::NotCharBoundary(4))
        );
        assert!(matches!(
            Transaction::new(
                doc,
                vec![TextChange::delete(0, 2), TextChange::delete(1, 3)]
            ),
            Err(TransactionError::Overlapping { .. })
        ));
    }

    #[test]
    fn test_noop_changes_leave_doc_unchanged() {
        let tr = Transaction::new(Document::new("abc"), vec![TextChange::insert(1, "")]).unwrap();
        assert!(!tr.doc_changed());
        assert_eq!(tr.new_doc().text(), "abc");
    }

    #[test]
    fn test_set_task_status() {
        let doc = Document::new("# List\n- [ ] first\n- [ ] second");
        let tr = Transaction::set_task_status(doc, 3, 'x').unwrap();
        assert_eq!(tr.new_doc().text(), "# List\n- [ ] first\n- [x] second");
        assert_eq!(tr.changes()[0].inserted, "x");
        assert!(tr.is_user_event(UserEvent::Input));
        assert_eq!(tr.selection(), Some(Selection::cursor(23)));
    }

    #[test]
    fn test_set_task_status_errors() {
        let doc = Document::new("# List\n- [ ] first");
        assert_eq!(
            Transaction::set_task_status(doc.clone(), 1, 'x'),
            Err(TransactionError::NotATaskLine(1))
        );
        assert_eq!(
            Transaction::set_task_status(doc, 9, 'x'),
            Err(TransactionError::LineOutOfRange(9))
        );
    }

    #[test]
    fn test_between_covers_only_difference() {
        let tr = Transaction::between(Document::new("- [ ] a ^id"), "- [x] a ✅ d ^id").unwrap();
        assert_eq!(tr.changes().len(), 1);
        assert_eq!(tr.changes()[0].from_a, 3);
        assert_eq!(tr.new_doc().text(), "- [x] a ✅ d ^id");
    }

    #[test]
    fn test_spec_applies_follow_up_sequentially() {
        let base = Transaction::new(Document::new("ab"), vec![TextChange::insert(1, "-")]).unwrap();
        let spec = TransactionSpec {
            base,
            follow_up: vec![TextChange::insert(3, "!"), TextChange::insert(4, "?")],
            selection: None,
            origin: Origin::SelfGenerated,
        };
        assert_eq!(spec.apply().unwrap(), "a-b!?");

        let tr = spec.into_transaction().unwrap();
        assert_eq!(tr.start_doc().text(), "ab");
        assert_eq!(tr.new_doc().text(), "a-b!?");
        assert_eq!(tr.origin(), Origin::SelfGenerated);
    }
}
