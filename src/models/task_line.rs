//! Task line syntax: list marker, bracketed status and trailing block reference

use once_cell::sync::Lazy;
use regex::Regex;

/// `- [x]`, `* [ ]`, `1. [/]` with any leading indentation
static TASK_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s|\t]*([-*+]|\d+\.)\s\[(.)\]").expect("valid task prefix regex")
});

/// Task prefix plus at most one separating space
static TASK_CONTENT_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s|\t]*([-*+]|\d+\.)\s\[(.)\]\s?").expect("valid task content regex")
});

static BLOCK_REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(\^[A-Za-z0-9_-]+)\s*$").expect("valid block reference regex")
});

/// A list item carrying a single bracketed status character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    text: &'a str,
    status: char,
    /// Byte offset of the status character
    status_offset: usize,
    /// Byte length of the `marker [s]` prefix
    prefix_len: usize,
}

impl<'a> TaskLine<'a> {
    /// Parse a line, returning `None` when it is not a task line
    pub fn parse(text: &'a str) -> Option<Self> {
        let captures = TASK_PREFIX_RE.captures(text)?;
        let status_match = captures.get(2)?;
        let status = status_match.as_str().chars().next()?;
        let prefix_len = captures.get(0)?.end();

        Some(TaskLine {
            text,
            status,
            status_offset: status_match.start(),
            prefix_len,
        })
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn status(&self) -> char {
        self.status
    }

    /// Byte offset of the status character within the line
    pub fn status_offset(&self) -> usize {
        self.status_offset
    }

    /// Everything after `marker [s]`, trimmed. Two lines with equal content
    /// describe the same task even if indentation or marker changed.
    pub fn content(&self) -> &'a str {
        self.text[self.prefix_len..].trim()
    }

    /// Byte offset where task content begins: after the prefix and at most
    /// one space
    pub fn content_start(&self) -> usize {
        TASK_CONTENT_START_RE
            .find(self.text)
            .map(|m| m.end())
            .unwrap_or(self.prefix_len)
    }
}

/// A trailing `^identifier` token anchoring a stable reference to a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReference {
    /// The identifier including the caret, e.g. `^task-123`
    pub id: String,
    /// Byte offset where the token starts, including leading whitespace
    pub start: usize,
    /// Byte length of the token with its surrounding whitespace
    pub len: usize,
}

impl BlockReference {
    /// Detect a block reference at the end of `line`
    pub fn detect(line: &str) -> Option<Self> {
        let captures = BLOCK_REFERENCE_RE.captures(line)?;
        let whole = captures.get(0)?;
        let id = captures.get(1)?;

        Some(BlockReference {
            id: id.as_str().to_string(),
            start: whole.start(),
            len: whole.len(),
        })
    }

    /// Split `line` into its text without the reference (trailing whitespace
    /// trimmed) and the reference itself
    pub fn strip(line: &str) -> (&str, Option<Self>) {
        match Self::detect(line) {
            Some(reference) => (line[..reference.start].trim_end(), Some(reference)),
            None => (line, None),
        }
    }

    /// Latest offset an annotation may be inserted at: the reference start,
    /// pulled back over one separating space
    pub fn insertion_limit(&self, line: &str) -> usize {
        if self.start > 0 && line.as_bytes().get(self.start - 1) == Some(&b' ') {
            self.start - 1
        } else {
            self.start
        }
    }
}
