//! Immutable document snapshots with line lookup

/// A line of a document. `from`/`to` are byte offsets into the document,
/// `to` excluding the line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    pub from: usize,
    pub to: usize,
    pub text: &'a str,
}

/// An immutable text snapshot. All offsets are UTF-8 byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Document { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line by 1-based number
    pub fn line(&self, number: usize) -> Option<Line<'_>> {
        let index = number.checked_sub(1)?;
        let from = *self.line_starts.get(index)?;
        let to = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let text = self.text[from..to].strip_suffix('\r').unwrap_or(&self.text[from..to]);

        Some(Line {
            number,
            from,
            to: from + text.len(),
            text,
        })
    }

    /// Line containing byte offset `pos` (`pos == len()` maps to the last line)
    pub fn line_at(&self, pos: usize) -> Option<Line<'_>> {
        if pos > self.text.len() {
            return None;
        }
        let number = self.line_starts.partition_point(|&start| start <= pos);
        self.line(number)
    }

    /// Text between two byte offsets, `None` if out of bounds or not on
    /// character boundaries
    pub fn slice(&self, from: usize, to: usize) -> Option<&str> {
        self.text.get(from..to)
    }

    /// Map a byte offset to UTF-16 code units for hosts that count that way
    pub fn utf16_offset(&self, pos: usize) -> Option<usize> {
        self.text
            .get(..pos)
            .map(|prefix| prefix.chars().map(char::len_utf16).sum())
    }
}
