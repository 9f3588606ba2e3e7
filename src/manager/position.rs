//! Where in a task line a new date annotation goes
//!
//! Task content runs from just after `- [s] ` up to the first piece of
//! inline metadata: a `[field::` dataview field, a `#tag` preceded by
//! whitespace, or a date emoji followed by a date. `[[wiki links]]` are
//! always content, whatever they contain. Start and cancelled dates are
//! placed after the content (cancelled after an existing start date),
//! completed dates at the end of the line. No annotation is ever placed
//! after a trailing block reference.

use crate::manager::patterns::{self, DATE_MARKER_EMOJI};
use crate::models::{BlockReference, DateKind, TaskLine};
use crate::settings::Settings;
use once_cell::sync::Lazy;
use regex::Regex;

static DATAVIEW_FIELD_OPENER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+::").expect("valid dataview field regex"));
static TAG_BODY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+").expect("valid tag regex"));
static DATE_AFTER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{4}-\d{2}-\d{2}").expect("valid date regex"));

/// Byte offset in `line` where an annotation of `kind` should be inserted
pub fn resolve_insert_position(line: &str, settings: &Settings, kind: DateKind) -> usize {
    let block_ref = BlockReference::detect(line);
    let Some(task) = TaskLine::parse(line) else {
        return block_ref
            .map(|r| r.insertion_limit(line))
            .unwrap_or(line.len());
    };

    let scan_start = task.content_start();
    let mut position = scan_content_end(line, scan_start);
    while position > scan_start && line.as_bytes()[position - 1] == b' ' {
        position -= 1;
    }

    match kind {
        DateKind::Start => {}
        DateKind::Cancelled => {
            if let Some(end) = start_date_end(line, settings) {
                position = end;
            }
        }
        DateKind::Completed => position = completed_insert_position(line),
    }

    if let Some(reference) = &block_ref
        && position > reference.start
    {
        position = reference.insertion_limit(line);
    }

    log::debug!("Insert position for {} date: {} in {:?}", kind, position, line);
    position
}

/// Completed dates go at the very end of the line, before any block
/// reference and any trailing whitespace
pub fn completed_insert_position(line: &str) -> usize {
    BlockReference::detect(line)
        .map(|r| r.insertion_limit(line))
        .unwrap_or_else(|| line.trim_end().len())
}

/// End of an existing start-date annotation anywhere in the line
fn start_date_end(line: &str, settings: &Settings) -> Option<usize> {
    patterns::start_dates(settings)
        .iter()
        .find_map(|re| re.find(line))
        .map(|m| m.end())
}

/// Scan from `start` to the end of task content, one code point at a time
fn scan_content_end(line: &str, start: usize) -> usize {
    let rest = &line[start..];
    let mut content_end = start;
    let mut link_depth = 0usize;
    let mut previous: Option<char> = None;
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        let tail = &rest[i..];

        if tail.starts_with("[[") {
            link_depth += 1;
            chars.next();
            content_end = start + i + 2;
            previous = Some('[');
            continue;
        }
        if link_depth > 0 && tail.starts_with("]]") {
            link_depth -= 1;
            chars.next();
            content_end = start + i + 2;
            previous = Some(']');
            continue;
        }
        if link_depth > 0 {
            content_end = start + i + c.len_utf8();
            previous = Some(c);
            continue;
        }

        if c == '[' && DATAVIEW_FIELD_OPENER_RE.is_match(&tail[1..]) {
            break;
        }
        if c == '#'
            && previous.is_none_or(|p| p == ' ' || p == '\t')
            && TAG_BODY_RE.is_match(&tail[1..])
        {
            break;
        }
        if starts_with_dated_marker(tail) {
            break;
        }

        content_end = start + i + c.len_utf8();
        previous = Some(c);
    }

    content_end
}

fn starts_with_dated_marker(text: &str) -> bool {
    DATE_MARKER_EMOJI.iter().any(|marker| {
        text.strip_prefix(marker)
            .is_some_and(|after| DATE_AFTER_MARKER_RE.is_match(after))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataFormat;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.auto_date_manager.enabled = true;
        settings
    }

    fn dataview() -> Settings {
        Settings {
            prefer_metadata_format: MetadataFormat::Dataview,
            ..settings()
        }
    }

    fn before(line: &str, kind: DateKind) -> &str {
        &line[..resolve_insert_position(line, &settings(), kind)]
    }

    fn after(line: &str, kind: DateKind) -> &str {
        &line[resolve_insert_position(line, &settings(), kind)..]
    }

    #[test]
    fn test_cancelled_after_plain_content() {
        let line = "- [ ] test entry";
        let position = resolve_insert_position(line, &settings(), DateKind::Cancelled);
        assert_eq!(position, 16);

        let result = format!("{} ❌2025-09-25{}", &line[..position], &line[position..]);
        assert_eq!(result, "- [ ] test entry ❌2025-09-25");
    }

    #[test]
    fn test_completed_before_block_reference() {
        assert_eq!(
            after("- [ ] Task with block reference ^task-123", DateKind::Completed),
            " ^task-123"
        );
        assert_eq!(
            after("- [ ] Task with block reference ^task-123  ", DateKind::Completed),
            " ^task-123  "
        );
        assert_eq!(
            after("- [ ] Task with reference ^task_123-abc", DateKind::Completed),
            " ^task_123-abc"
        );
        assert_eq!(after("- [ ] Task^no-space", DateKind::Completed), "^no-space");
        assert_eq!(after("- [ ] ^empty-task", DateKind::Completed), " ^empty-task");

        let line = "- [ ] Task with reference ^task-123";
        assert_eq!(
            resolve_insert_position(line, &settings(), DateKind::Completed),
            line.find(" ^task-123").unwrap()
        );
    }

    #[test]
    fn test_completed_at_end_without_reference() {
        let line = "- [ ] Task with ^caret in middle and more text";
        assert_eq!(
            resolve_insert_position(line, &settings(), DateKind::Completed),
            line.len()
        );

        let line = "- [ ] Task #important #urgent [due::2024-01-25]";
        assert_eq!(
            resolve_insert_position(line, &settings(), DateKind::Completed),
            line.len()
        );
    }

    #[test]
    fn test_completed_before_trailing_whitespace() {
        assert_eq!(completed_insert_position("- [ ] Task  "), 10);
        assert_eq!(completed_insert_position("- [ ] Task\t"), 10);
        assert_eq!(
            resolve_insert_position("- [x] Done #tag   ", &settings(), DateKind::Completed),
            15
        );
    }

    #[test]
    fn test_completed_after_existing_metadata() {
        assert_eq!(
            after("- [ ] Task with tags #important #urgent ^task-999", DateKind::Completed),
            " ^task-999"
        );
        assert_eq!(
            after("- [x] Completed task ✅ 2024-01-20 ^task-123", DateKind::Completed),
            " ^task-123"
        );
        assert_eq!(
            after("- [ ] Task [due::2024-01-25] [priority::high] ^complex-123", DateKind::Completed),
            " ^complex-123"
        );
        assert_eq!(
            after("- [ ] Task mentioning [[Some Page]] ^wiki-task", DateKind::Completed),
            " ^wiki-task"
        );
    }

    #[test]
    fn test_start_before_block_reference() {
        let line = "- [ ] Task to start ^task-456";
        assert_eq!(before(line, DateKind::Start), "- [ ] Task to start");
        assert_eq!(after(line, DateKind::Start), " ^task-456");
    }

    #[test]
    fn test_start_before_existing_metadata() {
        assert_eq!(
            before("- [ ] Write docs 📅 2025-10-01 #work", DateKind::Start),
            "- [ ] Write docs"
        );
    }

    #[test]
    fn test_cancelled_after_start_date() {
        let line = "- [ ] Task with start date 🚀 2024-01-15 ^task-789";
        assert_eq!(
            before(line, DateKind::Cancelled),
            "- [ ] Task with start date 🚀 2024-01-15"
        );
        assert_eq!(after(line, DateKind::Cancelled), " ^task-789");
    }

    #[test]
    fn test_cancelled_after_configured_start_marker() {
        let mut settings = settings();
        settings.auto_date_manager.start_date_marker = "🛫".to_string();
        let line = "- [ ] Task 🛫 2025-04-20 ^block-id";
        let position = resolve_insert_position(line, &settings, DateKind::Cancelled);
        assert_eq!(&line[..position], "- [ ] Task 🛫 2025-04-20");
        assert_eq!(&line[position..], " ^block-id");
    }

    #[test]
    fn test_cancelled_falls_back_to_common_start_emoji() {
        let mut settings = settings();
        settings.auto_date_manager.start_date_marker = "🚀".to_string();
        let line = "- [ ] Task 🛫 2025-04-20 #tag";
        let position = resolve_insert_position(line, &settings, DateKind::Cancelled);
        assert_eq!(&line[..position], "- [ ] Task 🛫 2025-04-20");
    }

    #[test]
    fn test_cancelled_before_tags_and_fields() {
        let line = "- [ ] Important task #urgent #priority";
        assert_eq!(before(line, DateKind::Cancelled), "- [ ] Important task");
        assert_eq!(after(line, DateKind::Cancelled), " #urgent #priority");

        let line = "- [ ] Task content [due:: 2025-10-01]";
        assert_eq!(before(line, DateKind::Cancelled), "- [ ] Task content");
        assert_eq!(after(line, DateKind::Cancelled), " [due:: 2025-10-01]");

        let line = "- [ ] Task content #tag1 [due:: 2025-10-01] #tag2";
        assert_eq!(before(line, DateKind::Cancelled), "- [ ] Task content");
    }

    #[test]
    fn test_links_are_content() {
        for line in [
            "- [ ] Check [[Project Notes]] for details",
            "- [ ] Read [[Books/[[Nested]] Guide]]",
            "- [ ] See [[Page #heading]]",
            "- [ ] See [[Log [when::now] ✅ 2024-01-01]]",
        ] {
            assert_eq!(before(line, DateKind::Cancelled), line);
        }
    }

    #[test]
    fn test_content_with_special_characters() {
        for line in [
            "- [ ] Visit https://example.com/#section",
            "- [ ] Check site.com/#anchor#section#part",
            "- [ ] Fix the 🚀 rocket launch code",
            "- [ ] Use array[0] or dict[key] in code",
            "- [ ] Check [this link](https://example.com)",
        ] {
            assert_eq!(before(line, DateKind::Cancelled), line);
        }
    }

    #[test]
    fn test_empty_tasks() {
        assert_eq!(resolve_insert_position("- [ ] ", &settings(), DateKind::Cancelled), 6);
        assert_eq!(resolve_insert_position("- [ ]    ", &settings(), DateKind::Cancelled), 6);
    }

    #[test]
    fn test_dataview_positions() {
        let line = "- [ ] Task with dataview format ^dataview-123";
        let position = resolve_insert_position(line, &dataview(), DateKind::Completed);
        assert_eq!(&line[position..], " ^dataview-123");

        let line = "- [ ] Task [start::2024-01-15] ^dataview-456";
        let position = resolve_insert_position(line, &dataview(), DateKind::Cancelled);
        assert_eq!(&line[..position], "- [ ] Task [start::2024-01-15]");
        assert_eq!(&line[position..], " ^dataview-456");

        let line = "- [ ] Task content [due:: 2025-10-01]";
        let position = resolve_insert_position(line, &dataview(), DateKind::Completed);
        assert_eq!(position, line.len());
    }

    #[test]
    fn test_never_past_block_reference() {
        let lines = [
            "- [ ] ^only",
            "- [ ] Task 🚀 2024-01-01 ^ref",
            "- [ ] Task [start::2024-01-01] #tag ^ref",
            "- [ ] [[Link]] ^ref  ",
            "- [/] Task [[a]] ✅ 2024-01-01 ❌ 2024-01-02 ^x_y-z",
        ];
        for line in lines {
            let reference = BlockReference::detect(line).unwrap();
            for settings in [settings(), dataview()] {
                for kind in [DateKind::Start, DateKind::Completed, DateKind::Cancelled] {
                    let position = resolve_insert_position(line, &settings, kind);
                    assert!(
                        position <= reference.start,
                        "{kind} offset {position} past reference in {line:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_task_line() {
        assert_eq!(
            resolve_insert_position("plain text ^ref", &settings(), DateKind::Start),
            10
        );
        assert_eq!(
            resolve_insert_position("plain text", &settings(), DateKind::Start),
            10
        );
    }
}
