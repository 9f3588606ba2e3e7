//! Date annotation patterns, built per call from the current settings

use crate::models::{DATE_VALUE_PATTERN, DateKind};
use crate::settings::Settings;
use regex::Regex;

/// Emoji that introduce a date in emoji-format metadata
pub const DATE_MARKER_EMOJI: [&str; 8] = ["📅", "🚀", "✅", "❌", "🛫", "▶️", "⏰", "🏁"];

/// Emoji commonly used for start dates, tried when the configured start
/// marker is not present in a line
pub const COMMON_START_EMOJI: [&str; 5] = ["🚀", "🛫", "▶️", "⏰", "🏁"];

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Skipping invalid date pattern {:?}: {}", pattern, e);
            None
        }
    }
}

fn emoji_date_pattern(marker: &str) -> String {
    format!(r"{}\s*{}", regex::escape(marker), DATE_VALUE_PATTERN)
}

fn dataview_date_pattern(field: &str) -> String {
    format!(r"\[{}::\s*{}\]", regex::escape(field), DATE_VALUE_PATTERN)
}

fn annotation_pattern(kind: DateKind, settings: &Settings) -> String {
    if settings.uses_dataview() {
        dataview_date_pattern(kind.dataview_field())
    } else {
        emoji_date_pattern(settings.auto_date_manager.marker(kind))
    }
}

/// Matches an existing annotation of `kind` in the configured format
pub fn existing_date(kind: DateKind, settings: &Settings) -> Option<Regex> {
    compile(&annotation_pattern(kind, settings))
}

/// Matches an annotation of `kind` together with the whitespace before it,
/// so removing a match leaves no gap behind
pub fn removable_date(kind: DateKind, settings: &Settings) -> Option<Regex> {
    compile(&format!(r"\s*{}", annotation_pattern(kind, settings)))
}

/// Start-date patterns in lookup order: the configured marker first, then
/// the common start emoji. Dataview lines carry a single `[start::…]` field.
pub fn start_dates(settings: &Settings) -> Vec<Regex> {
    if settings.uses_dataview() {
        return compile(r"\[start::[^\]]*\]").into_iter().collect();
    }

    let configured = settings.auto_date_manager.marker(DateKind::Start);
    std::iter::once(configured)
        .chain(COMMON_START_EMOJI)
        .filter_map(|marker| compile(&emoji_date_pattern(marker)))
        .collect()
}

/// Annotation text for a new date, including the separating space
pub fn annotation(kind: DateKind, date: &str, settings: &Settings) -> String {
    if settings.uses_dataview() {
        format!(" [{}::{}]", kind.dataview_field(), date)
    } else {
        format!(" {} {}", settings.auto_date_manager.marker(kind), date)
    }
}
