//! Text of a single golden record entry and the rule for comparing it.

use crate::config::RecordLimits;

/// Prefix that marks a section header line; the function name follows it.
pub const SECTION_MARKER: &str = "****";

/// Normalize result text for line-oriented storage.
///
/// Surrounding whitespace is trimmed and line breaks are escaped so that one
/// result always occupies exactly one line. A leading [`SECTION_MARKER`] gets
/// a backslash in front so the line cannot be read back as a section header.
pub fn normalize(text: &str) -> String {
    let escaped = text.trim().replace('\r', "\\r").replace('\n', "\\n");
    if escaped.starts_with(SECTION_MARKER) {
        format!("\\{}", escaped)
    } else {
        escaped
    }
}

/// The entry stored for a result: normalized, then cut to `width` characters.
///
/// Trailing whitespace exposed by the cut is trimmed as well, since the reader
/// trims every line it loads.
pub fn record_entry(text: &str, width: usize) -> String {
    let normalized = normalize(text);
    match normalized.char_indices().nth(width) {
        Some((cut, _)) => normalized[..cut].trim_end().to_string(),
        None => normalized,
    }
}

/// Whether a live result text agrees with a recorded entry.
///
/// Entries shorter than `exact_threshold` characters must equal the live
/// text in its stored form. Longer entries may have been truncated, so only
/// the recorded prefix is required.
pub fn entry_matches(recorded: &str, live_text: &str, limits: &RecordLimits) -> bool {
    if recorded.chars().count() < limits.exact_threshold {
        // A cut that lands in whitespace leaves a short entry behind.
        record_entry(live_text, limits.entry_width) == recorded
    } else {
        normalize(live_text).starts_with(recorded)
    }
}

/// Whether a recorded entry reached the entry width and may be truncated.
pub fn is_truncated(recorded: &str, limits: &RecordLimits) -> bool {
    recorded.chars().count() >= limits.entry_width
}
