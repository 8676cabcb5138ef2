use chrono::DateTime;

/// Medium date with short time, e.g. `Jun 20, 2018 2:05 PM`.
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Trims surrounding whitespace and splits into lines for display.
///
/// Blank text yields no lines; interior blank lines are kept as paragraph breaks.
pub fn display_lines(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(ToOwned::to_owned).collect()
}

/// Formats an RFC 3339 timestamp in its own UTC offset.
/// Anything that does not parse is shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(parsed) => parsed.format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}
