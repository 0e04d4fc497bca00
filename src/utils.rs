//! Small formatting helpers shared by the knowledge views

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Fallback label for records that carry no name, title or source.
pub const UNTITLED_LABEL: &str = "Untitled document";

/// Strip the extension from a raw file name.
///
/// Removes everything from the last `.` onward, but only when the dot sits
/// after position 0 — dotfiles like `.env` keep their full name, and names
/// without a dot pass through unchanged.
pub fn display_name(raw: &str) -> &str {
    match raw.rfind('.') {
        Some(idx) if idx > 0 => &raw[..idx],
        _ => raw,
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_string_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format a raw timestamp string from the backend.
///
/// The backend emits RFC 3339 with varying fraction precision; anything we
/// cannot parse is passed through unchanged rather than dropped, so the UI
/// still shows something.
pub fn format_record_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return format_string_date(parsed.with_timezone(&Utc));
    }
    // Naive "2024-01-02 15:04:05" style without an offset
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_strips_last_extension() {
        assert_eq!(display_name("report.pdf"), "report");
        assert_eq!(display_name("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_display_name_keeps_dotfiles() {
        assert_eq!(display_name(".env"), ".env");
    }

    #[test]
    fn test_display_name_without_dot() {
        assert_eq!(display_name("README"), "README");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_format_record_date_rfc3339() {
        let formatted = format_record_date("2024-03-05T08:30:00Z");
        assert_eq!(formatted.len(), 19);
        assert!(formatted.starts_with("2024-03-0"));
    }

    #[test]
    fn test_format_record_date_passthrough() {
        assert_eq!(format_record_date("yesterday"), "yesterday");
        assert_eq!(format_record_date(""), "");
    }

    #[test]
    fn test_format_record_date_naive() {
        assert_eq!(
            format_record_date("2024-01-02 15:04:05"),
            "2024-01-02 15:04:05"
        );
    }
}
