//! Timestamp utilities
//!
//! Show times and creation stamps are wall-clock values with whole-second
//! precision. "Now" is the server's local wall-clock time.

use chrono::{Local, NaiveDateTime, Timelike};

/// Fixed-width format used for show times in listings and in storage
pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input formats accepted for a submitted show start time, tried in order
const ACCEPTED_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Display style for the `datetime` template filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    /// `Friday October 16, 2026 at 8:00PM`
    Full,
    /// `Fri 10, 16, 2026 8:00PM`
    Medium,
}

impl DisplayStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "full" => DisplayStyle::Full,
            _ => DisplayStyle::Medium,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            DisplayStyle::Full => "%A %B %-d, %Y at %-I:%M%p",
            DisplayStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

/// Current local wall-clock time, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

/// Drop any sub-second component
pub fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_show_time(ts: &NaiveDateTime) -> String {
    ts.format(SHOW_TIME_FORMAT).to_string()
}

/// Parse a submitted start time; accepts the fixed-width form and the
/// `datetime-local` browser forms with or without seconds
pub fn parse_show_time(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    ACCEPTED_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(truncate_to_seconds)
}

/// Render a stored show time for display. Unparseable input comes back unchanged.
pub fn display(input: &str, style: DisplayStyle) -> String {
    match parse_show_time(input) {
        Some(ts) => ts.format(style.pattern()).to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_now_has_no_subsecond_component() {
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn test_format_is_fixed_width() {
        assert_eq!(format_show_time(&sample()), "2026-10-16 20:00:00");
    }

    #[test]
    fn test_parse_accepts_browser_forms() {
        assert_eq!(parse_show_time("2026-10-16 20:00:00"), Some(sample()));
        assert_eq!(parse_show_time("2026-10-16T20:00"), Some(sample()));
        assert_eq!(parse_show_time(" 2026-10-16 20:00 "), Some(sample()));
        assert_eq!(parse_show_time("next friday"), None);
    }

    #[test]
    fn test_display_styles() {
        assert_eq!(
            display("2026-10-16 20:00:00", DisplayStyle::Full),
            "Friday October 16, 2026 at 8:00PM"
        );
        assert_eq!(
            display("2026-10-16 20:00:00", DisplayStyle::Medium),
            "Fri 10, 16, 2026 8:00PM"
        );
    }

    #[test]
    fn test_display_passes_through_garbage() {
        assert_eq!(display("tbd", DisplayStyle::Full), "tbd");
    }
}
