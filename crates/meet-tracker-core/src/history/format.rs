use crate::Timestamp;

use chrono::TimeZone;

/// Compact attended-time label: `1h 5m`, `4m 12s` or `37s`.
pub fn format_duration(seconds: u64) -> String {
    if seconds >= 3600 {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        return format!("{}h {}m", hours, minutes);
    }

    if seconds >= 60 {
        return format!("{}m {}s", seconds / 60, seconds % 60);
    }

    format!("{}s", seconds)
}

/// 12-hour clock label in `tz`, e.g. `10:30 AM`.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_clock_time<Tz>(timestamp: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .to_datetime()
        .map(|utc| utc.with_timezone(tz).format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// `start - end`, or just `start` when there is no distinct end.
pub fn format_time_range<Tz>(start: Timestamp, end: Option<Timestamp>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let start_label = format_clock_time(start, tz);

    match end.map(|end| format_clock_time(end, tz)) {
        Some(end_label) if !end_label.is_empty() && end_label != start_label => {
            format!("{} - {}", start_label, end_label)
        }
        _ => start_label,
    }
}
