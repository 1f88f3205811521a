mod format;
mod history_view;

pub use {
    format::{format_clock_time, format_duration, format_time_range},
    history_view::{DateGroup, HistoryEntry, HistoryView},
};
