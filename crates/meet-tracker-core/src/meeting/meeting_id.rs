use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Meet URLs carry a `xxx-xxxx-xxx` code right after the host.
static MEET_URL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"meet\.google\.com/([a-z]{3}-[a-z]{4}-[a-z]{3})").ok());

/// Extract the meeting code from a Meet URL.
///
/// Returns `None` for URLs that are not a joinable meeting page.
pub fn meeting_code_from_url(url: &str) -> Option<&str> {
    let regex = MEET_URL.as_ref()?;
    regex
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str())
}

/// Build the record id for a meeting code on a given day.
///
/// Meeting codes are reused across days, so the date stamp (`MMDDYY`) is
/// part of the identity.
pub fn derive_meeting_id(code: &str, date: NaiveDate) -> String {
    format!("{}-{}", code, date.format("%m%d%y"))
}

/// Long-form label used for the record's `date` field, e.g. `Wednesday, April 17`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
