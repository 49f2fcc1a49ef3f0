//! Window partitioner
//!
//! Splits an arbitrary range into sub-ranges the provider accepts. The
//! aggregate free/busy endpoint rejects ranges longer than
//! [`DEFAULT_MAX_WINDOW_DAYS`](calsift_domain::constants::DEFAULT_MAX_WINDOW_DAYS).

use calsift_domain::time::{parse_instant, to_iso};
use calsift_domain::TimeWindow;
use chrono::Duration;

/// Partition `[start_iso, end_iso)` into contiguous windows of at most
/// `max_window_days` whole days.
///
/// Unparseable bounds, or `end <= start`, produce a single window carrying
/// the raw input unchanged so the next layer can report on it.
pub fn partition_window(start_iso: &str, end_iso: &str, max_window_days: f64) -> Vec<TimeWindow> {
    let (start, end) = match (parse_instant(start_iso), parse_instant(end_iso)) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return vec![TimeWindow::new(start_iso, end_iso)],
    };

    let max_span = Duration::days(whole_days(max_window_days));
    let mut windows = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let boundary = cursor.checked_add_signed(max_span).map_or(end, |next| next.min(end));
        windows.push(TimeWindow::new(to_iso(&cursor), to_iso(&boundary)));
        cursor = boundary;
    }

    windows
}

/// Floor to an integer number of days, at least 1.
fn whole_days(days: f64) -> i64 {
    if !days.is_finite() {
        return 1;
    }
    days.floor().clamp(1.0, f64::from(i32::MAX)) as i64
}
