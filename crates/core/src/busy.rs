//! Busy-interval fetcher
//!
//! Maps the aggregate free/busy answer for one window into flat, tagged
//! intervals.

use calsift_domain::time::parse_instant;
use calsift_domain::{AccessToken, BusyInterval, FreeBusyResponse, Result, TimeWindow};
use tracing::{debug, instrument, warn};

use crate::ports::CalendarGateway;

/// Query free/busy for every calendar in `calendar_ids` over one window.
///
/// Busy spans missing a bound, or whose bounds do not parse, are dropped.
#[instrument(skip(gateway, token, calendar_ids), fields(window_start = %window.start_iso, window_end = %window.end_iso))]
pub async fn fetch_busy_intervals(
    gateway: &dyn CalendarGateway,
    token: &AccessToken,
    calendar_ids: &[String],
    window: &TimeWindow,
) -> Result<Vec<BusyInterval>> {
    let response = gateway.query_free_busy(token, calendar_ids, window).await?;
    Ok(busy_intervals_from_response(response))
}

/// Flatten a free/busy answer, ordered by start.
pub fn busy_intervals_from_response(response: FreeBusyResponse) -> Vec<BusyInterval> {
    let mut intervals = Vec::new();
    let mut skipped = 0usize;

    for calendar in response.calendars {
        if !calendar.errors.is_empty() {
            warn!(
                calendar_id = %calendar.calendar_id,
                errors = ?calendar.errors,
                "provider reported free/busy errors for calendar"
            );
        }

        for span in calendar.busy {
            let bounds = span
                .start
                .as_deref()
                .and_then(parse_instant)
                .zip(span.end.as_deref().and_then(parse_instant));

            match bounds {
                Some((start, end)) => {
                    intervals.push(BusyInterval::new(start, end, calendar.calendar_id.clone()))
                }
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = intervals.len(), "dropped malformed busy entries");
    }

    intervals.sort_by_key(|interval| interval.start);
    intervals
}
