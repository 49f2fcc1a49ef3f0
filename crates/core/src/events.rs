//! Event fetcher
//!
//! Pages through the events-list endpoint for one calendar and window,
//! drops events that do not occupy time, and routes the rest through the
//! ownership classifier.

use std::collections::HashSet;

use calsift_domain::time::{parse_all_day, parse_instant};
use calsift_domain::{
    AccessToken, BusyInterval, ClientMeeting, ProviderEvent, ProviderEventTime, Result,
    TimeWindow, WindowEvents,
};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use crate::classifier::ClientIdentity;
use crate::ports::CalendarGateway;

/// Retrieve and classify every event of `calendar_id` overlapping `window`.
///
/// Output is in provider order and not deduplicated; the aggregator does
/// both once every window has been fetched.
#[instrument(skip(gateway, token, identity), fields(window_start = %window.start_iso, window_end = %window.end_iso))]
pub async fn fetch_window_events(
    gateway: &dyn CalendarGateway,
    token: &AccessToken,
    calendar_id: &str,
    window: &TimeWindow,
    identity: &ClientIdentity,
) -> Result<WindowEvents> {
    let mut out = WindowEvents::default();
    let mut seen_tokens = HashSet::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;
    let mut skipped = 0usize;

    loop {
        let page =
            gateway.list_events_page(token, calendar_id, window, page_token.as_deref()).await?;
        pages += 1;

        for event in page.items {
            if !classify_event(event, calendar_id, identity, &mut out) {
                skipped += 1;
            }
        }

        match page.next_page_token {
            Some(next) if seen_tokens.insert(next.clone()) => page_token = Some(next),
            Some(repeated) => {
                warn!(calendar_id, page_token = %repeated, "provider repeated a page token; stopping pagination");
                break;
            }
            None => break,
        }
    }

    debug!(
        calendar_id,
        pages,
        skipped,
        client_meetings = out.client_meetings.len(),
        busy = out.non_client_busy_intervals.len(),
        "fetched window events"
    );

    Ok(out)
}

/// Route one provider event into `out`. Returns `false` when it was dropped.
pub fn classify_event(
    event: ProviderEvent,
    calendar_id: &str,
    identity: &ClientIdentity,
    out: &mut WindowEvents,
) -> bool {
    if !occupies_time(&event) {
        return false;
    }

    let Some((start, end)) = normalized_span(&event) else {
        return false;
    };

    if identity.owns(&event) {
        let advisor_response_status = identity.advisor_response_status(&event);
        out.client_meetings.push(ClientMeeting {
            event_id: event.id,
            calendar_id: calendar_id.to_string(),
            start,
            end,
            title: event.summary.unwrap_or_default(),
            advisor_response_status,
        });
    } else {
        out.non_client_busy_intervals.push(BusyInterval::new(start, end, calendar_id));
    }

    true
}

/// Cancelled events and events marked transparent do not block time.
pub fn occupies_time(event: &ProviderEvent) -> bool {
    let cancelled = event.status.as_deref() == Some("cancelled");
    let transparent = event.transparency.as_deref() == Some("transparent");
    !cancelled && !transparent
}

/// Start and end as UTC instants, with `end` strictly after `start`.
pub fn normalized_span(event: &ProviderEvent) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = event.start.as_ref().and_then(resolve_instant)?;
    let end = event.end.as_ref().and_then(resolve_instant)?;
    (end > start).then_some((start, end))
}

/// Timed value first, then the all-day date at midnight UTC.
fn resolve_instant(time: &ProviderEventTime) -> Option<DateTime<Utc>> {
    time.date_time
        .as_deref()
        .and_then(parse_instant)
        .or_else(|| time.date.as_deref().and_then(parse_all_day))
}
