//! Aggregator
//!
//! Drives a full resolution: one token exchange, partition the range, fan
//! out over windows (and calendars), then deduplicate and order the merged
//! output.

use std::collections::HashSet;
use std::sync::Arc;

use calsift_domain::{
    AccessToken, AvailabilityQuery, BusyInterval, ClientMeeting, ClientMeetingQuery, LookupResult,
    OAuthConfig, ResolverSettings, Result, TimeWindow,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument};

use crate::busy::fetch_busy_intervals;
use crate::classifier::ClientIdentity;
use crate::events::fetch_window_events;
use crate::partition::partition_window;
use crate::ports::{CalendarGateway, TokenSource};

/// Availability and client-meeting resolution over the provider ports.
pub struct AvailabilityResolver {
    tokens: Arc<dyn TokenSource>,
    gateway: Arc<dyn CalendarGateway>,
    settings: ResolverSettings,
}

impl AvailabilityResolver {
    pub fn new(tokens: Arc<dyn TokenSource>, gateway: Arc<dyn CalendarGateway>) -> Self {
        Self { tokens, gateway, settings: ResolverSettings::default() }
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Busy intervals across every configured calendar, one aggregate
    /// free/busy call per window.
    ///
    /// # Errors
    /// The first token or query failure aborts the whole resolution.
    #[instrument(skip(self, query), fields(window_start = %query.window_start_iso, window_end = %query.window_end_iso))]
    pub async fn resolve_busy_intervals(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<Vec<BusyInterval>> {
        let token = self.access_token(&query.oauth).await?;
        let windows = self.partition(
            &query.window_start_iso,
            &query.window_end_iso,
            query.max_window_days,
        );

        let gateway = self.gateway.as_ref();
        let token = &token;
        let calendar_ids = query.oauth.calendar_ids();

        let per_window: Vec<Vec<BusyInterval>> = stream::iter(windows.iter())
            .map(move |window| fetch_busy_intervals(gateway, token, calendar_ids, window))
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        let intervals = merge_busy_intervals(per_window.into_iter().flatten());
        info!(
            windows = windows.len(),
            calendars = calendar_ids.len(),
            busy = intervals.len(),
            "resolved busy intervals"
        );
        Ok(intervals)
    }

    /// Client meetings and remaining busy time, one events listing per
    /// `(window, calendar)` pair.
    ///
    /// # Errors
    /// The first token or query failure aborts the whole resolution.
    #[instrument(skip(self, query), fields(window_start = %query.window_start_iso, window_end = %query.window_end_iso))]
    pub async fn resolve_client_meetings(&self, query: &ClientMeetingQuery) -> Result<LookupResult> {
        let token = self.access_token(&query.oauth).await?;
        let windows = self.partition(
            &query.window_start_iso,
            &query.window_end_iso,
            query.max_window_days,
        );
        let identity = ClientIdentity::new(&query.client_email, query.advisor_email_hint.as_deref());

        let calendar_ids = query.oauth.calendar_ids();
        let jobs: Vec<(&TimeWindow, &str)> = windows
            .iter()
            .flat_map(|window| calendar_ids.iter().map(move |id| (window, id.as_str())))
            .collect();
        let job_count = jobs.len();

        let gateway = self.gateway.as_ref();
        let token = &token;
        let identity = &identity;

        let per_job: Vec<_> = stream::iter(jobs)
            .map(move |(window, calendar_id)| {
                fetch_window_events(gateway, token, calendar_id, window, identity)
            })
            .buffered(self.concurrency())
            .try_collect()
            .await?;

        let mut meetings = Vec::new();
        let mut busy = Vec::new();
        for events in per_job {
            meetings.extend(events.client_meetings);
            busy.extend(events.non_client_busy_intervals);
        }

        let result = LookupResult {
            client_meetings: merge_client_meetings(meetings),
            non_client_busy_intervals: merge_busy_intervals(busy),
        };
        info!(
            fetches = job_count,
            client_meetings = result.client_meetings.len(),
            busy = result.non_client_busy_intervals.len(),
            "resolved client meetings"
        );
        Ok(result)
    }

    async fn access_token(&self, oauth: &OAuthConfig) -> Result<AccessToken> {
        let grant = self.tokens.exchange(oauth).await?;
        debug!(expires_in = ?grant.expires_in, "access token acquired");
        Ok(grant.token)
    }

    fn partition(&self, start_iso: &str, end_iso: &str, override_days: Option<f64>) -> Vec<TimeWindow> {
        let max_days = override_days.unwrap_or(self.settings.max_window_days);
        let windows = partition_window(start_iso, end_iso, max_days);
        debug!(windows = windows.len(), max_days, "partitioned range");
        windows
    }

    fn concurrency(&self) -> usize {
        self.settings.max_concurrent_fetches.max(1)
    }
}

/// Drop repeated `(start, end, calendar_id)` entries, keeping the first,
/// then stable-sort by start.
pub fn merge_busy_intervals(intervals: impl IntoIterator<Item = BusyInterval>) -> Vec<BusyInterval> {
    let mut seen = HashSet::new();
    let mut merged: Vec<_> =
        intervals.into_iter().filter(|interval| seen.insert(interval.dedup_key())).collect();
    merged.sort_by_key(|interval| interval.start);
    merged
}

/// Drop repeated `(event_id, start, end, calendar_id)` entries, keeping the
/// first, then stable-sort by start.
pub fn merge_client_meetings(meetings: impl IntoIterator<Item = ClientMeeting>) -> Vec<ClientMeeting> {
    let mut seen = HashSet::new();
    let mut merged: Vec<_> =
        meetings.into_iter().filter(|meeting| seen.insert(meeting.dedup_key())).collect();
    merged.sort_by_key(|meeting| meeting.start);
    merged
}

#[cfg(test)]
mod tests {
    use calsift_domain::time::parse_instant;
    use calsift_domain::AdvisorResponseStatus;

    use super::*;

    fn busy(start: &str, end: &str, calendar_id: &str) -> BusyInterval {
        BusyInterval::new(parse_instant(start).unwrap(), parse_instant(end).unwrap(), calendar_id)
    }

    fn meeting(id: &str, start: &str, title: &str) -> ClientMeeting {
        let start = parse_instant(start).unwrap();
        ClientMeeting {
            event_id: id.into(),
            calendar_id: "primary".into(),
            start,
            end: start + chrono::Duration::hours(1),
            title: title.into(),
            advisor_response_status: AdvisorResponseStatus::Pending,
        }
    }

    #[test]
    fn busy_merge_dedups_per_calendar_and_sorts() {
        let merged = merge_busy_intervals(vec![
            busy("2026-03-02T15:00:00Z", "2026-03-02T16:00:00Z", "primary"),
            busy("2026-03-01T15:00:00Z", "2026-03-01T16:00:00Z", "primary"),
            busy("2026-03-02T15:00:00Z", "2026-03-02T16:00:00Z", "primary"),
            busy("2026-03-02T15:00:00Z", "2026-03-02T16:00:00Z", "team"),
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].start, parse_instant("2026-03-01T15:00:00Z").unwrap());
        assert_eq!(merged[1].calendar_id, "primary");
        assert_eq!(merged[2].calendar_id, "team");
    }

    #[test]
    fn meeting_merge_keeps_first_occurrence() {
        let merged = merge_client_meetings(vec![
            meeting("evt-1", "2026-03-02T15:00:00Z", "first copy"),
            meeting("evt-0", "2026-03-01T15:00:00Z", "earlier"),
            meeting("evt-1", "2026-03-02T15:00:00Z", "second copy"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].event_id, "evt-0");
        assert_eq!(merged[1].title, "first copy");
    }

    #[test]
    fn same_event_in_another_instance_is_kept() {
        let merged = merge_client_meetings(vec![
            meeting("evt-1", "2026-03-02T15:00:00Z", "week one"),
            meeting("evt-1", "2026-03-09T15:00:00Z", "week two"),
        ]);
        assert_eq!(merged.len(), 2);
    }
}
