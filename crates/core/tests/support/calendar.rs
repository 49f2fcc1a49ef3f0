use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use calsift_core::CalendarGateway;
use calsift_domain::time::parse_instant;
use calsift_domain::{
    AccessToken, CalSiftError, CalendarBusy, EventsPage, FreeBusyResponse, ProviderBusySpan,
    ProviderEvent, Result as DomainResult, TimeWindow,
};

/// A request the gateway received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    FreeBusy { token: String, calendar_ids: Vec<String>, window: TimeWindow },
    Events { token: String, calendar_id: String, window: TimeWindow, page_token: Option<String> },
}

/// In-memory mock for `CalendarGateway`.
///
/// Answers both endpoints from a seeded set of events per calendar: any event
/// overlapping the requested window is returned, so an event straddling a
/// window boundary is reported by both windows just like the real provider.
/// Free/busy omits cancelled and transparent events; the events listing
/// returns everything and leaves filtering to the caller.
#[derive(Default)]
pub struct FakeCalendarGateway {
    events: HashMap<String, Vec<ProviderEvent>>,
    page_size: Option<usize>,
    repeat_page_token: bool,
    fail_on_call: Option<(usize, CalSiftError)>,
    calls: Mutex<Vec<RecordedCall>>,
    call_count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeCalendarGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one event on `calendar_id`.
    pub fn with_event(mut self, calendar_id: &str, event: ProviderEvent) -> Self {
        self.events.entry(calendar_id.to_string()).or_default().push(event);
        self
    }

    /// Split event listings into pages of `size` items.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    /// Hand back the same `nextPageToken` forever.
    pub fn with_repeating_page_token(mut self) -> Self {
        self.repeat_page_token = true;
        self
    }

    /// Fail the `call`-th request (1-based) with `error`.
    pub fn failing_on_call(mut self, call: usize, error: CalSiftError) -> Self {
        self.fail_on_call = Some((call, error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn free_busy_calls(&self) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|call| matches!(call, RecordedCall::FreeBusy { .. })).collect()
    }

    pub fn events_calls(&self) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|call| matches!(call, RecordedCall::Events { .. })).collect()
    }

    /// Highest number of requests observed in progress at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: RecordedCall) -> DomainResult<()> {
        self.calls.lock().unwrap().push(call);
        let number = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.fail_on_call {
            Some((fail_at, error)) if *fail_at == number => Err(error.clone()),
            _ => Ok(()),
        }
    }

    fn overlapping(&self, calendar_id: &str, window: &TimeWindow) -> Vec<ProviderEvent> {
        let Some((window_start, window_end)) = window.bounds() else {
            return Vec::new();
        };

        self.events
            .get(calendar_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| {
                        let start = event_bound(event.start.as_ref().and_then(|t| t.date_time.as_deref()));
                        let end = event_bound(event.end.as_ref().and_then(|t| t.date_time.as_deref()));
                        match (start, end) {
                            (Some(start), Some(end)) => start < window_end && end > window_start,
                            _ => true,
                        }
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn event_bound(raw: Option<&str>) -> Option<chrono::DateTime<chrono::Utc>> {
    raw.and_then(parse_instant)
}

#[async_trait]
impl CalendarGateway for FakeCalendarGateway {
    async fn query_free_busy(
        &self,
        token: &AccessToken,
        calendar_ids: &[String],
        window: &TimeWindow,
    ) -> DomainResult<FreeBusyResponse> {
        self.enter(RecordedCall::FreeBusy {
            token: token.as_str().to_string(),
            calendar_ids: calendar_ids.to_vec(),
            window: window.clone(),
        })
        .await?;

        let calendars = calendar_ids
            .iter()
            .map(|calendar_id| CalendarBusy {
                calendar_id: calendar_id.clone(),
                busy: self
                    .overlapping(calendar_id, window)
                    .into_iter()
                    .filter(|event| event.status.as_deref() != Some("cancelled"))
                    .filter(|event| event.transparency.as_deref() != Some("transparent"))
                    .map(|event| ProviderBusySpan {
                        start: event.start.and_then(|t| t.date_time),
                        end: event.end.and_then(|t| t.date_time),
                    })
                    .collect(),
                errors: Vec::new(),
            })
            .collect();

        Ok(FreeBusyResponse { calendars })
    }

    async fn list_events_page(
        &self,
        token: &AccessToken,
        calendar_id: &str,
        window: &TimeWindow,
        page_token: Option<&str>,
    ) -> DomainResult<EventsPage> {
        self.enter(RecordedCall::Events {
            token: token.as_str().to_string(),
            calendar_id: calendar_id.to_string(),
            window: window.clone(),
            page_token: page_token.map(str::to_string),
        })
        .await?;

        let items = self.overlapping(calendar_id, window);

        if self.repeat_page_token {
            return Ok(EventsPage { items, next_page_token: Some("stuck".into()) });
        }

        let Some(size) = self.page_size else {
            return Ok(EventsPage { items, next_page_token: None });
        };

        let page: usize = page_token.and_then(|t| t.strip_prefix("page-")).and_then(|n| n.parse().ok()).unwrap_or(0);
        let offset = page * size;
        let chunk: Vec<_> = items.iter().skip(offset).take(size).cloned().collect();
        let next_page_token = (offset + size < items.len()).then(|| format!("page-{}", page + 1));

        Ok(EventsPage { items: chunk, next_page_token })
    }
}
