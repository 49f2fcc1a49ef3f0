//! Resolution results: windows, busy intervals and client meetings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_status_conversions;
use crate::time::parse_instant;

/// Half-open query range `[start, end)` handed to the provider.
///
/// Partitioned windows hold canonical UTC strings. The degenerate fallback
/// window keeps whatever the caller supplied so the provider can report on
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_iso: String,
    pub end_iso: String,
}

impl TimeWindow {
    pub fn new(start_iso: impl Into<String>, end_iso: impl Into<String>) -> Self {
        Self { start_iso: start_iso.into(), end_iso: end_iso.into() }
    }

    /// Parsed bounds, or `None` when either side is not an absolute instant.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((parse_instant(&self.start_iso)?, parse_instant(&self.end_iso)?))
    }
}

/// Time during which a calendar is occupied, without event identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    #[serde(rename = "startIso")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endIso")]
    pub end: DateTime<Utc>,
    pub calendar_id: String,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, calendar_id: impl Into<String>) -> Self {
        Self { start, end, calendar_id: calendar_id.into() }
    }

    /// Deduplication key: `(start, end, calendar_id)`.
    pub fn dedup_key(&self) -> (DateTime<Utc>, DateTime<Utc>, String) {
        (self.start, self.end, self.calendar_id.clone())
    }
}

/// Advisor's answer to a client meeting invitation.
///
/// Only `accepted` is distinguished; every other provider status, or no
/// status at all, is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorResponseStatus {
    Accepted,
    #[default]
    Pending,
}

impl_status_conversions!(AdvisorResponseStatus {
    Accepted => "accepted",
    Pending => "pending",
});

impl AdvisorResponseStatus {
    /// Collapse a raw provider status (`accepted`, `needsAction`,
    /// `tentative`, `declined`, ...) to the binary form.
    pub fn from_provider(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("accepted") {
            Self::Accepted
        } else {
            Self::Pending
        }
    }
}

/// Calendar event attributed to the client contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMeeting {
    pub event_id: String,
    pub calendar_id: String,
    #[serde(rename = "startIso")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endIso")]
    pub end: DateTime<Utc>,
    pub title: String,
    pub advisor_response_status: AdvisorResponseStatus,
}

impl ClientMeeting {
    /// Deduplication key: `(event_id, start, end, calendar_id)`.
    pub fn dedup_key(&self) -> (String, DateTime<Utc>, DateTime<Utc>, String) {
        (self.event_id.clone(), self.start, self.end, self.calendar_id.clone())
    }
}

/// Outcome of a client-meeting lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub client_meetings: Vec<ClientMeeting>,
    pub non_client_busy_intervals: Vec<BusyInterval>,
}

/// Unaggregated output of one `(window, calendar)` events fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowEvents {
    pub client_meetings: Vec<ClientMeeting>,
    pub non_client_busy_intervals: Vec<BusyInterval>,
}
