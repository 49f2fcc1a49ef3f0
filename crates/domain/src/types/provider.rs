//! Provider-shaped records passed from the gateway port into the core
//!
//! Every field the provider might omit is optional here. Deciding what a
//! missing field means (skip the record, fall back to an all-day date, ...)
//! is the core's job, not the transport's.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Short-lived bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a refresh-token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub token: AccessToken,
    /// Lifetime advertised by the provider, in seconds.
    pub expires_in: Option<u64>,
}

/// `start` / `end` of an event: timed or all-day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
}

impl ProviderEventTime {
    pub fn timed(value: impl Into<String>) -> Self {
        Self { date_time: Some(value.into()), date: None }
    }

    pub fn all_day(value: impl Into<String>) -> Self {
        Self { date_time: None, date: Some(value.into()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAttendee {
    pub email: Option<String>,
    /// Provider flag marking the authenticated account.
    #[serde(rename = "self", default)]
    pub is_self: bool,
    #[serde(default)]
    pub organizer: bool,
    pub response_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOrganizer {
    pub email: Option<String>,
    #[serde(rename = "self", default)]
    pub is_self: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEvent {
    #[serde(default)]
    pub id: String,
    pub summary: Option<String>,
    pub status: Option<String>,
    pub transparency: Option<String>,
    pub start: Option<ProviderEventTime>,
    pub end: Option<ProviderEventTime>,
    #[serde(default)]
    pub attendees: Vec<ProviderAttendee>,
    pub organizer: Option<ProviderOrganizer>,
}

/// One page of the events-list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsPage {
    pub items: Vec<ProviderEvent>,
    pub next_page_token: Option<String>,
}

/// Raw busy span as reported by the aggregate free/busy endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderBusySpan {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Free/busy answer for one requested calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarBusy {
    pub calendar_id: String,
    pub busy: Vec<ProviderBusySpan>,
    /// Provider error reasons (`notFound`, `internalError`, ...).
    pub errors: Vec<String>,
}

/// Free/busy answer, in the order the calendars were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeBusyResponse {
    pub calendars: Vec<CalendarBusy>,
}
