//! Shared test helpers for `calsift-core` integration tests.
//!
//! In-memory doubles for the provider ports so resolver tests can focus on
//! behaviour instead of HTTP plumbing.

#![allow(dead_code)]

pub mod calendar;
pub mod tokens;

use calsift_domain::{
    OAuthConfig, ProviderAttendee, ProviderEvent, ProviderEventTime, ProviderOrganizer,
};

/// Credentials for tests; `calendar_ids` empty means `["primary"]`.
pub fn oauth(calendar_ids: &[&str]) -> OAuthConfig {
    OAuthConfig::new(
        "client-id",
        "client-secret",
        "refresh-token",
        calendar_ids.iter().map(|id| id.to_string()).collect(),
    )
    .unwrap()
}

/// Timed event with the advisor as accepted self attendee.
pub fn event(id: &str, start: &str, end: &str) -> ProviderEvent {
    ProviderEvent {
        id: id.into(),
        summary: Some(format!("Event {id}")),
        status: Some("confirmed".into()),
        start: Some(ProviderEventTime::timed(start)),
        end: Some(ProviderEventTime::timed(end)),
        attendees: vec![attendee("advisor@firm.com", true, Some("accepted"))],
        ..Default::default()
    }
}

pub fn attendee(email: &str, is_self: bool, status: Option<&str>) -> ProviderAttendee {
    ProviderAttendee {
        email: Some(email.into()),
        is_self,
        organizer: false,
        response_status: status.map(str::to_string),
    }
}

pub fn organizer(email: &str, is_self: bool) -> Option<ProviderOrganizer> {
    Some(ProviderOrganizer { email: Some(email.into()), is_self })
}
