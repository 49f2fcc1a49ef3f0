//! Google Calendar integration
//!
//! Implements [`TokenSource`](calsift_core::TokenSource) and
//! [`CalendarGateway`](calsift_core::CalendarGateway) against the OAuth token
//! endpoint and Calendar API v3.

pub mod client;
pub mod types;

use calsift_domain::constants::{GOOGLE_CALENDAR_API_BASE, GOOGLE_TOKEN_ENDPOINT};
use serde::{Deserialize, Serialize};

pub use client::GoogleCalendarClient;

/// Where the Google calls are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleEndpoints {
    /// OAuth token endpoint (refresh-token grant).
    pub token_url: String,
    /// Calendar API root, without a trailing slash.
    pub api_base: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            token_url: GOOGLE_TOKEN_ENDPOINT.to_string(),
            api_base: GOOGLE_CALENDAR_API_BASE.to_string(),
        }
    }
}

impl GoogleEndpoints {
    /// Both endpoints under one origin, laid out like Google's
    /// (`{origin}/token` and `{origin}/calendar/v3`).
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            token_url: format!("{origin}/token"),
            api_base: format!("{origin}/calendar/v3"),
        }
    }

    pub(crate) fn free_busy_url(&self) -> String {
        format!("{}/freeBusy", self.api_base.trim_end_matches('/'))
    }

    pub(crate) fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(calendar_id)
        )
    }
}
