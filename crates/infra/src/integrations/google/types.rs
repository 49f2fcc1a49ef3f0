//! Wire shapes of the Google endpoints that do not map one-to-one onto the
//! domain's provider records.

use std::collections::HashMap;

use calsift_domain::{CalendarBusy, FreeBusyResponse, ProviderBusySpan, ProviderEvent};
use serde::{Deserialize, Serialize};

/// `POST /freeBusy` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBusyRequest<'a> {
    pub time_min: &'a str,
    pub time_max: &'a str,
    pub items: Vec<FreeBusyRequestItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FreeBusyRequestItem<'a> {
    pub id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoogleFreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, GoogleCalendarBusy>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoogleCalendarBusy {
    #[serde(default)]
    pub busy: Vec<ProviderBusySpan>,
    #[serde(default)]
    pub errors: Vec<GoogleFreeBusyError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoogleFreeBusyError {
    pub domain: Option<String>,
    pub reason: Option<String>,
}

impl GoogleFreeBusyResponse {
    /// Reorder the keyed answer into request order. Calendars the provider
    /// left out are reported with no busy time; repeated ids appear once.
    pub fn into_domain(mut self, requested: &[String]) -> FreeBusyResponse {
        let mut calendars = Vec::with_capacity(requested.len());

        for calendar_id in requested {
            let Some(entry) = self.calendars.remove(calendar_id) else {
                continue;
            };

            let errors = entry
                .errors
                .into_iter()
                .map(|error| {
                    error.reason.or(error.domain).unwrap_or_else(|| "unknown".to_string())
                })
                .collect();

            calendars.push(CalendarBusy {
                calendar_id: calendar_id.clone(),
                busy: entry.busy,
                errors,
            });
        }

        FreeBusyResponse { calendars }
    }
}

/// `GET /calendars/{id}/events` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventsResponse {
    #[serde(default)]
    pub items: Vec<ProviderEvent>,
    pub next_page_token: Option<String>,
}
