//! Google Calendar client

use async_trait::async_trait;
use calsift_core::{CalendarGateway, TokenSource};
use calsift_domain::constants::{EVENTS_FIELD_PROJECTION, EVENTS_PAGE_SIZE};
use calsift_domain::{
    AccessGrant, AccessToken, CalSiftError, EventsPage, FreeBusyResponse, OAuthConfig, Result,
    TimeWindow,
};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::types::{
    FreeBusyRequest, FreeBusyRequestItem, GoogleEventsResponse, GoogleFreeBusyResponse,
};
use super::GoogleEndpoints;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Talks to the Google token endpoint and Calendar API v3.
#[derive(Clone)]
pub struct GoogleCalendarClient {
    http: HttpClient,
    endpoints: GoogleEndpoints,
}

impl GoogleCalendarClient {
    pub fn new(http: HttpClient, endpoints: GoogleEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Client with default HTTP settings against the public Google endpoints.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(HttpClient::new()?, GoogleEndpoints::default()))
    }

    pub fn endpoints(&self) -> &GoogleEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl TokenSource for GoogleCalendarClient {
    #[instrument(skip(self, oauth), fields(client_id = %oauth.client_id()))]
    async fn exchange(&self, oauth: &OAuthConfig) -> Result<AccessGrant> {
        let request = self.http.request(Method::POST, &self.endpoints.token_url).form(&[
            ("client_id", oauth.client_id()),
            ("client_secret", oauth.client_secret()),
            ("refresh_token", oauth.refresh_token()),
            ("grant_type", "refresh_token"),
        ]);

        let (status, body) = read_body(self.http.send(request).await?).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "token exchange rejected");
            return Err(CalSiftError::UpstreamAuth { status: status.as_u16(), body });
        }

        let grant = parse_token_body(&body)?;
        debug!(expires_in = ?grant.expires_in, "token exchange succeeded");
        Ok(grant)
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarClient {
    #[instrument(skip(self, token, calendar_ids), fields(calendars = calendar_ids.len(), window_start = %window.start_iso, window_end = %window.end_iso))]
    async fn query_free_busy(
        &self,
        token: &AccessToken,
        calendar_ids: &[String],
        window: &TimeWindow,
    ) -> Result<FreeBusyResponse> {
        let payload = FreeBusyRequest {
            time_min: &window.start_iso,
            time_max: &window.end_iso,
            items: calendar_ids.iter().map(|id| FreeBusyRequestItem { id: id.as_str() }).collect(),
        };

        let request = self
            .http
            .request(Method::POST, self.endpoints.free_busy_url())
            .bearer_auth(token.as_str())
            .json(&payload);

        let (status, body) = read_body(self.http.send(request).await?).await?;
        let parsed: GoogleFreeBusyResponse = parse_query_body(status, body, "free/busy")?;

        Ok(parsed.into_domain(calendar_ids))
    }

    #[instrument(skip(self, token, page_token), fields(window_start = %window.start_iso, window_end = %window.end_iso, paged = page_token.is_some()))]
    async fn list_events_page(
        &self,
        token: &AccessToken,
        calendar_id: &str,
        window: &TimeWindow,
        page_token: Option<&str>,
    ) -> Result<EventsPage> {
        let mut query: Vec<(&str, String)> = vec![
            ("timeMin", window.start_iso.clone()),
            ("timeMax", window.end_iso.clone()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("showDeleted", "false".to_string()),
            ("maxResults", EVENTS_PAGE_SIZE.to_string()),
            ("fields", EVENTS_FIELD_PROJECTION.to_string()),
        ];
        if let Some(page_token) = page_token {
            query.push(("pageToken", page_token.to_string()));
        }

        let request = self
            .http
            .request(Method::GET, self.endpoints.events_url(calendar_id))
            .bearer_auth(token.as_str())
            .query(&query);

        let (status, body) = read_body(self.http.send(request).await?).await?;
        let parsed: GoogleEventsResponse = parse_query_body(status, body, "events")?;

        debug!(items = parsed.items.len(), has_more = parsed.next_page_token.is_some(), "events page received");
        Ok(EventsPage { items: parsed.items, next_page_token: parsed.next_page_token })
    }
}

async fn read_body(response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await.map_err(InfraError::from)?;
    Ok((status, body))
}

/// Token answer: `access_token` must be a non-empty string.
fn parse_token_body(body: &str) -> Result<AccessGrant> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        CalSiftError::MalformedResponse(format!("token response is not JSON: {err}"))
    })?;

    let token = value
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            CalSiftError::MalformedResponse("token response has no usable access_token".into())
        })?;

    Ok(AccessGrant {
        token: AccessToken::new(token),
        expires_in: value.get("expires_in").and_then(Value::as_u64),
    })
}

fn parse_query_body<T: DeserializeOwned>(status: StatusCode, body: String, endpoint: &str) -> Result<T> {
    if !status.is_success() {
        warn!(status = status.as_u16(), endpoint, "calendar query rejected");
        return Err(CalSiftError::UpstreamQuery { status: status.as_u16(), body });
    }

    serde_json::from_str(&body).map_err(|err| CalSiftError::UpstreamQuery {
        status: status.as_u16(),
        body: format!("undecodable {endpoint} response: {err}"),
    })
}
