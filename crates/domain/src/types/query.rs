//! Inputs of the two public resolution operations

use crate::config::OAuthConfig;

/// "Resolve busy intervals in a range."
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub oauth: OAuthConfig,
    pub window_start_iso: String,
    pub window_end_iso: String,
    /// Overrides the resolver's configured maximum window size.
    pub max_window_days: Option<f64>,
}

impl AvailabilityQuery {
    pub fn new(
        oauth: OAuthConfig,
        window_start_iso: impl Into<String>,
        window_end_iso: impl Into<String>,
    ) -> Self {
        Self {
            oauth,
            window_start_iso: window_start_iso.into(),
            window_end_iso: window_end_iso.into(),
            max_window_days: None,
        }
    }

    pub fn with_max_window_days(mut self, days: f64) -> Self {
        self.max_window_days = Some(days);
        self
    }
}

/// "Resolve client meetings in a range."
#[derive(Debug, Clone)]
pub struct ClientMeetingQuery {
    pub oauth: OAuthConfig,
    pub window_start_iso: String,
    pub window_end_iso: String,
    pub client_email: String,
    /// Advisor address used to find their attendee record when the provider
    /// does not flag it as `self`.
    pub advisor_email_hint: Option<String>,
    pub max_window_days: Option<f64>,
}

impl ClientMeetingQuery {
    pub fn new(
        oauth: OAuthConfig,
        window_start_iso: impl Into<String>,
        window_end_iso: impl Into<String>,
        client_email: impl Into<String>,
    ) -> Self {
        Self {
            oauth,
            window_start_iso: window_start_iso.into(),
            window_end_iso: window_end_iso.into(),
            client_email: client_email.into(),
            advisor_email_hint: None,
            max_window_days: None,
        }
    }

    pub fn with_advisor_email(mut self, email: impl Into<String>) -> Self {
        self.advisor_email_hint = Some(email.into());
        self
    }

    pub fn with_max_window_days(mut self, days: f64) -> Self {
        self.max_window_days = Some(days);
        self
    }
}
