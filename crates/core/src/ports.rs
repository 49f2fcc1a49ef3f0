//! Calendar provider port interfaces
//!
//! The core never performs I/O itself. Callers supply implementations of
//! these traits (the Google client in `calsift-infra`, or an in-memory double
//! in tests).

use async_trait::async_trait;
use calsift_domain::{
    AccessGrant, AccessToken, EventsPage, FreeBusyResponse, OAuthConfig, Result, TimeWindow,
};

/// Exchanges a long-lived refresh credential for a short-lived access token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Perform one credential exchange. Implementations must not retry.
    ///
    /// # Errors
    /// `UpstreamAuth` on a non-success status, `MalformedResponse` when the
    /// provider answers without a usable token.
    async fn exchange(&self, oauth: &OAuthConfig) -> Result<AccessGrant>;
}

/// Read-only access to the provider's calendar endpoints.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// One aggregate free/busy request covering every calendar in
    /// `calendar_ids` over `window`.
    async fn query_free_busy(
        &self,
        token: &AccessToken,
        calendar_ids: &[String],
        window: &TimeWindow,
    ) -> Result<FreeBusyResponse>;

    /// One page of single (expanded) event instances overlapping `window`.
    async fn list_events_page(
        &self,
        token: &AccessToken,
        calendar_id: &str,
        window: &TimeWindow,
        page_token: Option<&str>,
    ) -> Result<EventsPage>;
}
