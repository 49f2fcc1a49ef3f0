//! Ownership classifier
//!
//! Decides whether an event is a meeting with the designated client. A
//! corporate domain is trusted as a proxy for "this organization", so any
//! participant from it counts. Free-email domains are shared by unrelated
//! people, so only the client's exact address counts there.

use calsift_domain::constants::is_free_email_domain;
use calsift_domain::{AdvisorResponseStatus, ProviderAttendee, ProviderEvent};

/// Trimmed, lowercased address, or `None` when blank.
pub fn normalize_email(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Part after the last `@`, if non-empty.
pub fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain).filter(|domain| !domain.is_empty())
}

/// How a participant address is compared with the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Client is on a free-email domain.
    ExactAddress(String),
    /// Client is on a custom or corporate domain.
    Domain(String),
    /// Client identity is unknown; nothing ever matches.
    Nothing,
}

/// Client contact (and optional advisor hint) an event is judged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    rule: MatchRule,
    advisor_email: Option<String>,
}

impl ClientIdentity {
    pub fn new(client_email: &str, advisor_email_hint: Option<&str>) -> Self {
        let rule = match normalize_email(client_email) {
            Some(email) => match email_domain(&email) {
                Some(domain) if is_free_email_domain(domain) => MatchRule::ExactAddress(email),
                Some(domain) => MatchRule::Domain(domain.to_string()),
                None => MatchRule::Nothing,
            },
            None => MatchRule::Nothing,
        };

        Self { rule, advisor_email: advisor_email_hint.and_then(normalize_email) }
    }

    pub fn rule(&self) -> &MatchRule {
        &self.rule
    }

    /// Whether a participant address satisfies the match rule.
    pub fn matches_address(&self, candidate: &str) -> bool {
        let Some(candidate) = normalize_email(candidate) else {
            return false;
        };

        match &self.rule {
            MatchRule::ExactAddress(email) => candidate == *email,
            MatchRule::Domain(domain) => email_domain(&candidate) == Some(domain.as_str()),
            MatchRule::Nothing => false,
        }
    }

    /// True when a non-self attendee, or a non-self organizer, matches.
    pub fn owns(&self, event: &ProviderEvent) -> bool {
        if self.rule == MatchRule::Nothing {
            return false;
        }

        let attendee_match = event
            .attendees
            .iter()
            .filter(|attendee| !attendee.is_self)
            .filter_map(|attendee| attendee.email.as_deref())
            .any(|email| self.matches_address(email));

        let organizer_match = event.organizer.as_ref().is_some_and(|organizer| {
            !organizer.is_self && organizer.email.as_deref().is_some_and(|e| self.matches_address(e))
        });

        attendee_match || organizer_match
    }

    /// Advisor's response to a matched event.
    ///
    /// Resolution order: the self attendee's status, the attendee matching
    /// the advisor hint, accepted when the advisor organizes, the organizer's
    /// own attendee status, then pending.
    pub fn advisor_response_status(&self, event: &ProviderEvent) -> AdvisorResponseStatus {
        let self_status = event
            .attendees
            .iter()
            .find(|attendee| attendee.is_self)
            .and_then(|attendee| attendee.response_status.as_deref());

        let hinted_status = || {
            let hint = self.advisor_email.as_deref()?;
            event
                .attendees
                .iter()
                .find(|attendee| attendee_email_is(attendee, hint))
                .and_then(|attendee| attendee.response_status.as_deref())
        };

        let organizer_is_self = event.organizer.as_ref().is_some_and(|organizer| organizer.is_self);

        let organizer_status = || {
            let organizer_email =
                event.organizer.as_ref().and_then(|organizer| organizer.email.as_deref());
            event
                .attendees
                .iter()
                .find(|attendee| {
                    attendee.organizer
                        || organizer_email.is_some_and(|email| attendee_email_is(attendee, email))
                })
                .and_then(|attendee| attendee.response_status.as_deref())
        };

        if let Some(status) = self_status.or_else(hinted_status) {
            return AdvisorResponseStatus::from_provider(status);
        }
        if organizer_is_self {
            return AdvisorResponseStatus::Accepted;
        }
        organizer_status().map(AdvisorResponseStatus::from_provider).unwrap_or_default()
    }
}

fn attendee_email_is(attendee: &ProviderAttendee, email: &str) -> bool {
    match (attendee.email.as_deref().and_then(normalize_email), normalize_email(email)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}
