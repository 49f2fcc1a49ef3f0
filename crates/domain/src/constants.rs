//! Engine constants
//!
//! Provider limits and the ownership heuristic's fixed data live here so the
//! core and infra crates agree on them.

/// Largest range the aggregate free/busy endpoint accepts in one request.
pub const DEFAULT_MAX_WINDOW_DAYS: f64 = 85.0;

/// Calendar queried when the credential names none.
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Page size cap for the events-list endpoint.
pub const EVENTS_PAGE_SIZE: u32 = 2500;

/// Server-side projection for the events-list endpoint.
pub const EVENTS_FIELD_PROJECTION: &str = "items(id,summary,status,transparency,start,end,\
attendees(email,self,responseStatus,organizer),organizer(email,self)),nextPageToken";

pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Seconds shaved off a provider-advertised token lifetime before caching.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

/// Domains shared by unrelated people. A client on one of these only owns
/// events where their exact address appears.
pub const FREE_EMAIL_DOMAINS: &[&str] = &[
    // Consumer webmail
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "ymail.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "msn.com",
    "aol.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "protonmail.com",
    "proton.me",
    "gmx.com",
    "gmx.net",
    "mail.com",
    "yandex.com",
    "zoho.com",
    "qq.com",
    "163.com",
    // Video and chat providers
    "zoom.us",
    "skype.com",
    "whereby.com",
];

/// Whether `domain` (already lowercased) is a shared free-email domain.
pub fn is_free_email_domain(domain: &str) -> bool {
    FREE_EMAIL_DOMAINS.contains(&domain)
}
