//! Configuration structures
//!
//! `OAuthConfig` is parsed from the provider credential a secret store hands
//! us. Parsing fails fast with [`CalSiftError::Config`] so a broken
//! credential never reaches the network.

use std::fmt;

use serde::Deserialize;

use crate::constants::{DEFAULT_CALENDAR_ID, DEFAULT_MAX_WINDOW_DAYS};
use crate::errors::{CalSiftError, Result};

/// Provider OAuth credential plus the calendars to inspect.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOAuthSecret")]
pub struct OAuthConfig {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    calendar_ids: Vec<String>,
}

impl OAuthConfig {
    /// Validate and build a credential.
    ///
    /// Blank calendar ids are dropped; an empty list becomes `["primary"]`.
    /// Duplicates are kept in the order given.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        calendar_ids: Vec<String>,
    ) -> Result<Self> {
        let client_id = required("clientId", client_id.into())?;
        let client_secret = required("clientSecret", client_secret.into())?;
        let refresh_token = required("refreshToken", refresh_token.into())?;

        let mut calendar_ids: Vec<String> = calendar_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if calendar_ids.is_empty() {
            calendar_ids.push(DEFAULT_CALENDAR_ID.to_string());
        }

        Ok(Self { client_id, client_secret, refresh_token, calendar_ids })
    }

    /// Parse the stored credential JSON.
    ///
    /// Accepts camelCase or snake_case keys, and `calendarIds` either as an
    /// array or a comma-separated string.
    pub fn from_secret_json(raw: &str) -> Result<Self> {
        let secret: RawOAuthSecret = serde_json::from_str(raw)
            .map_err(|e| CalSiftError::Config(format!("invalid credential JSON: {e}")))?;
        Self::try_from(secret)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Never empty.
    pub fn calendar_ids(&self) -> &[String] {
        &self.calendar_ids
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("calendar_ids", &self.calendar_ids)
            .finish()
    }
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CalSiftError::Config(format!("missing required OAuth field: {field}")));
    }
    Ok(trimmed.to_string())
}

/// Credential as stored, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOAuthSecret {
    #[serde(default, alias = "client_id")]
    pub client_id: Option<String>,
    #[serde(default, alias = "client_secret")]
    pub client_secret: Option<String>,
    #[serde(default, alias = "refresh_token")]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "calendar_ids", alias = "calendarId", alias = "calendar_id")]
    pub calendar_ids: Option<CalendarIdsField>,
}

/// `calendarIds` as an array or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CalendarIdsField {
    List(Vec<String>),
    Csv(String),
}

impl CalendarIdsField {
    pub fn into_ids(self) -> Vec<String> {
        match self {
            Self::List(ids) => ids,
            Self::Csv(raw) => raw.split(',').map(str::to_string).collect(),
        }
    }
}

impl TryFrom<RawOAuthSecret> for OAuthConfig {
    type Error = CalSiftError;

    fn try_from(raw: RawOAuthSecret) -> Result<Self> {
        OAuthConfig::new(
            raw.client_id.unwrap_or_default(),
            raw.client_secret.unwrap_or_default(),
            raw.refresh_token.unwrap_or_default(),
            raw.calendar_ids.map(CalendarIdsField::into_ids).unwrap_or_default(),
        )
    }
}

/// Tuning for the aggregator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Maximum span of one provider query, in days.
    pub max_window_days: f64,
    /// Fetches in flight at once; 1 means strictly sequential.
    pub max_concurrent_fetches: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self { max_window_days: DEFAULT_MAX_WINDOW_DAYS, max_concurrent_fetches: 1 }
    }
}
