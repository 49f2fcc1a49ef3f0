//! # CalSift Infrastructure
//!
//! Infrastructure implementations for the core ports.
//!
//! This crate contains:
//! - Google Calendar token and calendar clients (`reqwest`)
//! - Shared HTTP client and error conversions
//! - Access-token cache (`moka`)
//! - Configuration loading (environment, JSON, TOML)
//! - Tracing subscriber setup

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod observability;
pub mod token_cache;

use std::sync::Arc;
use std::time::Duration;

use calsift_core::{AvailabilityResolver, TokenSource};
use calsift_domain::Result;

pub use config::EngineConfig;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::google::{GoogleCalendarClient, GoogleEndpoints};
pub use token_cache::{CachedTokenSource, TokenCacheConfig};

/// Wire a resolver to Google according to `config`.
///
/// The token cache is composed in only when `token_cache_ttl_secs` is set.
pub fn build_resolver(config: &EngineConfig) -> Result<AvailabilityResolver> {
    let http = HttpClient::builder().timeout(Duration::from_secs(config.http.timeout_secs)).build()?;
    let google = GoogleCalendarClient::new(http, config.endpoints.clone());

    let tokens: Arc<dyn TokenSource> = match config.token_cache_ttl_secs {
        Some(ttl) => Arc::new(CachedTokenSource::new(
            google.clone(),
            TokenCacheConfig::with_ttl(Duration::from_secs(ttl)),
        )),
        None => Arc::new(google.clone()),
    };

    Ok(AvailabilityResolver::new(tokens, Arc::new(google)).with_settings(config.resolver.clone()))
}
