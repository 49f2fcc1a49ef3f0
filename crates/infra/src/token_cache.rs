//! Access-token caching with moka
//!
//! Decorates any [`TokenSource`] so repeated resolutions with the same
//! credential reuse one access token until shortly before it expires.
//!
//! - **Key**: `(client_id, refresh_token)`
//! - **TTL**: the configured ceiling, shortened to the provider's advertised
//!   `expires_in` minus a safety margin
//! - **Errors**: never cached; a failed exchange always reaches the caller

use std::time::{Duration, Instant};

use async_trait::async_trait;
use calsift_core::TokenSource;
use calsift_domain::constants::TOKEN_EXPIRY_MARGIN_SECS;
use calsift_domain::{AccessGrant, OAuthConfig, Result};
use moka::sync::Cache;
use moka::Expiry;
use tracing::debug;

/// Default ceiling on how long a token is reused (45 minutes).
pub const DEFAULT_TOKEN_CACHE_TTL_SECS: u64 = 2700;

/// Default number of distinct credentials kept.
pub const DEFAULT_TOKEN_CACHE_CAPACITY: u64 = 64;

#[derive(Debug, Clone)]
pub struct TokenCacheConfig {
    /// Upper bound on entry lifetime.
    pub ttl: Duration,
    pub max_capacity: u64,
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_TOKEN_CACHE_TTL_SECS))
    }
}

impl TokenCacheConfig {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, max_capacity: DEFAULT_TOKEN_CACHE_CAPACITY }
    }
}

type CredentialKey = (String, String);

#[derive(Clone)]
struct CachedGrant {
    grant: AccessGrant,
    ttl: Duration,
}

/// Per-entry expiry: each grant lives for its own computed TTL.
struct GrantExpiry;

impl Expiry<CredentialKey, CachedGrant> for GrantExpiry {
    fn expire_after_create(
        &self,
        _key: &CredentialKey,
        value: &CachedGrant,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// [`TokenSource`] decorator that remembers successful exchanges.
pub struct CachedTokenSource<S> {
    inner: S,
    cache: Cache<CredentialKey, CachedGrant>,
    config: TokenCacheConfig,
}

impl<S: TokenSource> CachedTokenSource<S> {
    pub fn new(inner: S, config: TokenCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(GrantExpiry)
            .build();
        Self { inner, cache, config }
    }

    /// Forget the token held for `oauth`, forcing the next call to exchange.
    pub fn invalidate(&self, oauth: &OAuthConfig) {
        self.cache.invalidate(&credential_key(oauth));
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Lifetime for a fresh grant; zero means "do not cache".
    fn entry_ttl(&self, expires_in: Option<u64>) -> Duration {
        match expires_in {
            Some(secs) => {
                let usable = Duration::from_secs(secs.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS));
                usable.min(self.config.ttl)
            }
            None => self.config.ttl,
        }
    }
}

fn credential_key(oauth: &OAuthConfig) -> CredentialKey {
    (oauth.client_id().to_string(), oauth.refresh_token().to_string())
}

#[async_trait]
impl<S: TokenSource> TokenSource for CachedTokenSource<S> {
    async fn exchange(&self, oauth: &OAuthConfig) -> Result<AccessGrant> {
        let key = credential_key(oauth);

        if let Some(hit) = self.cache.get(&key) {
            debug!(client_id = %oauth.client_id(), "access token served from cache");
            return Ok(hit.grant);
        }

        let grant = self.inner.exchange(oauth).await?;

        let ttl = self.entry_ttl(grant.expires_in);
        if ttl.is_zero() {
            debug!(client_id = %oauth.client_id(), "token lifetime too short to cache");
        } else {
            self.cache.insert(key, CachedGrant { grant: grant.clone(), ttl });
        }

        Ok(grant)
    }
}
