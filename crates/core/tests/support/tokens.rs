use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use calsift_core::TokenSource;
use calsift_domain::{AccessGrant, AccessToken, CalSiftError, OAuthConfig, Result as DomainResult};

/// In-memory `TokenSource` that counts exchanges.
pub struct FakeTokenSource {
    outcome: Mutex<DomainResult<AccessGrant>>,
    exchanges: AtomicUsize,
}

impl FakeTokenSource {
    /// Always grants `token`.
    pub fn granting(token: &str) -> Self {
        Self {
            outcome: Mutex::new(Ok(AccessGrant {
                token: AccessToken::new(token),
                expires_in: Some(3600),
            })),
            exchanges: AtomicUsize::new(0),
        }
    }

    /// Always fails with `error`.
    pub fn failing(error: CalSiftError) -> Self {
        Self { outcome: Mutex::new(Err(error)), exchanges: AtomicUsize::new(0) }
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for FakeTokenSource {
    async fn exchange(&self, _oauth: &OAuthConfig) -> DomainResult<AccessGrant> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        self.outcome.lock().unwrap().clone()
    }
}
