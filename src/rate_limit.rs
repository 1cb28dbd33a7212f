use async_trait::async_trait;
use axum::http::HeaderMap;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ValidateError;

pub const DEFAULT_MAX_REQUESTS_PER_CLIENT: u32 = 5;
pub const UNKNOWN_CLIENT: &str = "unknown";
const FORWARDED_FOR: &str = "x-forwarded-for";

// first X-Forwarded-For hop, unauthenticated so clients can pick their own key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_CLIENT.to_string())
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(Self::new)
            .unwrap_or_else(Self::unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Outcome of an admission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { count: u32 },
    Rejected,
}

// storage behind the limiter, try_acquire must be atomic per key
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn usage(&self, key: &ClientKey) -> u32;

    // increments only while below max
    async fn try_acquire(&self, key: &ClientKey, max: u32) -> Admission;

    async fn tracked(&self) -> usize;
}

// Process-local store, empty at startup and never evicted
#[derive(Default)]
pub struct InMemoryUsageStore {
    counts: DashMap<ClientKey, u32>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn usage(&self, key: &ClientKey) -> u32 {
        self.counts.get(key).map(|c| *c).unwrap_or(0)
    }

    async fn try_acquire(&self, key: &ClientKey, max: u32) -> Admission {
        // entry() holds the shard lock, so check and increment can't interleave
        let mut count = self.counts.entry(key.clone()).or_insert(0);
        if *count >= max {
            return Admission::Rejected;
        }
        *count += 1;
        Admission::Admitted { count: *count }
    }

    async fn tracked(&self) -> usize {
        self.counts.len()
    }
}

/// Fixed ceiling of accepted requests per client for the process lifetime.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn UsageStore>,
    max: u32,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn UsageStore>, max: u32) -> Self {
        Self { store, max }
    }

    pub fn in_memory(max: u32) -> Self {
        Self::new(Arc::new(InMemoryUsageStore::new()), max)
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn store(&self) -> &Arc<dyn UsageStore> {
        &self.store
    }

    // read-only, does not consume quota
    pub async fn ensure_available(&self, key: &ClientKey) -> Result<(), ValidateError> {
        if self.store.usage(key).await >= self.max {
            return Err(ValidateError::RateLimited { max: self.max });
        }
        Ok(())
    }

    pub async fn acquire(&self, key: &ClientKey) -> Result<u32, ValidateError> {
        match self.store.try_acquire(key, self.max).await {
            Admission::Admitted { count } => Ok(count),
            Admission::Rejected => Err(ValidateError::RateLimited { max: self.max }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(forwarded: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(FORWARDED_FOR, HeaderValue::from_str(forwarded).unwrap());
        h
    }

    #[test]
    fn key_is_first_forwarded_hop() {
        let key = ClientKey::from_headers(&headers(" 203.0.113.9 , 10.0.0.1, 10.0.0.2"));
        assert_eq!(key.as_str(), "203.0.113.9");
    }

    #[test]
    fn key_falls_back_to_unknown() {
        assert_eq!(ClientKey::from_headers(&HeaderMap::new()), ClientKey::unknown());
        assert_eq!(ClientKey::from_headers(&headers("")), ClientKey::unknown());
        assert_eq!(ClientKey::from_headers(&headers(" ,10.0.0.1")), ClientKey::unknown());
    }

    #[tokio::test]
    async fn sixth_acquire_is_rejected() {
        let limiter = RateLimiter::in_memory(5);
        let key = ClientKey::new("1.2.3.4");
        for expected in 1..=5 {
            assert_eq!(limiter.acquire(&key).await.unwrap(), expected);
        }
        let err = limiter.acquire(&key).await.unwrap_err();
        assert!(err.to_string().contains('5'));
        assert!(limiter.ensure_available(&key).await.is_err());
        assert_eq!(limiter.store().usage(&key).await, 5);
    }

    #[tokio::test]
    async fn keys_have_independent_quotas() {
        let limiter = RateLimiter::in_memory(1);
        let a = ClientKey::new("a");
        let b = ClientKey::new("b");
        limiter.acquire(&a).await.unwrap();
        assert!(limiter.acquire(&a).await.is_err());
        assert!(limiter.ensure_available(&b).await.is_ok());
        limiter.acquire(&b).await.unwrap();
        assert_eq!(limiter.store().tracked().await, 2);
    }

    #[tokio::test]
    async fn ensure_available_does_not_consume() {
        let limiter = RateLimiter::in_memory(2);
        let key = ClientKey::new("peek");
        for _ in 0..10 {
            limiter.ensure_available(&key).await.unwrap();
        }
        assert_eq!(limiter.store().usage(&key).await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_acquires_never_overshoot() {
        let limiter = RateLimiter::in_memory(5);
        let key = ClientKey::new("burst");

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let limiter = limiter.clone();
                let key = key.clone();
                tokio::spawn(async move { limiter.acquire(&key).await.is_ok() })
            })
            .collect();

        let mut admitted = 0;
        for t in tasks {
            if t.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
        assert_eq!(limiter.store().usage(&key).await, 5);
    }
}
