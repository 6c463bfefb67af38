use crate::metrics::ConditionsMetrics;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Single memoized value with its fetch time
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Time-bounded memoization of one expensive fetch.
///
/// A fresh value is served without fetching. Once the TTL has passed the next
/// caller refreshes it; if that refresh fails the previous value is served
/// instead, and the error only surfaces when nothing was ever cached.
///
/// The lock is held across the fetch, so concurrent misses on one cache
/// serialize and later callers see the value stored by the first.
pub struct TtlCache<T> {
    name: String,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    /// Create an empty cache with the given TTL
    pub fn new(name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if fresh, otherwise run `fetch` and store its result
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.is_fresh(self.ttl) {
                debug!("Cache hit for {}", self.name);
                ConditionsMetrics::record_cache_outcome(&self.name, "hit");
                return Ok(cached.value.clone());
            }
        }

        debug!("Cache miss for {}, fetching", self.name);
        ConditionsMetrics::record_cache_outcome(&self.name, "miss");

        match fetch().await {
            Ok(value) => {
                *entry = Some(CacheEntry {
                    value: value.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(value)
            }
            Err(e) => match entry.as_ref() {
                Some(stale) => {
                    warn!(
                        "Refreshing {} failed, serving value from {:.0}s ago: {}",
                        self.name,
                        stale.fetched_at.elapsed().as_secs_f64(),
                        e
                    );
                    ConditionsMetrics::record_cache_outcome(&self.name, "stale_fallback");
                    Ok(stale.value.clone())
                }
                None => {
                    ConditionsMetrics::record_cache_outcome(&self.name, "error");
                    Err(e)
                }
            },
        }
    }

    /// Currently held value and its age, fresh or not
    pub async fn peek(&self) -> Option<(T, Duration)> {
        self.entry
            .lock()
            .await
            .as_ref()
            .map(|e| (e.value.clone(), e.fetched_at.elapsed()))
    }
}
