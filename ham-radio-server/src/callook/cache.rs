//! Caching layer for callsign lookups.
//!
//! License data changes rarely, and a bearing between two stations costs
//! two lookups, so repeated questions about the same callsigns are served
//! from memory for a while.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Callsign;
use crate::fetch::FetchError;

use super::CallsignDirectory;
use super::types::CallsignRecord;

/// Configuration for the callsign cache.
#[derive(Debug, Clone)]
pub struct CallookCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CallookCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Callsign directory with an in-memory cache in front.
///
/// Errors are not cached; the next lookup tries upstream again.
pub struct CachedCallook<D> {
    inner: D,
    records: MokaCache<Callsign, Arc<CallsignRecord>>,
}

impl<D: CallsignDirectory> CachedCallook<D> {
    pub fn new(inner: D, config: &CallookCacheConfig) -> Self {
        let records = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, records }
    }

    /// Look up a callsign, using the cache if available.
    pub async fn get(&self, callsign: &Callsign) -> Result<Arc<CallsignRecord>, FetchError> {
        if let Some(cached) = self.records.get(callsign).await {
            trace!(%callsign, "callsign cache hit");
            return Ok(cached);
        }

        let record = self.inner.lookup(callsign).await?;
        self.records.insert(callsign.clone(), record.clone()).await;

        Ok(record)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.records.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.records.invalidate_all();
    }
}

impl<D: CallsignDirectory> CallsignDirectory for CachedCallook<D> {
    fn lookup<'a>(
        &'a self,
        callsign: &'a Callsign,
    ) -> BoxFuture<'a, Result<Arc<CallsignRecord>, FetchError>> {
        self.get(callsign).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Directory that answers every callsign as VALID and counts calls.
    #[derive(Default)]
    struct CountingDirectory {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CallsignDirectory for CountingDirectory {
        fn lookup<'a>(
            &'a self,
            callsign: &'a Callsign,
        ) -> BoxFuture<'a, Result<Arc<CallsignRecord>, FetchError>> {
            async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    return Err(FetchError::Status {
                        status: 500,
                        message: "boom".into(),
                    });
                }
                let mut record = CallsignRecord {
                    status: "VALID".into(),
                    ..Default::default()
                };
                record.current.callsign = callsign.to_string();
                Ok(Arc::new(record))
            }
            .boxed()
        }
    }

    fn call(s: &str) -> Callsign {
        Callsign::parse(s).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CallookCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let cache = CachedCallook::new(CountingDirectory::default(), &CallookCacheConfig::default());

        let first = cache.get(&call("W1AW")).await.unwrap();
        let second = cache.get(&call("W1AW")).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_callsigns_fetch_separately() {
        let cache = CachedCallook::new(CountingDirectory::default(), &CallookCacheConfig::default());

        let a = cache.get(&call("W1AW")).await.unwrap();
        let b = cache.get(&call("K2A")).await.unwrap();

        assert_eq!(a.current.callsign, "W1AW");
        assert_eq!(b.current.callsign, "K2A");
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let directory = CountingDirectory {
            fail: true,
            ..Default::default()
        };
        let cache = CachedCallook::new(directory, &CallookCacheConfig::default());

        assert!(cache.get(&call("W1AW")).await.is_err());
        assert!(cache.get(&call("W1AW")).await.is_err());
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = CachedCallook::new(CountingDirectory::default(), &CallookCacheConfig::default());

        cache.get(&call("W1AW")).await.unwrap();
        cache.invalidate_all();
        cache.get(&call("W1AW")).await.unwrap();

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
    }
}
