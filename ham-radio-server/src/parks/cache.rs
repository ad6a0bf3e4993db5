//! Time-to-live cache over the park reference table.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::error::ParkError;
use super::parse::parse_dataset;
use super::source::DatasetSource;
use super::table::{ParkReference, ReferenceTable};

/// Default table lifetime: 24 hours.
pub const DEFAULT_TTL: TimeDelta = TimeDelta::hours(24);

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Freshness of the published table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing published yet
    Empty,
    /// Published within the TTL
    Fresh,
    /// Published, but older than the TTL
    Stale,
}

/// Outcome of the most recent refresh attempt, kept under the refresh mutex.
#[derive(Debug, Default)]
struct LastAttempt {
    id: u64,
    error: Option<String>,
}

/// Park lookup backed by a lazily refreshed in-memory table.
///
/// Readers take a shared lock just long enough to clone the table's `Arc`.
/// A refresh fetches and parses with no lock on the table, then takes the
/// write lock only to swap the new table in. A separate refresh mutex makes
/// sure only one refresh runs at a time. Callers that queue behind it
/// re-check freshness and reuse the table the winner published, or, if the
/// winner failed, get its error without fetching again.
pub struct ReferenceCache {
    source: Arc<dyn DatasetSource>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    published: RwLock<Option<Arc<ReferenceTable>>>,
    attempts: AtomicU64,
    refresh_lock: Mutex<LastAttempt>,
}

impl ReferenceCache {
    /// Create an empty cache with the default TTL and wall-clock time.
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self::with_clock(source, DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Create an empty cache with a custom TTL and clock.
    pub fn with_clock(source: Arc<dyn DatasetSource>, ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            ttl,
            published: RwLock::new(None),
            attempts: AtomicU64::new(0),
            refresh_lock: Mutex::new(LastAttempt::default()),
        }
    }

    /// Look up a park by exact reference code, refreshing first if needed.
    ///
    /// Returns `Ok(None)` when the reference is not in the dataset.
    pub async fn lookup(&self, reference: &str) -> Result<Option<ParkReference>, ParkError> {
        let table = self.ensure_fresh().await?;
        Ok(table.get(reference).cloned())
    }

    /// Return a table no older than the TTL, refreshing if necessary.
    ///
    /// If the refresh fails the error is returned and whatever table was
    /// already published stays in place. Callers that were waiting on a
    /// failed attempt receive [`ParkError::RefreshFailed`] instead of
    /// starting another fetch; the next caller to arrive retries.
    pub async fn ensure_fresh(&self) -> Result<Arc<ReferenceTable>, ParkError> {
        let seen = self.attempts.load(Ordering::Acquire);
        if let Some(table) = self.fresh_table().await {
            return Ok(table);
        }

        let mut last = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(table) = self.fresh_table().await {
            return Ok(table);
        }
        if last.id > seen {
            if let Some(message) = &last.error {
                debug!(attempt = last.id, "sharing failed refresh outcome");
                return Err(ParkError::RefreshFailed {
                    message: message.clone(),
                });
            }
        }

        self.refresh_locked(&mut last).await
    }

    /// Refresh unconditionally.
    pub async fn refresh(&self) -> Result<Arc<ReferenceTable>, ParkError> {
        let mut last = self.refresh_lock.lock().await;
        self.refresh_locked(&mut last).await
    }

    /// Current freshness, without triggering a refresh.
    pub async fn state(&self) -> CacheState {
        let now = self.clock.now();
        match self.published.read().await.as_ref() {
            None => CacheState::Empty,
            Some(table) if self.is_fresh(table, now) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// The currently published table, fresh or not.
    pub async fn current(&self) -> Option<Arc<ReferenceTable>> {
        self.published.read().await.clone()
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    async fn fresh_table(&self) -> Option<Arc<ReferenceTable>> {
        let now = self.clock.now();
        let guard = self.published.read().await;
        guard
            .as_ref()
            .filter(|table| self.is_fresh(table, now))
            .cloned()
    }

    fn is_fresh(&self, table: &ReferenceTable, now: DateTime<Utc>) -> bool {
        now - table.built_at() < self.ttl
    }

    /// Fetch, parse and publish, recording the outcome in `last`.
    async fn refresh_locked(&self, last: &mut LastAttempt) -> Result<Arc<ReferenceTable>, ParkError> {
        let result = self.fetch_and_publish().await;

        last.id = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        last.error = result.as_ref().err().map(ToString::to_string);
        if let Some(error) = &last.error {
            warn!(attempt = last.id, %error, "park reference refresh failed");
        }

        result
    }

    async fn fetch_and_publish(&self) -> Result<Arc<ReferenceTable>, ParkError> {
        debug!("refreshing park reference table");
        let payload = self.source.fetch().await?;

        // ~80k rows; keep the parse off the async worker threads
        let parks = tokio::task::spawn_blocking(move || parse_dataset(&payload))
            .await
            .map_err(|e| ParkError::Parse {
                message: format!("parser task failed: {e}"),
            })??;

        let table = Arc::new(ReferenceTable::new(parks, self.clock.now()));
        *self.published.write().await = Some(Arc::clone(&table));

        info!(parks = table.len(), "published park reference table");
        Ok(table)
    }
}
