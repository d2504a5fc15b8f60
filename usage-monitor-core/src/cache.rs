//! Process-wide memo of the last successful aggregation
//!
//! One slot for the whole credential set. Concurrent misses are not
//! de-duplicated: two requests that miss together both aggregate, and the
//! one that finishes last wins the slot.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::AggregationResult;

/// Memoized result plus the time it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub result: AggregationResult,
    pub fetched_at_millis: i64,
}

/// Single-slot, time-windowed result cache.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl ResultCache {
    /// 默认缓存 5 分钟
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the memo if it is younger than the TTL.
    pub async fn get(&self) -> Option<AggregationResult> {
        self.get_at(now_millis()).await
    }

    /// [`get`](Self::get) with an explicit clock (epoch milliseconds).
    pub async fn get_at(&self, now_millis: i64) -> Option<AggregationResult> {
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;
        let age = now_millis.saturating_sub(entry.fetched_at_millis);
        (age < self.ttl_millis()).then(|| entry.result.clone())
    }

    /// Overwrites the slot and stamps the current time.
    pub async fn set(&self, result: AggregationResult) {
        self.set_at(result, now_millis()).await;
    }

    /// [`set`](Self::set) with an explicit clock (epoch milliseconds).
    pub async fn set_at(&self, result: AggregationResult, now_millis: i64) {
        *self.slot.write().await = Some(CacheEntry {
            result,
            fetched_at_millis: now_millis,
        });
    }

    /// Empties the slot.
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
