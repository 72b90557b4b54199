use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::modules::discounts::models::DiscountSettings;

struct CacheEntry {
    value: DiscountSettings,
    fetched_at: Instant,
}

/// In-process cache for discount settings with an explicit TTL and
/// invalidation hook.
///
/// The cached value is also kept as a stale fallback: when a refresh from
/// the store fails but an older value is available, readers get the stale
/// copy instead of an error. The order flow must keep pricing even when the
/// settings table is briefly unreachable.
pub struct SettingsCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl SettingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Returns the cached value if it is within TTL.
    pub async fn get_fresh(&self) -> Option<DiscountSettings> {
        let guard = self.entry.read().await;
        guard
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Returns the cached value regardless of age (stale fallback path).
    pub async fn get_stale(&self) -> Option<DiscountSettings> {
        let guard = self.entry.read().await;
        guard.as_ref().map(|e| e.value.clone())
    }

    pub async fn store(&self, value: DiscountSettings) {
        let mut guard = self.entry.write().await;
        *guard = Some(CacheEntry {
            value,
            fetched_at: Instant::now(),
        });
    }

    /// Drops the cached value; the next read goes to the store.
    pub async fn invalidate(&self) {
        let mut guard = self.entry.write().await;
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_hit_and_invalidate() {
        let cache = SettingsCache::new(Duration::from_secs(60));
        assert!(cache.get_fresh().await.is_none());

        cache.store(DiscountSettings::default()).await;
        assert!(cache.get_fresh().await.is_some());

        cache.invalidate().await;
        assert!(cache.get_fresh().await.is_none());
        assert!(cache.get_stale().await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_still_available_as_stale() {
        let cache = SettingsCache::new(Duration::from_millis(0));
        cache.store(DiscountSettings::default()).await;

        // TTL of zero: never fresh, always stale
        assert!(cache.get_fresh().await.is_none());
        assert!(cache.get_stale().await.is_some());
    }
}
