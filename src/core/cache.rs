//! Query cache keyed by entity.
//!
//! Each entity owns one slot holding the last fetched value and the generation it was
//! fetched at. A read returns the cached value only while its generation is current;
//! otherwise it fetches while holding the slot lock, so concurrent readers of the same
//! key share one in-flight request. Invalidation bumps the generation and notifies
//! every [`Subscription`] registered for that key.

use crate::{core::EntityKind, errors::Result};
use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, trace};

const EVENT_CAPACITY: usize = 64;

struct Entry<V> {
    generation: u64,
    data: Arc<V>,
}

struct Slot<V> {
    generation: AtomicU64,
    entry: Mutex<Option<Entry<V>>>,
}

impl<V> Slot<V> {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            entry: Mutex::new(None),
        }
    }
}

/// Cache of list query results, one slot per [`EntityKind`].
pub struct QueryCache<V> {
    slots: [Slot<V>; 3],
    events: broadcast::Sender<EntityKind>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> QueryCache<V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            slots: [Slot::new(), Slot::new(), Slot::new()],
            events,
        }
    }

    const fn slot(&self, key: EntityKind) -> &Slot<V> {
        &self.slots[key.index()]
    }

    /// Returns the current value for `key`, running `fetch` if there is none or it
    /// was invalidated.
    ///
    /// A failed fetch leaves the slot untouched and returns the error.
    pub async fn read<F, Fut>(&self, key: EntityKind, fetch: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let slot = self.slot(key);
        let mut entry = slot.entry.lock().await;
        let generation = slot.generation.load(Ordering::Acquire);

        if let Some(cached) = entry.as_ref().filter(|e| e.generation == generation) {
            trace!(query = %key, generation, "cache hit");
            return Ok(Arc::clone(&cached.data));
        }

        debug!(query = %key, generation, "fetching");
        let data = Arc::new(fetch().await?);
        *entry = Some(Entry {
            generation,
            data: Arc::clone(&data),
        });
        Ok(data)
    }

    /// Whether `key` holds a value fetched after its latest invalidation.
    pub async fn is_fresh(&self, key: EntityKind) -> bool {
        let slot = self.slot(key);
        let entry = slot.entry.lock().await;
        let generation = slot.generation.load(Ordering::Acquire);
        entry.as_ref().is_some_and(|e| e.generation == generation)
    }

    /// Last successfully fetched value for `key`, fresh or not.
    pub async fn last_known(&self, key: EntityKind) -> Option<Arc<V>> {
        let entry = self.slot(key).entry.lock().await;
        entry.as_ref().map(|e| Arc::clone(&e.data))
    }

    /// Marks `key` stale and notifies its subscribers. The next read re-fetches.
    pub fn invalidate(&self, key: EntityKind) {
        let generation = self.slot(key).generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(query = %key, generation, "invalidated");
        // No receivers is fine: nobody is watching this key right now.
        let _ = self.events.send(key);
    }

    /// Registers interest in invalidations of `key`.
    #[must_use]
    pub fn subscribe(&self, key: EntityKind) -> Subscription {
        Subscription {
            key,
            receiver: self.events.subscribe(),
        }
    }
}

/// Receives invalidation events for one cache key.
pub struct Subscription {
    key: EntityKind,
    receiver: broadcast::Receiver<EntityKind>,
}

impl Subscription {
    /// Key this subscription watches.
    #[must_use]
    pub const fn key(&self) -> EntityKind {
        self.key
    }

    /// Waits for the next invalidation of the watched key.
    ///
    /// Returns `false` once the cache has been dropped.
    pub async fn invalidated(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(key) if key == self.key => return true,
                Ok(_) => {}
                // Dropped events may have included ours
                Err(broadcast::error::RecvError::Lagged(_)) => return true,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use std::sync::atomic::AtomicUsize;

    async fn counted_fetch(calls: &AtomicUsize, value: u32) -> Result<u32> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(value)
    }

    #[tokio::test]
    async fn test_read_caches_until_invalidated() -> Result<()> {
        let cache = QueryCache::<u32>::new();
        let calls = AtomicUsize::new(0);

        let first = cache.read(EntityKind::Galangan, || counted_fetch(&calls, 1)).await?;
        let second = cache.read(EntityKind::Galangan, || counted_fetch(&calls, 2)).await?;
        assert_eq!((*first, *second), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate(EntityKind::Galangan);
        assert!(!cache.is_fresh(EntityKind::Galangan).await);

        let third = cache.read(EntityKind::Galangan, || counted_fetch(&calls, 3)).await?;
        assert_eq!(*third, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_fresh(EntityKind::Galangan).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_independent() -> Result<()> {
        let cache = QueryCache::<u32>::new();
        let calls = AtomicUsize::new(0);

        cache.read(EntityKind::Setor, || counted_fetch(&calls, 1)).await?;
        cache.read(EntityKind::Lunas, || counted_fetch(&calls, 2)).await?;
        cache.invalidate(EntityKind::Lunas);

        assert!(cache.is_fresh(EntityKind::Setor).await);
        assert!(!cache.is_fresh(EntityKind::Lunas).await);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() -> Result<()> {
        let cache = QueryCache::<u32>::new();
        let calls = AtomicUsize::new(0);

        let (a, b) = tokio::join!(
            cache.read(EntityKind::Galangan, || counted_fetch(&calls, 7)),
            cache.read(EntityKind::Galangan, || counted_fetch(&calls, 8)),
        );
        assert_eq!(*a?, 7);
        assert_eq!(*b?, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_last_known_value_stale() -> Result<()> {
        let cache = QueryCache::<u32>::new();
        cache
            .read(EntityKind::Setor, || async { Ok::<_, Error>(5) })
            .await?;
        cache.invalidate(EntityKind::Setor);

        let result = cache
            .read(EntityKind::Setor, || async {
                Err::<u32, _>(Error::Config {
                    message: "offline".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_fresh(EntityKind::Setor).await);
        assert_eq!(cache.last_known(EntityKind::Setor).await.as_deref(), Some(&5));
        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_only_sees_its_key() {
        let cache = QueryCache::<u32>::new();
        let mut galangan = cache.subscribe(EntityKind::Galangan);
        assert_eq!(galangan.key(), EntityKind::Galangan);

        cache.invalidate(EntityKind::Setor);
        cache.invalidate(EntityKind::Galangan);

        assert!(galangan.invalidated().await);
        // The setor event was skipped, nothing else is pending
        assert!(galangan.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_subscription_ends_when_cache_dropped() {
        let cache = QueryCache::<u32>::new();
        let mut subscription = cache.subscribe(EntityKind::Lunas);
        drop(cache);
        assert!(!subscription.invalidated().await);
    }
}
