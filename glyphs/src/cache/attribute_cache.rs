// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The flyweight factory. See [`AttributeCache`] for details.
//!
//! ## Ownership
//!
//! ```text
//! AttributeCache ──owns──▶ FxHashMap<AttributeKey, Arc<SharedAttributes>>
//!                                                      ▲
//! Document ──Arc<AttributeCache>                       │ Arc clone
//!    └── PositionedGlyph ──────────────────────────────┘
//! ```
//!
//! The cache holds the canonical [`Arc`] for every format it has seen. Glyphs hold
//! clones of that [`Arc`]. Clearing the cache drops only the cache's clone, so a glyph
//! can never observe a freed format, and [`AttributeCache::clear()`] takes `&mut self`,
//! which a shared `Arc<AttributeCache>` only yields (via [`Arc::get_mut`]) once every
//! document using it is gone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, atomic::AtomicU64};

use rustc_hash::FxHashMap;

use crate::{AtomicU64Ext, AttributeKey, CacheStats, InvalidAttributeError,
            SharedAttributes, SharedAttributesRef};

pub type AttributeTable = FxHashMap<AttributeKey, SharedAttributesRef>;

/// Maps every distinct [`AttributeKey`] to exactly one live [`SharedAttributes`].
///
/// - Lookups are structural ([`AttributeKey`] derives `Eq` and `Hash` over all of its
///   fields) and use [`rustc_hash::FxHashMap`], the keys are trusted internal data.
/// - [`intern()`] takes `&self`, the table sits behind a [`Mutex`], so one cache can be
///   shared by many documents across threads.
/// - Counters are atomics, and they are bumped while the table lock is held, so a
///   [`stats()`] snapshot always satisfies `requests == hits + misses`.
///
/// [`intern()`]: Self::intern
/// [`stats()`]: Self::stats
#[derive(Debug, Default)]
pub struct AttributeCache {
    table: Mutex<AttributeTable>,
    requests: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Creates a new cache ready to be shared between documents.
#[must_use]
pub fn new_shared_attribute_cache() -> Arc<AttributeCache> {
    Arc::new(AttributeCache::new())
}

impl AttributeCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the canonical instance for `key`, creating it (and computing its
    /// [`crate::FontMetrics`]) only on the first request for an equal key.
    ///
    /// A second call with an equal key returns an [`Arc`] that is [`Arc::ptr_eq`] to the
    /// first one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAttributeError`] for a malformed key. Counters are not touched in
    /// that case.
    pub fn intern(
        &self,
        key: AttributeKey,
    ) -> Result<SharedAttributesRef, InvalidAttributeError> {
        key.validate()?;

        let (created, unique_formats) = {
            let mut table = self.lock_table();
            self.requests.increment();

            if let Some(existing) = table.get(&key) {
                self.hits.increment();
                return Ok(Arc::clone(existing));
            }

            self.misses.increment();
            let created = Arc::new(SharedAttributes::new(key.clone()));
            table.insert(key, Arc::clone(&created));
            (created, table.len())
        };

        // Logged after the lock is released. % is Display, ? is Debug.
        tracing::debug!(
            message = "Created new shared attributes",
            font = %created.font(),
            size = created.size(),
            color = %created.color(),
            style = %created.style(),
            unique_formats,
        );

        Ok(created)
    }

    /// Number of distinct interned instances currently held.
    #[must_use]
    pub fn size(&self) -> usize { self.lock_table().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.lock_table().is_empty() }

    /// Checks membership without counting as a request.
    #[must_use]
    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.lock_table().contains_key(key)
    }

    /// All interned instances, ordered by key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SharedAttributesRef> {
        let mut it: Vec<_> = self.lock_table().values().cloned().collect();
        it.sort_by(|lhs, rhs| lhs.key().cmp(rhs.key()));
        it
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let _table = self.lock_table();
        CacheStats::new(self.requests.get(), self.hits.get(), self.misses.get())
    }

    /// Releases the cache's references to every interned instance and resets the
    /// counters. Glyphs that still hold a format keep it alive, but the next
    /// [`intern()`](Self::intern) of the same key creates a new instance.
    pub fn clear(&mut self) {
        let table = self.table.get_mut().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(message = "Cleared attribute cache", released = table.len());
        table.clear();
        self.requests.reset();
        self.hits.reset();
        self.misses.reset();
    }

    /// A panic while holding the lock can't leave the table half updated (each
    /// operation is a single map call), so a poisoned lock is safe to keep using.
    fn lock_table(&self) -> MutexGuard<'_, AttributeTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextStyle;
    use pretty_assertions::assert_eq;
    use std::thread;

    fn arial_black() -> AttributeKey {
        AttributeKey::new("Arial", 12, "black", TextStyle::Normal)
    }

    #[test]
    fn second_intern_returns_identical_instance() {
        let cache = AttributeCache::new();
        let first = cache.intern(arial_black()).unwrap();
        let second = cache.intern(arial_black()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn hits_and_misses_add_up() {
        let cache = AttributeCache::new();
        let keys = [
            arial_black(),
            AttributeKey::new("Arial", 18, "blue", TextStyle::Bold),
            AttributeKey::new("Times", 14, "purple", TextStyle::BoldItalic),
        ];

        // N = 10 requests over K = 3 distinct keys.
        for index in 0..10 {
            cache.intern(keys[index % keys.len()].clone()).unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.requests, 10);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hits, 7);
        assert!((stats.hit_rate - 0.7).abs() < 1e-12);
        assert_eq!(cache.size(), 3);
    }

    #[test]
    fn invalid_key_is_rejected_without_counting() {
        let cache = AttributeCache::new();
        let result = cache.intern(AttributeKey::new("Arial", 0, "black", TextStyle::Normal));

        assert_eq!(
            result.unwrap_err(),
            InvalidAttributeError::NonPositiveSize { size: 0 }
        );
        assert_eq!(cache.stats(), CacheStats::default());
        assert!(cache.is_empty());
    }

    #[test]
    fn contains_and_snapshot_do_not_count() {
        let cache = AttributeCache::new();
        cache.intern(AttributeKey::new("Times", 14, "red", TextStyle::Bold)).unwrap();
        cache.intern(arial_black()).unwrap();

        assert!(cache.contains(&arial_black()));
        let fonts: Vec<_> = cache
            .snapshot()
            .iter()
            .map(|it| it.font().to_string())
            .collect();
        assert_eq!(fonts, vec!["Arial".to_string(), "Times".to_string()]);
        assert_eq!(cache.stats().requests, 2);
    }

    #[test]
    fn clear_keeps_outstanding_references_alive() {
        let mut cache = AttributeCache::new();
        let before = cache.intern(arial_black()).unwrap();
        cache.intern(arial_black()).unwrap();

        cache.clear();
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.stats(), CacheStats::default());

        // The old handle is still valid.
        assert_eq!(before.font(), "Arial");

        // A fresh instance is created after a clear.
        let after = cache.intern(arial_black()).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn shared_cache_can_not_be_cleared_while_held() {
        let mut cache = new_shared_attribute_cache();
        let held_by_document = Arc::clone(&cache);

        assert!(Arc::get_mut(&mut cache).is_none());

        drop(held_by_document);
        let Some(exclusive) = Arc::get_mut(&mut cache) else {
            panic!("cache should be exclusively owned now");
        };
        exclusive.clear();
    }

    /// Records whether the table lock was free while an event was being handled.
    #[derive(Debug)]
    struct LockStateLayer {
        cache: Arc<AttributeCache>,
        events: Arc<AtomicU64>,
        events_with_lock_free: Arc<AtomicU64>,
    }

    impl<S: tracing_core::Subscriber> tracing_subscriber::Layer<S> for LockStateLayer {
        fn on_event(
            &self,
            _event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.events.increment();
            if self.cache.table.try_lock().is_ok() {
                self.events_with_lock_free.increment();
            }
        }
    }

    #[serial_test::serial]
    #[test]
    fn miss_is_logged_after_the_lock_is_released() {
        use tracing_subscriber::layer::SubscriberExt;

        let cache = new_shared_attribute_cache();
        let events = Arc::new(AtomicU64::new(0));
        let events_with_lock_free = Arc::new(AtomicU64::new(0));
        let subscriber = tracing_subscriber::registry().with(LockStateLayer {
            cache: Arc::clone(&cache),
            events: Arc::clone(&events),
            events_with_lock_free: Arc::clone(&events_with_lock_free),
        });

        tracing::subscriber::with_default(subscriber, || {
            cache.intern(arial_black()).unwrap();
        });

        assert_eq!(events.get(), 1);
        assert_eq!(events_with_lock_free.get(), 1);
    }

    #[test]
    fn concurrent_interning_keeps_exact_counts() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 100;

        let cache = new_shared_attribute_cache();
        let keys = vec![
            arial_black(),
            AttributeKey::new("Arial", 12, "red", TextStyle::Bold),
            AttributeKey::new("Courier", 10, "green", TextStyle::Italic),
        ];

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let keys = keys.clone();
                thread::spawn(move || {
                    let mut last = Vec::new();
                    for _ in 0..ROUNDS {
                        last = keys
                            .iter()
                            .map(|key| cache.intern(key.clone()).unwrap())
                            .collect();
                    }
                    last
                })
            })
            .collect();

        let results: Vec<Vec<SharedAttributesRef>> =
            handles.into_iter().map(|it| it.join().unwrap()).collect();

        // Every thread saw the same instance for each key.
        for per_thread in &results[1..] {
            for (lhs, rhs) in results[0].iter().zip(per_thread) {
                assert!(Arc::ptr_eq(lhs, rhs));
            }
        }

        let total = (THREADS * ROUNDS * keys.len()) as u64;
        let stats = cache.stats();
        assert_eq!(stats.requests, total);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hits, total - 3);
    }
}
