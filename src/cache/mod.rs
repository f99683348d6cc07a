//! Page cache for search result pages
//!
//! This module keeps network I/O away from extraction:
//! - Cached pages younger than the freshness window are served as-is
//! - Anything older (or missing) is reported as a miss so the caller refetches
//! - Refetched pages overwrite the cached copy
//!
//! Entries are never evicted; a crawl touches a bounded number of pages.

mod freshness;
mod fs_store;
mod traits;

pub use freshness::{is_fresh, Clock, SystemClock};
pub use fs_store::FsPageStore;
pub use traits::{CachedPage, PageStore, StorageError, StorageResult};

use crate::config::CacheConfig;
use chrono::Duration;

/// Freshness-aware view over a page store
#[derive(Debug)]
pub struct PageCache<S = FsPageStore, C = SystemClock> {
    store: S,
    clock: C,
    window: Duration,
}

impl PageCache<FsPageStore, SystemClock> {
    /// Opens the on-disk cache described by the configuration
    pub fn from_config(config: &CacheConfig) -> StorageResult<Self> {
        let store = FsPageStore::open(&config.directory)?;
        // chrono durations top out at i64::MAX milliseconds
        let minutes = i64::try_from(config.freshness_minutes)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 60_000);
        let cache = Self::new(store, SystemClock, Duration::minutes(minutes));
        tracing::debug!(
            "Page cache at {} (fresh for {} minutes)",
            cache.store.directory().display(),
            cache.window().num_minutes()
        );
        Ok(cache)
    }
}

impl<S: PageStore, C: Clock> PageCache<S, C> {
    pub fn new(store: S, clock: C, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
        }
    }

    /// Returns the cached HTML for a page if it is still fresh
    ///
    /// # Returns
    ///
    /// * `Ok(Some(html))` - Cached copy younger than the freshness window
    /// * `Ok(None)` - No cached copy, or the copy is stale
    /// * `Err(StorageError)` - The store could not be read
    pub fn lookup_fresh(&self, page: u32) -> StorageResult<Option<String>> {
        let Some(cached) = self.store.read(page)? else {
            tracing::debug!("No cached copy of page {}", page);
            return Ok(None);
        };

        if is_fresh(self.clock.now(), cached.written_at, self.window) {
            Ok(Some(cached.html))
        } else {
            tracing::debug!(
                "Cached copy of page {} is stale (written {})",
                page,
                cached.written_at
            );
            Ok(None)
        }
    }

    /// Stores freshly downloaded HTML for a page
    pub fn store(&mut self, page: u32, html: &str) -> StorageResult<()> {
        self.store.write(page, html)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Store that stamps every write with a settable time
    #[derive(Default)]
    struct MemoryStore {
        pages: HashMap<u32, CachedPage>,
        write_time: Option<DateTime<Utc>>,
        reads: Cell<usize>,
    }

    impl PageStore for MemoryStore {
        fn read(&self, page: u32) -> StorageResult<Option<CachedPage>> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.pages.get(&page).cloned())
        }

        fn write(&mut self, page: u32, html: &str) -> StorageResult<()> {
            let written_at = self.write_time.unwrap_or_else(Utc::now);
            self.pages.insert(
                page,
                CachedPage {
                    page,
                    html: html.to_string(),
                    written_at,
                },
            );
            Ok(())
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn cache_at(now: DateTime<Utc>, written: DateTime<Utc>) -> PageCache<MemoryStore, FixedClock> {
        let store = MemoryStore {
            write_time: Some(written),
            ..Default::default()
        };
        PageCache::new(store, FixedClock(now), Duration::hours(1))
    }

    #[test]
    fn test_miss_when_empty() {
        let cache = cache_at(noon(), noon());
        assert_eq!(cache.lookup_fresh(1).unwrap(), None);
    }

    #[test]
    fn test_fresh_hit_returns_identical_content() {
        let written = noon() - Duration::minutes(20);
        let mut cache = cache_at(noon(), written);
        let html = "<div class=\"card product\">\u{a0}999,00 â‚¬</div>";

        cache.store(1, html).unwrap();

        assert_eq!(cache.lookup_fresh(1).unwrap().as_deref(), Some(html));
        assert_eq!(cache.inner().reads.get(), 1);
    }

    #[test]
    fn test_stale_entry_is_a_miss() {
        let written = noon() - Duration::minutes(61);
        let mut cache = cache_at(noon(), written);

        cache.store(1, "<html>old</html>").unwrap();

        assert_eq!(cache.lookup_fresh(1).unwrap(), None);
    }

    #[test]
    fn test_exact_window_age_is_stale() {
        let written = noon() - Duration::hours(1);
        let mut cache = cache_at(noon(), written);

        cache.store(4, "<html></html>").unwrap();

        assert_eq!(cache.lookup_fresh(4).unwrap(), None);
    }

    #[test]
    fn test_pages_are_keyed_independently() {
        let mut cache = cache_at(noon(), noon());

        cache.store(1, "one").unwrap();
        cache.store(2, "two").unwrap();

        assert_eq!(cache.lookup_fresh(1).unwrap().as_deref(), Some("one"));
        assert_eq!(cache.lookup_fresh(2).unwrap().as_deref(), Some("two"));
        assert_eq!(cache.lookup_fresh(3).unwrap(), None);
    }

    #[test]
    fn test_from_config_uses_minutes() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CacheConfig {
            directory: dir.path().join("cache").to_string_lossy().into_owned(),
            freshness_minutes: 90,
        };

        let cache = PageCache::from_config(&config).unwrap();

        assert_eq!(cache.window(), Duration::minutes(90));
        assert!(dir.path().join("cache").is_dir());
    }
}
