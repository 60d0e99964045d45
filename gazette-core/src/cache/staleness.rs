//! Staleness cache implementation
//!
//! A cached value is refreshed once its age reaches the TTL. A failed
//! refresh keeps the previous value and leaves `fetched_at` untouched, so
//! the next access retries. Stale-but-present always beats absent.

use crate::traits::FetchError;
use crate::Timestamp;

/// A value together with the time it was fetched
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CachedValue<T> {
    pub value: T,
    /// Monotonic time of the successful fetch
    pub fetched_at: Timestamp,
}

/// How a lookup was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Freshness {
    /// Value still fresh, source not contacted
    Hit,
    /// Source contacted and a new value stored
    Refreshed,
    /// Source failed, previous value returned
    Degraded,
    /// Source failed and nothing has ever been cached
    Missing,
}

impl Freshness {
    /// Check if the source was contacted for this lookup
    pub fn fetched(&self) -> bool {
        !matches!(self, Freshness::Hit)
    }
}

/// Result of a cache lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup<'a, T> {
    value: Option<&'a T>,
    freshness: Freshness,
}

impl<'a, T> Lookup<'a, T> {
    /// The resolved value, if any was ever fetched
    pub fn value(&self) -> Option<&'a T> {
        self.value
    }

    /// The resolved value, or `placeholder` if nothing was ever fetched
    pub fn value_or(&self, placeholder: &'a T) -> &'a T {
        self.value.unwrap_or(placeholder)
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }
}

/// Lookup counters, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheStats {
    /// Lookups answered without contacting the source
    pub hits: u32,
    /// Successful fetches
    pub refreshes: u32,
    /// Failed fetches
    pub failures: u32,
}

/// Cache for a single source
#[derive(Debug, Clone)]
pub struct StalenessCache<T> {
    entry: Option<CachedValue<T>>,
    ttl_ms: u64,
    stats: CacheStats,
}

impl<T> StalenessCache<T> {
    /// Create an empty cache with the given time-to-live
    pub const fn new(ttl_ms: u64) -> Self {
        Self {
            entry: None,
            ttl_ms,
            stats: CacheStats {
                hits: 0,
                refreshes: 0,
                failures: 0,
            },
        }
    }

    /// Configured time-to-live in milliseconds
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Current entry without triggering a refresh
    pub fn peek(&self) -> Option<&CachedValue<T>> {
        self.entry.as_ref()
    }

    /// Age of the cached value
    ///
    /// A monotonic source that went backwards yields an age of zero.
    pub fn age(&self, now: Timestamp) -> Option<u64> {
        self.entry
            .as_ref()
            .map(|e| now.saturating_sub(e.fetched_at))
    }

    /// Check if the next lookup at `now` would contact the source
    pub fn is_stale(&self, now: Timestamp) -> bool {
        match self.age(now) {
            Some(age) => age >= self.ttl_ms,
            None => true,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Return the cached value, fetching first if it is stale or absent
    pub fn get_or_refresh<F>(&mut self, now: Timestamp, fetch: F) -> Lookup<'_, T>
    where
        F: FnOnce() -> Result<T, FetchError>,
    {
        if self.is_stale(now) {
            self.refresh(now, fetch)
        } else {
            self.stats.hits = self.stats.hits.saturating_add(1);
            Lookup {
                value: self.entry.as_ref().map(|e| &e.value),
                freshness: Freshness::Hit,
            }
        }
    }

    /// Fetch regardless of age
    pub fn force_refresh<F>(&mut self, now: Timestamp, fetch: F) -> Lookup<'_, T>
    where
        F: FnOnce() -> Result<T, FetchError>,
    {
        self.refresh(now, fetch)
    }

    fn refresh<F>(&mut self, now: Timestamp, fetch: F) -> Lookup<'_, T>
    where
        F: FnOnce() -> Result<T, FetchError>,
    {
        let freshness = match fetch() {
            Ok(value) => {
                self.stats.refreshes = self.stats.refreshes.saturating_add(1);
                self.entry = Some(CachedValue {
                    value,
                    fetched_at: now,
                });
                Freshness::Refreshed
            }
            Err(_) => {
                self.stats.failures = self.stats.failures.saturating_add(1);
                // fetched_at only moves on success
                if self.entry.is_some() {
                    Freshness::Degraded
                } else {
                    Freshness::Missing
                }
            }
        };

        Lookup {
            value: self.entry.as_ref().map(|e| &e.value),
            freshness,
        }
    }
}
