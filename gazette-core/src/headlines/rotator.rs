//! Headline rotator
//!
//! Wraps a staleness cache holding the current batch and steps through it
//! one headline per call, independent of how often the batch is fetched.

use super::batch::HeadlineBatch;
use crate::cache::{CacheStats, Freshness, StalenessCache};
use crate::traits::HeadlineSource;
use crate::Timestamp;

/// Shown when the latest batch is empty
pub const NO_HEADLINES: &str = "No headlines found";

/// Shown when no batch has ever been fetched
pub const HEADLINES_UNAVAILABLE: &str = "Failed to fetch news";

/// Rotates through the cached headline batch
#[derive(Debug, Clone)]
pub struct HeadlineRotator {
    cache: StalenessCache<HeadlineBatch>,
    /// Index of the next headline to show
    cursor: usize,
    /// Batch size requested from the source
    max_count: usize,
}

impl HeadlineRotator {
    /// Create a rotator with no batch yet
    pub const fn new(ttl_ms: u64, max_count: usize) -> Self {
        Self {
            cache: StalenessCache::new(ttl_ms),
            cursor: 0,
            max_count,
        }
    }

    /// Next headline, fetching a new batch if the current one is stale
    pub fn next_headline<S: HeadlineSource>(&mut self, now: Timestamp, source: &mut S) -> &str {
        self.advance(now, source, false)
    }

    /// Next headline, fetching a new batch regardless of age
    pub fn force_next_headline<S: HeadlineSource>(
        &mut self,
        now: Timestamp,
        source: &mut S,
    ) -> &str {
        self.advance(now, source, true)
    }

    /// Index of the headline the next call will return
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Currently cached batch, if any
    pub fn batch(&self) -> Option<&HeadlineBatch> {
        self.cache.peek().map(|e| &e.value)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn advance<S: HeadlineSource>(&mut self, now: Timestamp, source: &mut S, force: bool) -> &str {
        let max_count = self.max_count;
        let fetch = || source.fetch_headlines(max_count);
        let lookup = if force {
            self.cache.force_refresh(now, fetch)
        } else {
            self.cache.get_or_refresh(now, fetch)
        };
        let freshness = lookup.freshness();

        let Some(batch) = lookup.value() else {
            warn!("No headlines fetched yet");
            return HEADLINES_UNAVAILABLE;
        };

        match freshness {
            Freshness::Refreshed => {
                info!("Fetched {} headlines", batch.len());
                self.cursor = 0;
            }
            Freshness::Degraded => {
                warn!("Headline fetch failed, rotating cached batch");
            }
            Freshness::Hit | Freshness::Missing => {}
        }

        if batch.is_empty() {
            return NO_HEADLINES;
        }

        let index = self.cursor % batch.len();
        self.cursor = (index + 1) % batch.len();
        batch.get(index).unwrap_or(NO_HEADLINES)
    }
}
