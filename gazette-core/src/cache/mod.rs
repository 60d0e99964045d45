//! Per-source staleness cache
//!
//! Decides, each cycle, whether a source must be contacted or its last
//! good value reused.

pub mod staleness;

pub use staleness::{CacheStats, CachedValue, Freshness, Lookup, StalenessCache};
