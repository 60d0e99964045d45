//! Configuration type definitions
//!
//! Every field has a default matching the stock display, so a config file
//! only needs to list what it changes.

use core::fmt;

use crate::headlines::MAX_HEADLINES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid TOML or has wrongly typed values
    Parse,
    /// A value is out of range (names the offending field)
    InvalidValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse => f.write_str("malformed configuration"),
            ConfigError::InvalidValue(field) => write!(f, "invalid value for {}", field),
        }
    }
}

/// How the periodic refresh treats cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RefreshPolicy {
    /// Refetch every source on refresh, regardless of TTL
    #[default]
    Force,
    /// Let each source refetch when its own TTL lapses
    Natural,
}

/// Per-source time-to-live settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Weather reading TTL (seconds)
    pub weather_ttl_s: u32,
    /// Headline batch TTL (seconds)
    pub headlines_ttl_s: u32,
    /// Time sync interval (seconds)
    pub time_sync_ttl_s: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weather_ttl_s: 10 * 60,
            headlines_ttl_s: 30 * 60,
            time_sync_ttl_s: 5 * 60,
        }
    }
}

impl CacheConfig {
    pub fn weather_ttl_ms(&self) -> u64 {
        u64::from(self.weather_ttl_s) * 1000
    }

    pub fn headlines_ttl_ms(&self) -> u64 {
        u64::from(self.headlines_ttl_s) * 1000
    }

    pub fn time_sync_ttl_ms(&self) -> u64 {
        u64::from(self.time_sync_ttl_s) * 1000
    }
}

/// Render loop settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Pause between renders (seconds)
    pub render_interval_s: u32,
    /// Renders between refreshes
    pub renders_per_refresh: u8,
    /// Whether refresh bypasses TTLs
    pub refresh_policy: RefreshPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            render_interval_s: 60,
            renders_per_refresh: 10,
            refresh_policy: RefreshPolicy::Force,
        }
    }
}

impl ScheduleConfig {
    pub fn render_interval_ms(&self) -> u32 {
        self.render_interval_s.saturating_mul(1000)
    }
}

/// Headline feed settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeadlineConfig {
    /// Headlines requested per fetch
    pub max_count: u8,
}

impl Default for HeadlineConfig {
    fn default() -> Self {
        Self { max_count: 10 }
    }
}

/// Network association settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UplinkConfig {
    /// Give up associating after this long (seconds)
    pub timeout_s: u32,
    /// Association status poll interval (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            timeout_s: 10,
            poll_interval_ms: 1000,
        }
    }
}

/// Complete station configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StationConfig {
    pub cache: CacheConfig,
    pub schedule: ScheduleConfig,
    pub headlines: HeadlineConfig,
    pub uplink: UplinkConfig,
}

impl StationConfig {
    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schedule.render_interval_s == 0 {
            return Err(ConfigError::InvalidValue("schedule.render_interval_s"));
        }
        if self.schedule.renders_per_refresh == 0 {
            return Err(ConfigError::InvalidValue("schedule.renders_per_refresh"));
        }
        if self.headlines.max_count == 0 || usize::from(self.headlines.max_count) > MAX_HEADLINES {
            return Err(ConfigError::InvalidValue("headlines.max_count"));
        }
        if self.uplink.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue("uplink.poll_interval_ms"));
        }
        Ok(())
    }
}
