//! Clock authority implementation
//!
//! The real-time clock is the single source of displayed time. Network
//! sync is an intermittent correction of it. When sync keeps failing, the
//! last synced time is pushed forward one minute per consecutive failure
//! and written to the RTC, so the display drifts rather than stalls.

use super::calendar::{CalendarTime, TimeText, UNKNOWN_TIME};
use crate::traits::{RealTimeClock, TimeSource};
use crate::Timestamp;

/// What a sync attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Last sync still fresh, nothing attempted
    Skipped,
    /// Authoritative time written to the RTC
    Synced,
    /// Sync failed, drift-corrected time written to the RTC
    Drifted { minutes: u32 },
    /// Sync failed and there is no prior sync to drift from
    Unsynced,
}

/// Owner of the authoritative clock state
#[derive(Debug, Clone)]
pub struct ClockAuthority {
    /// Time from the last successful sync
    last_known: Option<CalendarTime>,
    /// Monotonic time of the last successful sync
    last_sync_at: Option<Timestamp>,
    /// Failed syncs since the last success
    consecutive_sync_failures: u32,
    sync_ttl_ms: u64,
}

impl ClockAuthority {
    /// Create an authority that has never synced
    pub const fn new(sync_ttl_ms: u64) -> Self {
        Self {
            last_known: None,
            last_sync_at: None,
            consecutive_sync_failures: 0,
            sync_ttl_ms,
        }
    }

    pub fn last_known(&self) -> Option<&CalendarTime> {
        self.last_known.as_ref()
    }

    pub fn last_sync_at(&self) -> Option<Timestamp> {
        self.last_sync_at
    }

    pub fn consecutive_sync_failures(&self) -> u32 {
        self.consecutive_sync_failures
    }

    /// Check if a sync is due at `now`
    pub fn needs_sync(&self, now: Timestamp) -> bool {
        match self.last_sync_at {
            Some(at) => now.saturating_sub(at) >= self.sync_ttl_ms,
            None => true,
        }
    }

    /// Current time as `HH:MM`, syncing first when due or forced
    ///
    /// The result always comes from reading the RTC back, whatever the
    /// sync did. If the RTC cannot be read, returns `"??:??"`.
    pub fn current_time_string<T, C>(
        &mut self,
        now: Timestamp,
        force_sync: bool,
        source: &mut T,
        rtc: &mut C,
    ) -> TimeText
    where
        T: TimeSource,
        C: RealTimeClock,
    {
        if force_sync || self.needs_sync(now) {
            self.sync(now, source, rtc);
        }

        match rtc.read() {
            Ok(time) => time.hh_mm(),
            Err(e) => {
                warn!("RTC read failed: {}", e);
                let mut text = TimeText::new();
                let _ = text.push_str(UNKNOWN_TIME);
                text
            }
        }
    }

    /// Attempt a sync now, regardless of when the last one happened
    pub fn sync<T, C>(&mut self, now: Timestamp, source: &mut T, rtc: &mut C) -> SyncOutcome
    where
        T: TimeSource,
        C: RealTimeClock,
    {
        let fetched = source
            .fetch_time()
            .and_then(|sample| CalendarTime::parse_iso8601(&sample.datetime, sample.source_weekday));

        match fetched {
            Ok(time) => {
                if let Err(e) = rtc.write(&time) {
                    warn!("RTC write failed after sync: {}", e);
                }
                info!(
                    "Time synced: {}-{}-{} {}:{}:{}",
                    time.year,
                    time.month,
                    time.day,
                    time.hour,
                    time.minute,
                    time.second
                );
                self.last_known = Some(time);
                self.last_sync_at = Some(now);
                self.consecutive_sync_failures = 0;
                SyncOutcome::Synced
            }
            Err(e) => {
                self.consecutive_sync_failures = self.consecutive_sync_failures.saturating_add(1);
                warn!(
                    "Time sync failed ({}), {} in a row",
                    e,
                    self.consecutive_sync_failures
                );

                let Some(last) = self.last_known else {
                    return SyncOutcome::Unsynced;
                };

                let minutes = self.consecutive_sync_failures;
                let drifted = last.with_drift(minutes);
                if let Err(e) = rtc.write(&drifted) {
                    warn!("RTC write failed for drifted time: {}", e);
                }
                info!("Using drifted time {}:{} (+{}min)", drifted.hour, drifted.minute, minutes);
                SyncOutcome::Drifted { minutes }
            }
        }
    }
}
