//! Cycle execution
//!
//! All cache and clock state lives in one [`StationContext`] owned by the
//! [`CycleScheduler`]; the collaborators are passed in at construction and
//! borrowed for each call. There is no global state.

use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;

use super::state::{Event, ScheduleState};
use crate::cache::{Freshness, StalenessCache};
use crate::clock::{ClockAuthority, TimeText};
use crate::config::{ConfigError, RefreshPolicy, StationConfig};
use crate::headlines::{Headline, HeadlineRotator};
use crate::traits::{
    HeadlineSource, Monotonic, RealTimeClock, Renderer, TimeSource, Uplink, UplinkError,
    WeatherSource,
};
use crate::uplink;
use crate::weather::{self, WeatherReading, WeatherText};
use crate::Timestamp;

/// The three strings handed to the renderer for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub time: TimeText,
    pub headline: Headline,
    pub weather: WeatherText,
}

/// External collaborators the scheduler drives
pub struct Collaborators<H, W, T, C, R> {
    pub headlines: H,
    pub weather: W,
    pub time: T,
    pub rtc: C,
    pub renderer: R,
}

/// Cache, clock and schedule state for the whole display
#[derive(Debug, Clone)]
pub struct StationContext {
    pub weather: StalenessCache<WeatherReading>,
    pub headlines: HeadlineRotator,
    pub clock: ClockAuthority,
    pub schedule: ScheduleState,
}

impl StationContext {
    /// Create empty state from configuration
    pub fn new(config: &StationConfig) -> Self {
        Self {
            weather: StalenessCache::new(config.cache.weather_ttl_ms()),
            headlines: HeadlineRotator::new(
                config.cache.headlines_ttl_ms(),
                usize::from(config.headlines.max_count),
            ),
            clock: ClockAuthority::new(config.cache.time_sync_ttl_ms()),
            schedule: ScheduleState::new(config.schedule.renders_per_refresh),
        }
    }

    /// Resolve time, headline and weather for one cycle
    ///
    /// With `force`, every source is contacted regardless of TTL.
    pub fn resolve<H, W, T, C, R>(
        &mut self,
        now: Timestamp,
        force: bool,
        io: &mut Collaborators<H, W, T, C, R>,
    ) -> Frame
    where
        H: HeadlineSource,
        W: WeatherSource,
        T: TimeSource,
        C: RealTimeClock,
    {
        let time = self
            .clock
            .current_time_string(now, force, &mut io.time, &mut io.rtc);

        let next = if force {
            self.headlines.force_next_headline(now, &mut io.headlines)
        } else {
            self.headlines.next_headline(now, &mut io.headlines)
        };
        let mut headline = Headline::new();
        // Cached headlines are already bounded to capacity
        let _ = headline.push_str(next);

        let source = &mut io.weather;
        let fetch = || source.fetch_weather();
        let lookup = if force {
            self.weather.force_refresh(now, fetch)
        } else {
            self.weather.get_or_refresh(now, fetch)
        };
        match lookup.freshness() {
            Freshness::Refreshed => debug!("Weather refreshed"),
            Freshness::Degraded => warn!("Weather fetch failed, showing cached reading"),
            Freshness::Missing => warn!("Weather fetch failed, nothing cached"),
            Freshness::Hit => {}
        }
        let weather = lookup
            .value()
            .map(WeatherReading::summary)
            .unwrap_or_else(weather::unavailable);

        Frame {
            time,
            headline,
            weather,
        }
    }
}

/// Refresh/render loop
pub struct CycleScheduler<H, W, T, C, R> {
    config: StationConfig,
    context: StationContext,
    io: Collaborators<H, W, T, C, R>,
}

impl<H, W, T, C, R> CycleScheduler<H, W, T, C, R>
where
    H: HeadlineSource,
    W: WeatherSource,
    T: TimeSource,
    C: RealTimeClock,
    R: Renderer,
{
    /// Create a scheduler in the refresh phase
    pub fn new(
        config: StationConfig,
        io: Collaborators<H, W, T, C, R>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let context = StationContext::new(&config);
        Ok(Self {
            config,
            context,
            io,
        })
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn context(&self) -> &StationContext {
        &self.context
    }

    pub fn collaborators(&self) -> &Collaborators<H, W, T, C, R> {
        &self.io
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators<H, W, T, C, R> {
        &mut self.io
    }

    /// Run one cycle: resolve all three strings and show them
    ///
    /// On a refresh cycle with [`RefreshPolicy::Force`] every source is
    /// refetched; the forced fetches double as this cycle's lookups, so no
    /// source is contacted twice.
    pub fn step(&mut self, now: Timestamp) -> Frame {
        let schedule = &mut self.context.schedule;
        let refreshing = schedule.is_refresh_due();
        if refreshing {
            info!("Refresh after {} cycles", schedule.cycle_count());
            schedule.handle(Event::RefreshComplete {
                renders: self.config.schedule.renders_per_refresh,
            });
        }
        let force = refreshing && self.config.schedule.refresh_policy == RefreshPolicy::Force;

        let frame = self.context.resolve(now, force, &mut self.io);
        self.io
            .renderer
            .show(&frame.time, &frame.headline, &frame.weather);
        self.context.schedule.handle(Event::FrameShown);

        frame
    }

    /// Run one cycle, then sleep for the render interval
    pub async fn tick<M, D>(&mut self, clock: &M, delay: &mut D) -> Frame
    where
        M: Monotonic,
        D: DelayNs,
    {
        let frame = self.step(clock.now_ms());
        delay
            .delay_ms(self.config.schedule.render_interval_ms())
            .await;
        frame
    }

    /// Bring up the uplink, then cycle forever
    ///
    /// Returns only if the uplink cannot be established.
    pub async fn run<U, M, D>(
        &mut self,
        uplink: &mut U,
        clock: &M,
        delay: &mut D,
    ) -> Result<Infallible, UplinkError>
    where
        U: Uplink,
        M: Monotonic,
        D: DelayNs,
    {
        uplink::establish(uplink, delay, &self.config.uplink).await?;
        info!("Display loop started");

        loop {
            self.tick(clock, delay).await;
        }
    }
}
