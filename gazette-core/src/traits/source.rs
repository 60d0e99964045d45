//! Network data source traits

use core::fmt;

use heapless::String;

use crate::headlines::HeadlineBatch;
use crate::weather::WeatherReading;

/// Maximum length of an ISO-8601 datetime string from a time source
pub const MAX_DATETIME_LEN: usize = 40;

/// Errors that can occur while fetching from a network source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Request could not be sent or the connection dropped
    Network,
    /// Response arrived but could not be understood
    Parse,
    /// Request did not complete in time
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network => f.write_str("network failure"),
            FetchError::Parse => f.write_str("unparseable response"),
            FetchError::Timeout => f.write_str("request timed out"),
        }
    }
}

/// Authoritative time as reported by a time service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSample {
    /// Local datetime, e.g. `2024-01-31T23:59:00.123456+00:00`
    pub datetime: String<MAX_DATETIME_LEN>,
    /// Day of week as the service counts it (0 = Sunday .. 6 = Saturday)
    pub source_weekday: u8,
}

/// Source of headline batches (e.g. an RSS feed)
pub trait HeadlineSource {
    /// Fetch up to `max_count` headlines, most important first
    ///
    /// An empty batch is a successful fetch, not an error.
    fn fetch_headlines(&mut self, max_count: usize) -> Result<HeadlineBatch, FetchError>;
}

/// Source of current weather conditions
pub trait WeatherSource {
    fn fetch_weather(&mut self) -> Result<WeatherReading, FetchError>;
}

/// Source of authoritative wall-clock time
pub trait TimeSource {
    fn fetch_time(&mut self) -> Result<TimeSample, FetchError>;
}

impl<T: HeadlineSource + ?Sized> HeadlineSource for &mut T {
    fn fetch_headlines(&mut self, max_count: usize) -> Result<HeadlineBatch, FetchError> {
        T::fetch_headlines(self, max_count)
    }
}

impl<T: WeatherSource + ?Sized> WeatherSource for &mut T {
    fn fetch_weather(&mut self) -> Result<WeatherReading, FetchError> {
        T::fetch_weather(self)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn fetch_time(&mut self) -> Result<TimeSample, FetchError> {
        T::fetch_time(self)
    }
}
