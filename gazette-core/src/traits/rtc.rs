//! Real-time clock trait

use core::fmt;

use crate::clock::CalendarTime;

/// Errors that can occur with the real-time clock device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Device absent or not responding
    Unavailable,
    /// Time fields outside what the device can hold
    InvalidTime,
    /// Device lost power and holds no valid time
    Unset,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::Unavailable => f.write_str("clock device unavailable"),
            ClockError::InvalidTime => f.write_str("time out of range for clock device"),
            ClockError::Unset => f.write_str("clock device not set"),
        }
    }
}

/// Trait for the battery-backed real-time clock
///
/// The RTC is the single source of displayed time. Writes are expected to
/// be observable on the next read.
pub trait RealTimeClock {
    /// Set the clock
    fn write(&mut self, time: &CalendarTime) -> Result<(), ClockError>;

    /// Read the clock
    ///
    /// Takes `&mut self` because reading typically requires bus access.
    fn read(&mut self) -> Result<CalendarTime, ClockError>;
}

impl<T: RealTimeClock + ?Sized> RealTimeClock for &mut T {
    fn write(&mut self, time: &CalendarTime) -> Result<(), ClockError> {
        T::write(self, time)
    }

    fn read(&mut self) -> Result<CalendarTime, ClockError> {
        T::read(self)
    }
}
