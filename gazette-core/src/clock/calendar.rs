//! Calendar time fields and arithmetic

use core::fmt::Write;
use core::str::FromStr;

use heapless::String;

use crate::traits::FetchError;

/// Displayed when the real-time clock cannot be read
pub const UNKNOWN_TIME: &str = "??:??";

/// `HH:MM` display string
pub type TimeText = String<8>;

/// Broken-down wall-clock time as held by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31, may exceed the month length after drift correction
    pub day: u8,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

/// Convert a Sunday-based weekday (0 = Sunday) to Monday-based (0 = Monday)
///
/// Returns `None` for values outside 0..=6.
pub fn weekday_from_sunday_based(source: u8) -> Option<u8> {
    match source {
        0 => Some(6),
        1..=6 => Some(source - 1),
        _ => None,
    }
}

impl CalendarTime {
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        weekday: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
        }
    }

    /// Parse an ISO-8601 datetime such as `2024-01-31T23:59:00.123456+00:00`
    ///
    /// The fractional part and UTC offset are ignored; the fields are taken
    /// as local time. `source_weekday` counts from Sunday.
    pub fn parse_iso8601(datetime: &str, source_weekday: u8) -> Result<Self, FetchError> {
        let (date, time) = datetime.trim().split_once('T').ok_or(FetchError::Parse)?;

        let mut date_parts = date.splitn(3, '-');
        let year: u16 = field(date_parts.next())?;
        let month: u8 = field(date_parts.next())?;
        let day: u8 = field(date_parts.next())?;

        let clock = time
            .split(|c: char| matches!(c, '.' | '+' | '-' | 'Z' | 'z'))
            .next()
            .unwrap_or("");
        let mut time_parts = clock.splitn(3, ':');
        let hour: u8 = field(time_parts.next())?;
        let minute: u8 = field(time_parts.next())?;
        let second: u8 = field(time_parts.next())?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 {
            return Err(FetchError::Parse);
        }
        if second > 60 {
            return Err(FetchError::Parse);
        }

        let weekday = weekday_from_sunday_based(source_weekday).ok_or(FetchError::Parse)?;

        Ok(Self {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            // Leap second folds into :59
            second: second.min(59),
        })
    }

    /// Advance by whole minutes, carrying into hour and day only
    ///
    /// Month and year never roll over and the weekday is left as is:
    /// 23:59 on the 31st plus two minutes gives 00:01 on the "32nd".
    pub fn with_drift(&self, minutes: u32) -> Self {
        let minute = u32::from(self.minute).saturating_add(minutes);
        let hour = u32::from(self.hour) + minute / 60;
        let day = u32::from(self.day) + hour / 24;

        Self {
            minute: (minute % 60) as u8,
            hour: (hour % 24) as u8,
            day: day.min(u32::from(u8::MAX)) as u8,
            ..*self
        }
    }

    /// Format as `HH:MM`
    pub fn hh_mm(&self) -> TimeText {
        let mut text = TimeText::new();
        // Two two-digit fields always fit
        let _ = write!(text, "{:02}:{:02}", self.hour, self.minute);
        text
    }
}

fn field<T: FromStr>(part: Option<&str>) -> Result<T, FetchError> {
    part.filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|p| p.parse().ok())
        .ok_or(FetchError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_conversion() {
        assert_eq!(weekday_from_sunday_based(0), Some(6));
        assert_eq!(weekday_from_sunday_based(1), Some(0));
        assert_eq!(weekday_from_sunday_based(6), Some(5));
        assert_eq!(weekday_from_sunday_based(7), None);
    }

    #[test]
    fn test_parse_full_timestamp() {
        let t = CalendarTime::parse_iso8601("2024-01-31T23:59:07.123456+00:00", 3).unwrap();
        assert_eq!(t, CalendarTime::new(2024, 1, 31, 2, 23, 59, 7));
    }

    #[test]
    fn test_parse_without_fraction_or_offset() {
        let t = CalendarTime::parse_iso8601("2025-06-01T08:05:00", 0).unwrap();
        assert_eq!(t, CalendarTime::new(2025, 6, 1, 6, 8, 5, 0));

        let t = CalendarTime::parse_iso8601("2025-06-01T08:05:00Z", 0).unwrap();
        assert_eq!(t.hour, 8);

        let t = CalendarTime::parse_iso8601("2025-06-01T08:05:00-05:00", 0).unwrap();
        assert_eq!((t.hour, t.minute, t.second), (8, 5, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            CalendarTime::parse_iso8601("not a date", 1),
            Err(FetchError::Parse)
        );
        assert_eq!(
            CalendarTime::parse_iso8601("2024-13-01T00:00:00", 1),
            Err(FetchError::Parse)
        );
        assert_eq!(
            CalendarTime::parse_iso8601("2024-01-01T24:00:00", 1),
            Err(FetchError::Parse)
        );
        assert_eq!(
            CalendarTime::parse_iso8601("2024-01-01T10:00", 1),
            Err(FetchError::Parse)
        );
        assert_eq!(
            CalendarTime::parse_iso8601("2024-01-01T10:00:00", 7),
            Err(FetchError::Parse)
        );
        assert_eq!(
            CalendarTime::parse_iso8601("2024-01-+1T10:00:00", 1),
            Err(FetchError::Parse)
        );
    }

    #[test]
    fn test_leap_second_folded() {
        let t = CalendarTime::parse_iso8601("2016-12-31T23:59:60", 6).unwrap();
        assert_eq!(t.second, 59);
    }

    #[test]
    fn test_drift_carries_into_day_without_month_rollover() {
        let last = CalendarTime::new(2024, 1, 31, 2, 23, 59, 0);
        let drifted = last.with_drift(2);

        assert_eq!(drifted.minute, 1);
        assert_eq!(drifted.hour, 0);
        assert_eq!(drifted.day, 32);
        assert_eq!(drifted.month, 1);
        assert_eq!(drifted.year, 2024);
        assert_eq!(drifted.weekday, 2);
        assert_eq!(drifted.second, 0);
    }

    #[test]
    fn test_drift_within_hour() {
        let last = CalendarTime::new(2024, 5, 10, 4, 9, 15, 30);
        assert_eq!(last.with_drift(3), CalendarTime::new(2024, 5, 10, 4, 9, 18, 30));
        assert_eq!(last.with_drift(0), last);
    }

    #[test]
    fn test_hh_mm() {
        assert_eq!(CalendarTime::new(2024, 1, 1, 0, 7, 5, 0).hh_mm().as_str(), "07:05");
        assert_eq!(CalendarTime::new(2024, 1, 1, 0, 23, 59, 0).hh_mm().as_str(), "23:59");
    }
}
