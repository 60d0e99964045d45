//! Clock authority
//!
//! Keeps the real-time clock close to authoritative network time, and
//! keeps it moving forward when sync fails.

pub mod authority;
pub mod calendar;

pub use authority::{ClockAuthority, SyncOutcome};
pub use calendar::{weekday_from_sunday_based, CalendarTime, TimeText, UNKNOWN_TIME};
