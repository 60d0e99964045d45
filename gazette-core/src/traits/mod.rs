//! Collaborator traits
//!
//! These traits define the interface between the display logic and the
//! network, clock and panel implementations it is deployed with.

pub mod renderer;
pub mod rtc;
pub mod source;
pub mod time;
pub mod uplink;

pub use renderer::Renderer;
pub use rtc::{ClockError, RealTimeClock};
pub use source::{FetchError, HeadlineSource, TimeSample, TimeSource, WeatherSource, MAX_DATETIME_LEN};
pub use time::Monotonic;
pub use uplink::{Uplink, UplinkError};
