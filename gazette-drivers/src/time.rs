//! Monotonic time from the embassy time driver

use embassy_time::Instant;
use gazette_core::traits::Monotonic;
use gazette_core::Timestamp;

/// Milliseconds since boot, as counted by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMonotonic;

impl Monotonic for EmbassyMonotonic {
    fn now_ms(&self) -> Timestamp {
        Instant::now().as_millis()
    }
}
