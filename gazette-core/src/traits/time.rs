//! Monotonic time trait

use crate::Timestamp;

/// Source of monotonic time, used for cache ageing
///
/// Must never go backwards while the device is running. Wall-clock time
/// is not suitable here since it jumps on every sync.
pub trait Monotonic {
    /// Milliseconds since boot
    fn now_ms(&self) -> Timestamp;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> Timestamp {
        T::now_ms(self)
    }
}
