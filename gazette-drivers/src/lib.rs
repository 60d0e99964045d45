//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in gazette-core:
//!
//! - Real-time clocks (DS3231 over I2C)
//! - Monotonic time (embassy-time, behind the `embassy` feature)

#![no_std]
#![deny(unsafe_code)]

pub mod rtc;
#[cfg(feature = "embassy")]
pub mod time;
