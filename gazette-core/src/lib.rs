//! Board-agnostic core logic for the e-ink information display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network implementations:
//!
//! - Collaborator traits (headline/weather/time sources, RTC, renderer)
//! - Staleness cache deciding fetch-or-reuse per source
//! - Headline rotation through a fetched batch
//! - Clock authority with drift fallback while time sync is down
//! - Cycle scheduler driving the refresh/render loop
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod cache;
pub mod clock;
pub mod config;
pub mod headlines;
pub mod scheduler;
pub mod traits;
pub mod uplink;
pub mod weather;

/// Monotonic milliseconds since boot
pub type Timestamp = u64;
