//! Cycle scheduler
//!
//! Drives the fixed-period loop: a refresh of every source, followed by a
//! fixed number of render iterations, repeated forever.

pub mod cycle;
pub mod state;

pub use cycle::{Collaborators, CycleScheduler, Frame, StationContext};
pub use state::{Event, Phase, ScheduleState};
