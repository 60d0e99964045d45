//! Schedule state machine
//!
//! The schedule is explicit, finite, and deterministic: what the next
//! cycle does is a function of the current phase and an event.

/// Schedule phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Next cycle refreshes every source
    Refresh,
    /// Render-only cycles left before the next refresh
    Render { remaining: u8 },
}

/// Events that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Sources refreshed; this many renders follow
    RefreshComplete { renders: u8 },
    /// One frame handed to the renderer
    FrameShown,
}

impl Phase {
    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Refresh, RefreshComplete { renders }) if renders > 0 => Render { remaining: renders },
            (Render { remaining }, FrameShown) if remaining > 1 => Render {
                remaining: remaining - 1,
            },
            (Render { .. }, FrameShown) => Refresh,

            // Default: stay in current phase
            _ => self,
        }
    }
}

/// Schedule bookkeeping owned by the scheduler
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleState {
    /// Frames shown since start
    cycle_count: u32,
    /// Render iterations per refresh
    renders_per_refresh: u8,
    phase: Phase,
}

impl ScheduleState {
    /// Start in the refresh phase
    pub const fn new(renders_per_refresh: u8) -> Self {
        Self {
            cycle_count: 0,
            renders_per_refresh,
            phase: Phase::Refresh,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn renders_per_refresh(&self) -> u8 {
        self.renders_per_refresh
    }

    /// Check if the next cycle refreshes every source
    pub fn is_refresh_due(&self) -> bool {
        self.phase == Phase::Refresh
    }

    /// Apply an event
    pub fn handle(&mut self, event: Event) {
        if event == Event::FrameShown {
            self.cycle_count = self.cycle_count.wrapping_add(1);
        }

        let next = self.phase.transition(event);
        if next != self.phase {
            debug!("Schedule phase {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
    }
}
