//! Defeat tally that gates level advancement.

use bevy::prelude::*;

/// Where a level leads once enough enemies are down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    NextLevel,
    EndScreen,
}

/// Counts enemy defeats for the current level.
///
/// The count only grows. The threshold check runs only when the count grows, and the
/// transition it reports is latched: it is returned once per arming.
#[derive(Resource, Debug, Clone)]
pub struct ProgressionCounter {
    defeated: u32,
    threshold: u32,
    destination: Destination,
    fired: bool,
}

impl ProgressionCounter {
    pub fn new(threshold: u32, destination: Destination) -> Self {
        Self {
            defeated: 0,
            threshold: threshold.max(1),
            destination,
            fired: false,
        }
    }

    #[inline]
    pub fn defeated(&self) -> u32 {
        self.defeated
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Record one defeat. Returns the destination the first time the threshold is reached.
    pub fn on_defeat(&mut self) -> Option<Destination> {
        self.defeated = self.defeated.saturating_add(1);
        if self.fired || self.defeated < self.threshold {
            return None;
        }
        self.fired = true;
        Some(self.destination)
    }
}
