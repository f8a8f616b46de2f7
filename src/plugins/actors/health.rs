//! Hit points.

use bevy::prelude::*;

/// Current / max hit points. `current <= max` and `max > 0` hold for every value.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

/// What a single `apply_damage` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Hurt { remaining: u32 },
    /// This call took the actor from above zero to zero. Reported once per actor.
    Defeated,
    /// The actor was already at zero; nothing changed.
    AlreadyDefeated,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_depleted() {
            return DamageOutcome::AlreadyDefeated;
        }

        self.current = self.current.saturating_sub(amount);

        if self.is_depleted() {
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Hurt { remaining: self.current }
        }
    }
}
