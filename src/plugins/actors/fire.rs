//! Fire profiles and the boss fire cycle.
//!
//! Two clocks run side by side for a cycled shooter:
//!
//! ```text
//! phase clock:  |--- Paused 6s ---|--- Firing 5s ---|--- Paused 6s ---| ...
//! shot clock:                      x   x   x   x   x      (every `rate` s, only while Firing)
//! ```
//!
//! The phase clock resets on every transition. The shot clock is never reset, so the first
//! shot of a firing window fires as soon as the window opens if the clock ran out while paused.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub damage: u32,
}

/// Two shots, straight up and straight down, each offset from the shooter by `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolleyPattern {
    pub projectile: ProjectileSpec,
    pub offset: f32,
}

/// Fires at most once per `rate` seconds.
#[derive(Debug, Clone, Copy)]
pub struct ShotClock {
    pub rate: f32,
    next_fire_at: f32,
}

impl ShotClock {
    /// Ready immediately.
    pub fn new(rate: f32) -> Self {
        Self { rate, next_fire_at: 0.0 }
    }

    #[inline]
    pub fn next_fire_at(&self) -> f32 {
        self.next_fire_at
    }

    pub fn try_fire(&mut self, now: f32) -> bool {
        if now < self.next_fire_at {
            return false;
        }
        self.next_fire_at = now + self.rate;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePhase {
    Paused,
    Firing,
}

#[derive(Debug, Clone, Copy)]
pub struct FireCycle {
    pub fire_duration: f32,
    pub pause_duration: f32,
    phase: FirePhase,
    phase_elapsed: f32,
}

impl FireCycle {
    /// Starts paused.
    pub fn new(fire_duration: f32, pause_duration: f32) -> Self {
        Self {
            fire_duration,
            pause_duration,
            phase: FirePhase::Paused,
            phase_elapsed: 0.0,
        }
    }

    #[inline]
    pub fn phase(&self) -> FirePhase {
        self.phase
    }

    #[inline]
    pub fn phase_elapsed(&self) -> f32 {
        self.phase_elapsed
    }

    #[inline]
    fn active_duration(&self) -> f32 {
        match self.phase {
            FirePhase::Paused => self.pause_duration,
            FirePhase::Firing => self.fire_duration,
        }
    }

    /// Add `dt` to the phase clock. Returns the new phase if this call switched phase.
    ///
    /// At most one transition per call, however large `dt` is.
    pub fn advance(&mut self, dt: f32) -> Option<FirePhase> {
        self.phase_elapsed += dt;
        if self.phase_elapsed < self.active_duration() {
            return None;
        }

        self.phase = match self.phase {
            FirePhase::Paused => FirePhase::Firing,
            FirePhase::Firing => FirePhase::Paused,
        };
        self.phase_elapsed = 0.0;
        Some(self.phase)
    }
}

/// How (and whether) an actor shoots on its own.
#[derive(Component, Debug, Clone)]
pub enum FireProfile {
    /// Volley every `clock.rate` seconds, forever.
    Volley { pattern: VolleyPattern, clock: ShotClock },
    /// Volley every `clock.rate` seconds while the cycle is in its firing phase.
    CycledVolley {
        pattern: VolleyPattern,
        clock: ShotClock,
        cycle: FireCycle,
    },
    /// One shot along the facing, on the owner's trigger. Never fires from `tick`.
    Aimed {
        projectile: ProjectileSpec,
        muzzle_offset: f32,
    },
}

impl FireProfile {
    /// Advance timers to `now`; returns the pattern to fire this tick, if any.
    pub fn tick(&mut self, now: f32, dt: f32) -> Option<VolleyPattern> {
        match self {
            FireProfile::Volley { pattern, clock } => clock.try_fire(now).then_some(*pattern),
            FireProfile::CycledVolley {
                pattern,
                clock,
                cycle,
            } => {
                cycle.advance(dt);
                if cycle.phase() != FirePhase::Firing {
                    return None;
                }
                clock.try_fire(now).then_some(*pattern)
            }
            FireProfile::Aimed { .. } => None,
        }
    }
}
