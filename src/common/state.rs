//! Global state machine.
//!
//! ```text
//! Title --Enter--> Loading --> InGame --threshold--> Loading --> InGame ...
//!                                 |                      (next level)
//!                                 +--threshold--> End --Enter--> Title
//! ```
//!
//! `Loading` is a one-frame hop: leaving `InGame` despawns the level, entering
//! `Loading` immediately requests `InGame` again. Reloads and level changes both
//! go through it.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Title,
    Loading,
    InGame,
    End,
}
