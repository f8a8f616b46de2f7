//! Registered levels, in play order.

use bevy::prelude::*;

use super::counter::Destination;

#[derive(Debug, Clone)]
pub struct LevelSpec {
    /// Scene name; levels are named `"Level N"` so they share one music track.
    pub name: String,
    pub grunts: u32,
    pub bosses: u32,
    pub obstacles: Vec<Vec2>,
    pub defeat_threshold: u32,
    pub destination: Destination,
}

impl LevelSpec {
    pub fn new(index: usize, grunts: u32, bosses: u32) -> Self {
        Self {
            name: format!("Level {index}"),
            grunts,
            bosses,
            obstacles: Vec::new(),
            defeat_threshold: (grunts + bosses).max(1),
            destination: Destination::NextLevel,
        }
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Vec2>) -> Self {
        self.obstacles = obstacles.into_iter().collect();
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.defeat_threshold = threshold.max(1);
        self
    }

    pub fn ending(mut self) -> Self {
        self.destination = Destination::EndScreen;
        self
    }
}

#[derive(Resource, Debug, Clone)]
pub struct LevelRegistry {
    levels: Vec<LevelSpec>,
    current: usize,
}

impl LevelRegistry {
    /// An empty list gets a single one-grunt level so `current()` is always valid.
    pub fn new(levels: Vec<LevelSpec>) -> Self {
        let levels = if levels.is_empty() {
            vec![LevelSpec::new(0, 1, 0)]
        } else {
            levels
        };
        Self { levels, current: 0 }
    }

    #[inline]
    pub fn current(&self) -> &LevelSpec {
        &self.levels[self.current]
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Select a level by index; out-of-range indices select the first level.
    pub fn select(&mut self, index: usize) {
        self.current = if index < self.levels.len() { index } else { 0 };
    }

    /// Move to the next registered level. Returns `true` if it wrapped to the first.
    pub fn advance(&mut self) -> bool {
        let next = self.current + 1;
        let wrapped = next >= self.levels.len();
        self.current = if wrapped { 0 } else { next };
        wrapped
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new(vec![
            LevelSpec::new(0, 3, 0),
            LevelSpec::new(1, 5, 0).with_obstacles([Vec2::new(-240.0, 40.0), Vec2::new(240.0, 40.0)]),
            LevelSpec::new(2, 8, 0)
                .with_obstacles([Vec2::new(0.0, 0.0), Vec2::new(-320.0, -80.0), Vec2::new(320.0, -80.0)]),
            LevelSpec::new(3, 10, 0).with_threshold(10),
            LevelSpec::new(4, 2, 1)
                .with_obstacles([Vec2::new(-160.0, -40.0), Vec2::new(160.0, -40.0)])
                .ending(),
        ])
    }
}
