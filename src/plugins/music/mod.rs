//! Music plugin (render-only): one looping track per scene.
//!
//! `MusicDirector` is the only owner of the music entity. It reacts to `ActiveScene`
//! changes:
//!
//! ```text
//! Level N -> Level M   keep playing (levels share a track)
//! no track for scene   warn, keep whatever is playing
//! same track           keep playing
//! otherwise            despawn the old player, spawn the new track looping
//! ```
//!
//! The music entity is not state-scoped, so it survives every `GameState` transition.

use bevy::prelude::*;

use crate::plugins::core::ActiveScene;

const LEVEL_PREFIX: &str = "Level";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneTrack {
    /// Exact scene name, or a prefix such as `"Level"` matching `"Level 3"`.
    pub scene: String,
    /// Asset path of the track.
    pub track: String,
}

impl SceneTrack {
    pub fn new(scene: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            track: track.into(),
        }
    }

    fn matches(&self, scene: &str) -> bool {
        scene == self.scene || scene.starts_with(self.scene.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicCue {
    Continue,
    Play(String),
    Missing,
}

#[derive(Resource, Debug)]
pub struct MusicDirector {
    tracks: Vec<SceneTrack>,
    current_scene: Option<String>,
    current_track: Option<String>,
    player: Option<Entity>,
}

/// Marker for the entity playing the current track.
#[derive(Component)]
pub struct MusicTrack;

impl MusicDirector {
    pub fn new(tracks: Vec<SceneTrack>) -> Self {
        Self {
            tracks,
            current_scene: None,
            current_track: None,
            player: None,
        }
    }

    #[inline]
    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    fn track_for(&self, scene: &str) -> Option<&SceneTrack> {
        self.tracks
            .iter()
            .find(|t| t.scene == scene)
            .or_else(|| self.tracks.iter().find(|t| t.matches(scene)))
    }

    /// Decide what to do when `scene` becomes active. Records the scene either way.
    pub fn cue_for(&mut self, scene: &str) -> MusicCue {
        let previous = self.current_scene.replace(scene.to_owned());

        if let Some(previous) = previous
            && previous.starts_with(LEVEL_PREFIX)
            && scene.starts_with(LEVEL_PREFIX)
            && self.current_track.is_some()
        {
            return MusicCue::Continue;
        }

        let Some(track) = self.track_for(scene).map(|t| t.track.clone()) else {
            return MusicCue::Missing;
        };
        if self.current_track.as_deref() == Some(track.as_str()) {
            return MusicCue::Continue;
        }

        self.current_track = Some(track.clone());
        MusicCue::Play(track)
    }
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new(vec![
            SceneTrack::new("Title", "music/title.ogg"),
            SceneTrack::new(LEVEL_PREFIX, "music/level.ogg"),
            SceneTrack::new("End", "music/end.ogg"),
        ])
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<MusicDirector>()
        .add_systems(Update, follow_scene.run_if(resource_changed::<ActiveScene>));
}

fn follow_scene(
    mut commands: Commands,
    scene: Res<ActiveScene>,
    mut director: ResMut<MusicDirector>,
    assets: Res<AssetServer>,
) {
    if scene.0.is_empty() {
        return;
    }

    match director.cue_for(&scene.0) {
        MusicCue::Continue => {}
        MusicCue::Missing => warn!("No music for scene {:?}", scene.0),
        MusicCue::Play(track) => {
            if let Some(old) = director.player.take() {
                commands.entity(old).despawn();
            }
            debug!("Music: {track}");
            let e = commands
                .spawn((
                    Name::new("Music"),
                    MusicTrack,
                    AudioPlayer::new(assets.load(track)),
                    PlaybackSettings::LOOP,
                ))
                .id();
            director.player = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn director() -> MusicDirector {
        MusicDirector::default()
    }

    #[test]
    fn first_scene_starts_its_track() {
        let mut d = director();
        assert_eq!(d.cue_for("Title"), MusicCue::Play("music/title.ogg".into()));
        assert_eq!(d.current_track(), Some("music/title.ogg"));
    }

    #[test]
    fn levels_share_one_uninterrupted_track() {
        let mut d = director();
        d.cue_for("Title");
        assert_eq!(d.cue_for("Level 0"), MusicCue::Play("music/level.ogg".into()));
        assert_eq!(d.cue_for("Level 1"), MusicCue::Continue);
        assert_eq!(d.cue_for("Level 4"), MusicCue::Continue);
    }

    #[test]
    fn leaving_the_levels_switches_track() {
        let mut d = director();
        d.cue_for("Level 3");
        assert_eq!(d.cue_for("End"), MusicCue::Play("music/end.ogg".into()));
        assert_eq!(d.cue_for("Title"), MusicCue::Play("music/title.ogg".into()));
    }

    #[test]
    fn unknown_scene_keeps_current_track() {
        let mut d = director();
        d.cue_for("Title");
        assert_eq!(d.cue_for("Credits"), MusicCue::Missing);
        assert_eq!(d.current_track(), Some("music/title.ogg"));
    }

    #[test]
    fn scenes_sharing_a_track_do_not_restart_it() {
        let mut d = MusicDirector::new(vec![
            SceneTrack::new("Title", "music/menu.ogg"),
            SceneTrack::new("End", "music/menu.ogg"),
        ]);
        d.cue_for("Title");
        assert_eq!(d.cue_for("End"), MusicCue::Continue);
    }
}
