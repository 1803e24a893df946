//! Audio plugin - plays sound cues through `bevy_kira_audio`.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use std::collections::HashMap;

use crate::core::{SoundCue, SoundCueEvent};

/// Directory the cue files are loaded from, relative to `assets/`.
pub const SOUND_DIR: &str = "sounds";

/// Loaded sound for each cue.
#[derive(Resource, Default)]
pub struct SoundCues {
    handles: HashMap<SoundCue, Handle<AudioSource>>,
}

impl SoundCues {
    /// Asset path for a cue, e.g. `sounds/part-destroyed.ogg`.
    pub fn path(cue: SoundCue) -> String {
        format!("{}/{}.ogg", SOUND_DIR, cue.id())
    }

    pub fn get(&self, cue: SoundCue) -> Option<&Handle<AudioSource>> {
        self.handles.get(&cue)
    }
}

/// Audio plugin - handles sound cue playback.
///
/// Adds kira's own plugin, so Bevy's built-in audio must be disabled.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_kira_audio::AudioPlugin)
            .init_resource::<SoundCues>()
            .add_systems(Startup, load_sound_cues)
            .add_systems(Update, play_sound_cues);
    }
}

fn load_sound_cues(mut cues: ResMut<SoundCues>, asset_server: Res<AssetServer>) {
    for cue in SoundCue::ALL {
        cues.handles.insert(cue, asset_server.load(SoundCues::path(cue)));
    }
    info!("Queued {} sound cues from {}/", cues.handles.len(), SOUND_DIR);
}

/// Play every cue requested since last frame.
fn play_sound_cues(
    mut events: EventReader<SoundCueEvent>,
    cues: Res<SoundCues>,
    audio: Res<Audio>,
) {
    for SoundCueEvent(cue) in events.read() {
        match cues.get(*cue) {
            Some(handle) => {
                audio.play(handle.clone());
            }
            None => {
                warn_once!("No sound loaded for cue '{}'", cue.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_paths_use_ids() {
        assert_eq!(SoundCues::path(SoundCue::Hit), "sounds/hit.ogg");
        assert_eq!(SoundCues::path(SoundCue::BossDied), "sounds/boss-died.ogg");
    }
}
