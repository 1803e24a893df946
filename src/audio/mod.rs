//! Audio module - sound cue playback.

mod plugin;

pub use plugin::{SoundCues, SoundPlugin, SOUND_DIR};
