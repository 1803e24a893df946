//! Global events and the sound cue vocabulary shared by all plugins.
//!
//! The boss core never talks to Bevy directly. It reports sounds through the
//! [`SoundPlayer`] trait, and the encounter systems translate its results into
//! the events below so audio, scoring and level flow stay decoupled.

use bevy::prelude::*;

use crate::boss::{PartId, PartKind};

/// Sound cues the boss core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A part took damage and survived.
    Hit,
    /// A boss part other than the core was destroyed.
    PartDestroyed,
    /// The boss core was destroyed.
    BossDied,
    /// A non-boss kind was destroyed.
    EnemyDestroyed,
    /// A formation member fired.
    ShotFired,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Hit,
        SoundCue::PartDestroyed,
        SoundCue::BossDied,
        SoundCue::EnemyDestroyed,
        SoundCue::ShotFired,
    ];

    /// Stable identifier, also used as the sound file stem.
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Hit => "hit",
            SoundCue::PartDestroyed => "part-destroyed",
            SoundCue::BossDied => "boss-died",
            SoundCue::EnemyDestroyed => "enemy-destroyed",
            SoundCue::ShotFired => "shot-fired",
        }
    }
}

/// Anything that can play a [`SoundCue`].
pub trait SoundPlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Collects cues in order. Used by tests and by callers that batch sounds.
impl SoundPlayer for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Forwards cues to the audio plugin.
impl SoundPlayer for EventWriter<'_, SoundCueEvent> {
    fn play(&mut self, cue: SoundCue) {
        self.send(SoundCueEvent(cue));
    }
}

/// Sent whenever gameplay requests a sound.
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundCueEvent(pub SoundCue);

/// Sent when a boss part is destroyed (by a hit or a chain explosion).
#[derive(Event, Debug, Clone)]
pub struct BossPartDestroyed {
    pub part: PartId,
    pub kind: PartKind,
    /// Top-left position of the part in screen coordinates.
    pub position: IVec2,
    pub chain_exploded: bool,
}

/// Sent once when every part of the active boss is gone.
#[derive(Event, Debug, Clone)]
pub struct BossDefeated {
    pub variety: String,
}

/// Points awarded by the formation for the scoring collaborator.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScoreEvent {
    pub destroyed: u32,
    pub points: u32,
}
