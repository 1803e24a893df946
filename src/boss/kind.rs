//! Part kinds and the per-kind capability table.

use serde::Deserialize;

/// Kind of a boss part. Behaviour differences between kinds come from
/// [`KindTraits`], never from separate part types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PartKind {
    LeftArm,
    Middle,
    RightArm,
    /// Large central body with a timed skill cycle.
    Core,
    /// Minion that detonates on its own and never receives chain explosions.
    Explosive,
    /// Plain escort minion.
    Drone,
}

/// Static capabilities of a [`PartKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTraits {
    pub width: i32,
    pub height: i32,
    /// Counts as a boss piece for destruction cues.
    pub is_boss: bool,
    /// Main body: "boss-died" cue and shooter pool exemption.
    pub is_core: bool,
    /// Alternates between an active and a skill sprite on a timer.
    pub has_skill_cycle: bool,
    /// Chain explosions are not propagated into this kind.
    pub is_self_explosive: bool,
    /// Has a dedicated sprite for the damage flash.
    pub has_damaged_sprite: bool,
    /// Number of idle animation frames.
    pub frames: u8,
}

const ARM: KindTraits = KindTraits {
    width: 24,
    height: 48,
    is_boss: true,
    is_core: false,
    has_skill_cycle: false,
    is_self_explosive: false,
    has_damaged_sprite: true,
    frames: 2,
};

const CORE: KindTraits = KindTraits {
    width: 150,
    height: 180,
    is_boss: true,
    is_core: true,
    has_skill_cycle: true,
    is_self_explosive: false,
    has_damaged_sprite: true,
    frames: 2,
};

const EXPLOSIVE: KindTraits = KindTraits {
    width: 20,
    height: 20,
    is_boss: false,
    is_core: false,
    has_skill_cycle: false,
    is_self_explosive: true,
    has_damaged_sprite: false,
    frames: 2,
};

const DRONE: KindTraits = KindTraits {
    width: 20,
    height: 20,
    is_boss: false,
    is_core: false,
    has_skill_cycle: false,
    is_self_explosive: false,
    has_damaged_sprite: false,
    frames: 4,
};

impl PartKind {
    pub fn traits(self) -> &'static KindTraits {
        match self {
            PartKind::LeftArm | PartKind::Middle | PartKind::RightArm => &ARM,
            PartKind::Core => &CORE,
            PartKind::Explosive => &EXPLOSIVE,
            PartKind::Drone => &DRONE,
        }
    }

    pub fn size(self) -> (i32, i32) {
        let traits = self.traits();
        (traits.width, traits.height)
    }
}
