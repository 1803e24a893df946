//! A single destructible boss part.
//!
//! Parts move with their formation, animate on frame-counted cooldowns and
//! go through `Alive -> (Flash) -> Destroyed`. Destruction is terminal: once
//! destroyed, hits and further destroys are ignored.

use bevy::prelude::*;

use super::color::{health_color, PartColor, DESTROYED_COLOR};
use super::kind::PartKind;
use crate::core::{Cooldown, SoundCue, SoundPlayer};

/// Score awarded for destroying any part.
pub const POINT_VALUE: u32 = 1000;
/// Frames between idle animation frames.
pub const ANIMATION_INTERVAL: u32 = 30;
/// Frames the damaged sprite stays up after a non-lethal hit.
pub const FLASH_FRAMES: u32 = 6;
/// Frames a skill-cycle part stays active before switching to its skill sprite.
pub const SKILL_ACTIVATE_FRAMES: u32 = 240;
/// Frames the skill sprite stays up.
pub const SKILL_DURATION_FRAMES: u32 = 90;

/// Stable identifier of a part within its formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

/// Sprite a renderer should show for a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSprite {
    /// Idle animation frame.
    Idle(u8),
    /// Damage flash.
    Damaged,
    /// Skill-cycle pose.
    Skill,
    /// Explosion marker for a destroyed part.
    Explosion,
}

#[derive(Debug, Clone)]
struct SkillCycle {
    in_skill: bool,
    activate: Cooldown,
    revert: Cooldown,
}

impl SkillCycle {
    fn new() -> Self {
        Self {
            in_skill: false,
            activate: Cooldown::new(SKILL_ACTIVATE_FRAMES),
            revert: Cooldown::new(SKILL_DURATION_FRAMES),
        }
    }

    fn tick(&mut self) {
        let timer = if self.in_skill {
            &mut self.revert
        } else {
            &mut self.activate
        };
        timer.tick();
        if timer.check_finished() {
            timer.reset();
            self.in_skill = !self.in_skill;
        }
    }
}

/// One destructible unit of a boss.
#[derive(Debug, Clone)]
pub struct BossPart {
    id: PartId,
    kind: PartKind,
    x: i32,
    y: i32,
    hp: i32,
    max_hp: i32,
    destroyed: bool,
    chain_exploded: bool,
    /// Horizontal speed factor (1.0 means normal speed).
    speed_multiplier: f64,
    phase: u8,
    animation: Cooldown,
    flash_frames: u32,
    skill: Option<SkillCycle>,
    color: PartColor,
}

impl BossPart {
    pub fn new(id: PartId, kind: PartKind, x: i32, y: i32, hp: i32) -> Self {
        let max_hp = hp.max(1);
        Self {
            id,
            kind,
            x,
            y,
            hp: max_hp,
            max_hp,
            destroyed: false,
            chain_exploded: false,
            speed_multiplier: 1.0,
            phase: 0,
            animation: Cooldown::new(ANIMATION_INTERVAL),
            flash_frames: 0,
            skill: kind.traits().has_skill_cycle.then(SkillCycle::new),
            color: health_color(max_hp, max_hp),
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// Top-left corner in screen coordinates.
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.kind.traits().width
    }

    pub fn height(&self) -> i32 {
        self.kind.traits().height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width() / 2
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_chain_exploded(&self) -> bool {
        self.chain_exploded
    }

    pub fn point_value(&self) -> u32 {
        POINT_VALUE
    }

    pub fn color(&self) -> PartColor {
        self.color
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.speed_multiplier = multiplier;
    }

    pub fn reset_speed_multiplier(&mut self) {
        self.speed_multiplier = 1.0;
    }

    /// Sprite to draw this frame.
    pub fn sprite(&self) -> PartSprite {
        if self.destroyed {
            PartSprite::Explosion
        } else if self.flash_frames > 0 {
            PartSprite::Damaged
        } else if self.skill.as_ref().is_some_and(|skill| skill.in_skill) {
            PartSprite::Skill
        } else {
            PartSprite::Idle(self.phase)
        }
    }

    /// Translate the part. Only the horizontal step is scaled by the speed
    /// multiplier.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = (f64::from(self.x) + f64::from(dx) * self.speed_multiplier) as i32;
        self.y += dy;
    }

    /// Advance animation, skill cycle and damage flash by one frame.
    pub fn update(&mut self) {
        if self.destroyed {
            return;
        }

        self.flash_frames = self.flash_frames.saturating_sub(1);

        self.animation.tick();
        if self.animation.check_finished() {
            self.animation.reset();
            self.phase = (self.phase + 1) % self.kind.traits().frames.max(1);
        }

        if let Some(skill) = self.skill.as_mut() {
            skill.tick();
        }
    }

    /// Take one point of damage. Returns `true` if this hit destroyed the part.
    pub fn hit(&mut self, sound: &mut dyn SoundPlayer) -> bool {
        if self.destroyed {
            return false;
        }

        self.hp -= 1;
        if self.hp <= 0 {
            return self.destroy(sound);
        }

        self.color = health_color(self.hp, self.max_hp);
        sound.play(SoundCue::Hit);

        if self.kind.traits().has_damaged_sprite {
            self.flash_frames = FLASH_FRAMES;
        } else {
            warn_once!("No damaged sprite for {:?}; keeping idle frame", self.kind);
        }
        false
    }

    /// Destroy the part. Returns `true` only on the call that performed the
    /// transition.
    pub fn destroy(&mut self, sound: &mut dyn SoundPlayer) -> bool {
        if self.destroyed {
            return false;
        }

        self.destroyed = true;
        self.hp = 0;
        self.flash_frames = 0;
        self.color = DESTROYED_COLOR;

        let traits = self.kind.traits();
        let cue = if traits.is_core {
            SoundCue::BossDied
        } else if traits.is_boss {
            SoundCue::PartDestroyed
        } else {
            SoundCue::EnemyDestroyed
        };
        sound.play(cue);
        true
    }

    /// Forced destruction propagated from another part.
    pub fn chain_explode(&mut self, sound: &mut dyn SoundPlayer) -> bool {
        let destroyed_now = self.destroy(sound);
        self.chain_exploded = true;
        self.hp = 0;
        destroyed_now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(hp: i32) -> BossPart {
        BossPart::new(PartId(0), PartKind::LeftArm, 20, 100, hp)
    }

    #[test]
    fn max_hp_hits_destroy_exactly_once() {
        let mut part = arm(4);
        let mut cues = Vec::new();
        let mut destroyed = 0;
        for _ in 0..4 {
            if part.hit(&mut cues) {
                destroyed += 1;
            }
            assert!(part.hp() >= 0);
        }
        assert_eq!(destroyed, 1);
        assert!(part.is_destroyed());
        assert_eq!(part.hp(), 0);

        assert!(!part.hit(&mut cues));
        assert_eq!(part.hp(), 0);
        assert_eq!(
            cues,
            vec![
                SoundCue::Hit,
                SoundCue::Hit,
                SoundCue::Hit,
                SoundCue::PartDestroyed
            ]
        );
    }

    #[test]
    fn hit_updates_color_and_flashes() {
        let mut part = arm(5);
        let mut cues = Vec::new();
        part.hit(&mut cues);
        assert_eq!(part.color(), health_color(4, 5));
        assert_eq!(part.sprite(), PartSprite::Damaged);

        for _ in 0..FLASH_FRAMES {
            part.update();
        }
        assert!(matches!(part.sprite(), PartSprite::Idle(_)));
    }

    #[test]
    fn kinds_without_damaged_sprite_keep_idle_frame() {
        let mut drone = BossPart::new(PartId(1), PartKind::Drone, 0, 0, 3);
        drone.hit(&mut Vec::new());
        assert_eq!(drone.sprite(), PartSprite::Idle(0));
        assert_eq!(drone.hp(), 2);
    }

    #[test]
    fn chain_explode_forces_terminal_state() {
        let mut part = arm(8);
        let mut cues = Vec::new();
        assert!(part.chain_explode(&mut cues));
        assert_eq!(part.hp(), 0);
        assert!(part.is_destroyed());
        assert!(part.is_chain_exploded());
        assert_eq!(part.sprite(), PartSprite::Explosion);
        assert_eq!(part.color(), DESTROYED_COLOR);
        assert_eq!(cues, vec![SoundCue::PartDestroyed]);
    }

    #[test]
    fn destruction_cue_depends_on_kind() {
        let mut cues = Vec::new();
        BossPart::new(PartId(0), PartKind::Core, 0, 0, 1).hit(&mut cues);
        BossPart::new(PartId(1), PartKind::Middle, 0, 0, 1).hit(&mut cues);
        BossPart::new(PartId(2), PartKind::Explosive, 0, 0, 1).hit(&mut cues);
        assert_eq!(
            cues,
            vec![
                SoundCue::BossDied,
                SoundCue::PartDestroyed,
                SoundCue::EnemyDestroyed
            ]
        );
    }

    #[test]
    fn speed_multiplier_only_scales_horizontal_moves() {
        let mut part = arm(1);
        part.set_speed_multiplier(0.5);
        part.move_by(8, 4);
        assert_eq!(part.position(), IVec2::new(24, 104));

        part.reset_speed_multiplier();
        part.move_by(-8, 0);
        assert_eq!(part.position(), IVec2::new(16, 104));
    }

    #[test]
    fn idle_animation_cycles_frames() {
        let mut part = arm(1);
        for _ in 0..ANIMATION_INTERVAL {
            part.update();
        }
        assert_eq!(part.sprite(), PartSprite::Idle(1));
        for _ in 0..ANIMATION_INTERVAL {
            part.update();
        }
        assert_eq!(part.sprite(), PartSprite::Idle(0));
    }

    #[test]
    fn skill_cycle_toggles_independent_of_hp() {
        let mut core = BossPart::new(PartId(0), PartKind::Core, 0, 0, 10);
        for _ in 0..SKILL_ACTIVATE_FRAMES {
            core.update();
        }
        assert_eq!(core.sprite(), PartSprite::Skill);
        assert_eq!(core.hp(), 10);

        for _ in 0..SKILL_DURATION_FRAMES {
            core.update();
        }
        assert!(matches!(core.sprite(), PartSprite::Idle(_)));
    }
}
