//! Rendering plugin - mirrors the boss core into 2-D sprites.
//!
//! The formation works in screen coordinates (origin top-left, y down).
//! Sprites live in world space centered on the camera, so every position
//! goes through [`screen_to_world`].

use bevy::prelude::*;
use std::collections::HashSet;

use crate::boss::{ActiveBoss, BossPart, EncounterSet, PartId, PartSprite};
use crate::combat::{Faction, Projectile};
use crate::config::GameSettings;
use crate::core::GameState;

/// Rendering plugin - camera plus sprite sync for parts and bullets.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderConfig>()
            .add_systems(Startup, (apply_clear_color, spawn_camera))
            .add_systems(
                Update,
                (sync_part_sprites, attach_projectile_sprites, sync_projectile_transforms)
                    .after(EncounterSet::Outcome)
                    .run_if(in_state(GameState::Encounter)),
            )
            .add_systems(OnExit(GameState::Encounter), clear_part_sprites);
    }
}

/// Colors used for the non-health sprite states.
#[derive(Resource, Clone)]
pub struct RenderConfig {
    pub clear_color: Color,
    /// Damage flash.
    pub flash_color: Color,
    /// Skill-cycle pose.
    pub skill_color: Color,
    pub explosion_color: Color,
    pub player_shot_color: Color,
    pub boss_shot_color: Color,
    /// Alpha of odd idle animation frames.
    pub idle_blink_alpha: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::srgb(0.02, 0.02, 0.05),
            flash_color: Color::WHITE,
            skill_color: Color::srgb(0.9, 0.3, 0.9),
            explosion_color: Color::srgb(1.0, 0.55, 0.1),
            player_shot_color: Color::srgb(0.9, 0.9, 0.3),
            boss_shot_color: Color::srgb(1.0, 0.3, 0.3),
            idle_blink_alpha: 210,
        }
    }
}

/// Sprite entity standing in for one boss part.
#[derive(Component, Debug, Clone, Copy)]
pub struct PartVisual(pub PartId);

const PART_Z: f32 = 1.0;
const PROJECTILE_Z: f32 = 2.0;

/// Convert the center of a screen-space rectangle to a world translation.
pub fn screen_to_world(settings: &GameSettings, x: i32, y: i32, width: i32, height: i32) -> Vec2 {
    let center_x = x as f32 + width as f32 / 2.0;
    let center_y = y as f32 + height as f32 / 2.0;
    Vec2::new(
        center_x - settings.screen_width as f32 / 2.0,
        settings.screen_height as f32 / 2.0 - center_y,
    )
}

/// Color a part should be drawn with this frame.
pub fn part_color(part: &BossPart, config: &RenderConfig) -> Color {
    match part.sprite() {
        PartSprite::Idle(phase) if phase % 2 == 0 => part.color().to_color(),
        PartSprite::Idle(_) => {
            let c = part.color();
            Color::srgba_u8(c.r, c.g, c.b, config.idle_blink_alpha)
        }
        PartSprite::Damaged => config.flash_color,
        PartSprite::Skill => config.skill_color,
        PartSprite::Explosion => config.explosion_color,
    }
}

fn apply_clear_color(mut commands: Commands, config: Res<RenderConfig>) {
    commands.insert_resource(ClearColor(config.clear_color));
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Spawn, update and despawn part sprites so they match the formation grid.
fn sync_part_sprites(
    mut commands: Commands,
    boss: Option<Res<ActiveBoss>>,
    settings: Res<GameSettings>,
    config: Res<RenderConfig>,
    mut visuals: Query<(Entity, &PartVisual, &mut Sprite, &mut Transform)>,
) {
    let Some(boss) = boss else {
        return;
    };

    let mut drawn = HashSet::new();
    for (entity, visual, mut sprite, mut transform) in visuals.iter_mut() {
        let Some(part) = boss.formation.part(visual.0) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };
        sprite.color = part_color(part, &config);
        let position = screen_to_world(&settings, part.x(), part.y(), part.width(), part.height());
        transform.translation = position.extend(PART_Z);
        drawn.insert(visual.0);
    }

    for part in boss.formation.draw_iter() {
        if drawn.contains(&part.id()) {
            continue;
        }
        let position = screen_to_world(&settings, part.x(), part.y(), part.width(), part.height());
        commands.spawn((
            PartVisual(part.id()),
            Sprite {
                color: part_color(part, &config),
                custom_size: Some(Vec2::new(part.width() as f32, part.height() as f32)),
                ..default()
            },
            Transform::from_translation(position.extend(PART_Z)),
        ));
    }
}

/// Give newly spawned bullets a sprite.
fn attach_projectile_sprites(
    mut commands: Commands,
    config: Res<RenderConfig>,
    query: Query<(Entity, &Projectile), Without<Sprite>>,
) {
    for (entity, projectile) in query.iter() {
        let color = match projectile.faction {
            Faction::Player => config.player_shot_color,
            Faction::Boss => config.boss_shot_color,
        };
        commands.entity(entity).insert(Sprite::from_color(
            color,
            Vec2::new(Projectile::WIDTH as f32, Projectile::HEIGHT as f32),
        ));
    }
}

fn sync_projectile_transforms(
    settings: Res<GameSettings>,
    mut query: Query<(&Projectile, &mut Transform)>,
) {
    for (projectile, mut transform) in query.iter_mut() {
        let position = screen_to_world(
            &settings,
            projectile.position.x - Projectile::WIDTH / 2,
            projectile.position.y,
            Projectile::WIDTH,
            Projectile::HEIGHT,
        );
        transform.translation = position.extend(PROJECTILE_Z);
    }
}

fn clear_part_sprites(mut commands: Commands, query: Query<Entity, With<PartVisual>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
