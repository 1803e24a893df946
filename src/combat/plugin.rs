//! Combat plugin - projectiles, hits and score.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles all projectile and scoring systems.
///
/// Expects [`crate::boss::BossPlugin`] to configure the encounter sets.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
