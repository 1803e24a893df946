//! Combat module - projectiles, hit resolution and scoring.

mod components;
mod plugin;
mod projectile;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use projectile::{ProjectileFactory, ProjectileSpawn, SpawnFactory};
