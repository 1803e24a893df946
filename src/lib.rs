//! Boss Formation - the multi-part boss encounter of a vertical shooter, in Bevy.
//!
//! A boss is a grid of destructible parts that marches sideways across the
//! screen, steps down at the edges, speeds up as parts die and fires from a
//! random front-line part.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, cooldowns, randomness
//! - **Boss**: Variety catalog, boss parts, formation movement and firing
//! - **Combat**: Projectiles, hit resolution, chain reactions, score
//! - **Rendering**: Camera and sprite mirroring of the formation
//! - **Audio**: Sound cue playback
//!
//! The boss types in [`boss`] are usable without an `App`; the plugins only
//! tick them and translate their results into events.

pub mod audio;
pub mod boss;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod rendering;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct BossFormationPlugin;

impl Plugin for BossFormationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Boss data and formation
            .add_plugins(boss::BossPlugin)

            // Projectiles and scoring
            .add_plugins(combat::CombatPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // Sound cues
            .add_plugins(audio::SoundPlugin);
    }
}
