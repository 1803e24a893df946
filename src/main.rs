//! Boss Formation - Entry Point
//!
//! Spawns the configured boss from `assets/data/settings.ron` and
//! `assets/data/bosses.ron`.

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, with kira replacing the built-in audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Boss Formation".to_string(),
                        resolution: (600.0, 650.0).into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Our game plugin
        .add_plugins(boss_formation::BossFormationPlugin)

        .run();
}
