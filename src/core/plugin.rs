//! Core plugin that sets up game states and global events.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, Encounter, Cleared)
/// - Global events (sound cues, destruction, scoring, defeat)
/// - Basic game flow systems
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<SoundCueEvent>()
            .add_event::<BossPartDestroyed>()
            .add_event::<BossDefeated>()
            .add_event::<ScoreEvent>()

            // Data files are read during Startup, so Loading can end right away
            .add_systems(OnEnter(GameState::Loading), transition_to_encounter)

            // Leave the fight once the boss is gone
            .add_systems(
                Update,
                handle_boss_defeated.run_if(in_state(GameState::Encounter)),
            );
    }
}

/// Immediately transition from Loading to Encounter.
fn transition_to_encounter(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Encounter);
}

/// Move to `Cleared` when a defeat event arrives.
fn handle_boss_defeated(
    mut defeated: EventReader<BossDefeated>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(event) = defeated.read().last() {
        info!("Boss '{}' defeated", event.variety);
        next_state.set(GameState::Cleared);
    }
}
