//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The boss encounter
//! systems only run in `Encounter`, and data loading happens before it.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while the variety catalog and settings are read
/// - Enter `Encounter` to spawn and fight the boss formation
/// - `Cleared` once the formation reports it is empty
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active boss fight
    Encounter,
    /// The boss has been defeated
    Cleared,
}
