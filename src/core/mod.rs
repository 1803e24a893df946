//! Core game module - states, events, timing and randomness.
//!
//! This module provides the foundation that all other game systems build upon.

mod cooldown;
mod events;
mod plugin;
mod random;
mod states;

pub use cooldown::Cooldown;
pub use events::*;
pub use plugin::CorePlugin;
pub use random::{RandomSource, RngSource};
pub use states::*;
