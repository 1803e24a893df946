//! Boss module - varieties, parts and the formation that moves them.
//!
//! Parts and formations are plain Rust values driven one frame at a time.
//! [`BossPlugin`] owns the Bevy side of the encounter.

mod color;
mod formation;
mod kind;
mod part;
mod plugin;
mod variety;

pub use color::{health_color, PartColor, DESTROYED_COLOR};
pub use formation::*;
pub use kind::{KindTraits, PartKind};
pub use part::*;
pub use plugin::{ActiveBoss, BossPlugin, EncounterSet};
pub use variety::*;
