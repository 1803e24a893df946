//! Rendering module - camera and sprites for the boss encounter.

mod plugin;

pub use plugin::{part_color, screen_to_world, PartVisual, RenderConfig, RenderingPlugin};
