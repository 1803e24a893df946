//! Health-to-color ramp for boss parts.
//!
//! Full health is blue, fading through green and red to black on the last
//! hit point. The ramp is a pure function so renderers can recompute it.

use bevy::prelude::Color;

/// 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PartColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.r, self.g, self.b)
    }
}

/// Shown for a part with no hp left, until the explosion sprite takes over.
pub const DESTROYED_COLOR: PartColor = PartColor::rgb(255, 0, 0);

const BLACK: [f64; 3] = [0.0, 0.0, 0.0];
const RED: [f64; 3] = [255.0, 0.0, 0.0];
const GREEN: [f64; 3] = [0.0, 255.0, 0.0];
const BLUE: [f64; 3] = [0.0, 0.0, 255.0];

/// Color for a part with `hp` of `max_hp` hit points left.
///
/// `ratio = (hp - 1) * 4 / (max_hp - 1)` picks the band: `[2, 4]` blends
/// green to blue, `[1, 2)` red to green, `[0, 1)` black to red.
pub fn health_color(hp: i32, max_hp: i32) -> PartColor {
    if hp <= 0 || max_hp <= 0 {
        return DESTROYED_COLOR;
    }

    let h = f64::from(hp.min(max_hp) - 1);
    let m = f64::from(max_hp - 1);
    let ratio = if m > 0.0 { h * 4.0 / m } else { 4.0 };

    if ratio >= 2.0 {
        blend(GREEN, BLUE, (ratio - 2.0) / 2.0)
    } else if ratio >= 1.0 {
        blend(RED, GREEN, ratio - 1.0)
    } else {
        blend(BLACK, RED, ratio)
    }
}

fn blend(from: [f64; 3], to: [f64; 3], t: f64) -> PartColor {
    let channel = |i: usize| {
        let value = from[i] + (to[i] - from[i]) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    PartColor::rgb(channel(0), channel(1), channel(2))
}
