//! Combat-related components and resources.

use bevy::prelude::*;

use super::projectile::ProjectileFactory;
use crate::boss::BossPart;

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Player,
    Boss,
}

/// A bullet in flight, in screen coordinates.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    /// Top-center of the bullet.
    pub position: IVec2,
    /// Movement per frame.
    pub velocity: IVec2,
    pub faction: Faction,
}

impl Projectile {
    pub const WIDTH: i32 = 4;
    pub const HEIGHT: i32 = 10;

    pub fn player(x: i32, y: i32, speed_y: i32) -> Self {
        Self {
            position: IVec2::new(x, y),
            velocity: IVec2::new(0, speed_y),
            faction: Faction::Player,
        }
    }

    /// Axis-aligned overlap test against a part's rectangle.
    pub fn overlaps(&self, part: &BossPart) -> bool {
        let left = self.position.x - Self::WIDTH / 2;
        let top = self.position.y;
        left < part.x() + part.width()
            && left + Self::WIDTH > part.x()
            && top < part.y() + part.height()
            && top + Self::HEIGHT > part.y()
    }

    /// Whether the bullet has left the playfield.
    pub fn is_off_screen(&self, screen_width: i32, screen_height: i32) -> bool {
        self.position.x + Self::WIDTH < 0
            || self.position.x - Self::WIDTH > screen_width
            || self.position.y + Self::HEIGHT < 0
            || self.position.y > screen_height
    }
}

/// Builds boss-side [`Projectile`] components.
#[derive(Debug, Default, Clone, Copy)]
pub struct BossShotFactory;

impl ProjectileFactory for BossShotFactory {
    type Projectile = Projectile;

    fn create(&mut self, x: i32, y: i32, speed_x: i32, speed_y: i32) -> Projectile {
        Projectile {
            position: IVec2::new(x, y),
            velocity: IVec2::new(speed_x, speed_y),
            faction: Faction::Boss,
        }
    }
}

/// Score for the current session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u64,
    pub parts_destroyed: u32,
}

impl Score {
    pub fn add(&mut self, destroyed: u32, points: u32) {
        self.parts_destroyed += destroyed;
        self.points += u64::from(points);
    }
}
