//! Projectile creation seam between the boss core and whoever owns bullets.

/// Builds projectile handles for formations to push into a caller-owned sink.
pub trait ProjectileFactory {
    type Projectile;

    /// Create a projectile at `(x, y)` moving `(speed_x, speed_y)` per frame.
    fn create(&mut self, x: i32, y: i32, speed_x: i32, speed_y: i32) -> Self::Projectile;
}

/// Engine-independent description of a fired projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileSpawn {
    pub x: i32,
    pub y: i32,
    pub speed_x: i32,
    pub speed_y: i32,
}

/// Factory producing plain [`ProjectileSpawn`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnFactory;

impl ProjectileFactory for SpawnFactory {
    type Projectile = ProjectileSpawn;

    fn create(&mut self, x: i32, y: i32, speed_x: i32, speed_y: i32) -> ProjectileSpawn {
        ProjectileSpawn {
            x,
            y,
            speed_x,
            speed_y,
        }
    }
}
