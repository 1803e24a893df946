//! Boss formation: layout, movement, firing and destruction bookkeeping.
//!
//! Parts live in an owned grid of columns. Destroying a part only tombstones
//! it (the part keeps its slot and shows an explosion); tombstones are
//! compacted out on the next movement step and empty columns are dropped by
//! [`BossFormation::cleanup`], so callers may destroy parts while still
//! holding ids gathered earlier in the same frame.

use bevy::prelude::*;

use super::kind::PartKind;
use super::part::{BossPart, PartId};
use super::variety::Variety;
use crate::combat::ProjectileFactory;
use crate::config::GameSettings;
use crate::core::{Cooldown, RandomSource, SoundCue, SoundPlayer};

/// Initial position of the formation's upper left corner.
pub const INIT_POS_X: i32 = 20;
pub const INIT_POS_Y: i32 = 100;
/// Lateral step of the formation.
pub const X_SPEED: i32 = 8;
/// Downward step of the formation.
pub const Y_SPEED: i32 = 4;
/// Vertical speed of projectiles fired by the formation.
pub const BULLET_SPEED: i32 = 4;
/// Proportion of difference between shooting intervals.
const SHOOTING_VARIANCE: f64 = 0.2;
/// Margin on the sides of the screen.
pub const SIDE_MARGIN: i32 = 20;
/// Margin on the bottom of the screen.
pub const BOTTOM_MARGIN: i32 = 80;
/// Descents stop on multiples of this altitude.
pub const DESCENT_DISTANCE: i32 = 20;
/// Frames between movement steps when a single part is left.
pub const MINIMUM_SPEED: u32 = 10;

/// Directions the formation can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
}

/// Axis-aligned box around the occupied columns, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn is_zero_size(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Boundary checks evaluated before every movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryFlags {
    pub at_bottom: bool,
    pub at_right: bool,
    pub at_left: bool,
    pub at_grid_line: bool,
}

impl BoundaryFlags {
    /// `origin_y` is the altitude of the first row's slot, which moves with
    /// every step whether or not that row survives. Grid lines are measured
    /// against it so descents always end.
    pub fn evaluate(bounds: &Bounds, origin_y: i32, screen_width: i32, screen_height: i32) -> Self {
        Self {
            at_bottom: bounds.y + bounds.height > screen_height - BOTTOM_MARGIN,
            at_right: bounds.x + bounds.width >= screen_width - SIDE_MARGIN,
            at_left: bounds.x <= SIDE_MARGIN,
            at_grid_line: origin_y.rem_euclid(DESCENT_DISTANCE) == 0,
        }
    }
}

/// Movement state transition. Returns the new `(current, previous)` pair.
pub fn next_direction(
    current: Direction,
    previous: Direction,
    flags: BoundaryFlags,
) -> (Direction, Direction) {
    match current {
        Direction::Down if flags.at_grid_line => {
            let resumed = match previous {
                Direction::Right => Direction::Left,
                _ => Direction::Right,
            };
            (resumed, previous)
        }
        Direction::Left if flags.at_left => {
            if flags.at_bottom {
                (Direction::Right, previous)
            } else {
                (Direction::Down, Direction::Left)
            }
        }
        Direction::Right if flags.at_right => {
            if flags.at_bottom {
                (Direction::Left, previous)
            } else {
                (Direction::Down, Direction::Right)
            }
        }
        _ => (current, previous),
    }
}

/// Result of [`BossFormation::destroy`] for the scoring collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestroyOutcome {
    /// Parts destroyed by this call.
    pub destroyed: u32,
    /// Points earned by this call.
    pub points: u32,
}

impl DestroyOutcome {
    pub fn merge(self, other: DestroyOutcome) -> Self {
        Self {
            destroyed: self.destroyed + other.destroyed,
            points: self.points + other.points,
        }
    }
}

/// A boss made of parts moving together as one unit.
pub struct BossFormation {
    variety: String,
    columns: Vec<Vec<BossPart>>,
    /// Columns at construction.
    columns_wide: u32,
    /// Rows at construction.
    rows_high: u32,
    separation: i32,
    base_speed: u32,
    /// Frames between movement steps, derived from the surviving fraction.
    movement_speed: u32,
    movement_interval: u32,
    direction: Direction,
    previous_direction: Direction,
    shooting_interval: u32,
    shooting_variance: u32,
    shooting_cooldown: Option<Cooldown>,
    bounds: Bounds,
    /// Altitude of the first row's slot.
    origin_y: i32,
    /// Parts allowed to fire.
    shooters: Vec<PartId>,
    live_count: i32,
    screen_width: i32,
    screen_height: i32,
    rng: Box<dyn RandomSource>,
}

impl BossFormation {
    pub fn new(variety: &Variety, settings: &GameSettings, rng: Box<dyn RandomSource>) -> Self {
        let columns_wide = settings.formation_width;
        let rows_high = settings.formation_height;
        let separation = variety.separation;

        if variety.kinds.is_empty() {
            warn!(
                "Boss variety '{}' has no part kinds; using drones",
                variety.name
            );
        }

        let mut next_id = 0;
        let mut columns = Vec::with_capacity(columns_wide as usize);
        for column in 0..columns_wide as usize {
            let kind = variety
                .kinds
                .get(column % variety.kinds.len().max(1))
                .copied()
                .unwrap_or(PartKind::Drone);
            let x = INIT_POS_X + separation * column as i32;

            let parts = (0..rows_high as i32)
                .map(|row| {
                    let id = PartId(next_id);
                    next_id += 1;
                    BossPart::new(
                        id,
                        kind,
                        x,
                        INIT_POS_Y + separation * row,
                        variety.health_per_part,
                    )
                })
                .collect::<Vec<_>>();
            columns.push(parts);
        }

        // The front (bottom) part of each column fires. When it is destroyed
        // the next live part up the column takes over.
        let shooters = columns
            .iter()
            .filter_map(|column| column.last().map(BossPart::id))
            .collect();

        let (part_width, part_height) = columns
            .first()
            .and_then(|column| column.first())
            .map(|part| (part.width(), part.height()))
            .unwrap_or((0, 0));
        let bounds = if columns_wide == 0 || rows_high == 0 {
            Bounds {
                x: INIT_POS_X,
                y: INIT_POS_Y,
                ..default()
            }
        } else {
            Bounds {
                x: INIT_POS_X,
                y: INIT_POS_Y,
                width: (columns_wide as i32 - 1) * separation + part_width,
                height: (rows_high as i32 - 1) * separation + part_height,
            }
        };

        let shooting_interval = settings.shooting_frequency;
        let shooting_variance = (f64::from(shooting_interval) * SHOOTING_VARIANCE) as u32;

        info!(
            "Boss formation '{}' initialized with {}x{} parts at ({}, {})",
            variety.name, columns_wide, rows_high, bounds.x, bounds.y
        );

        Self {
            variety: variety.name.clone(),
            columns,
            columns_wide,
            rows_high,
            separation,
            base_speed: settings.base_speed,
            movement_speed: settings.base_speed + MINIMUM_SPEED,
            movement_interval: 0,
            direction: Direction::Right,
            previous_direction: Direction::Right,
            shooting_interval,
            shooting_variance,
            shooting_cooldown: None,
            bounds,
            origin_y: INIT_POS_Y,
            shooters,
            live_count: (columns_wide * rows_high) as i32,
            screen_width: settings.screen_width,
            screen_height: settings.screen_height,
            rng,
        }
    }

    /// Advance the formation by one frame.
    ///
    /// Movement only happens every `movement_speed` frames. Parts are ticked
    /// on every call rather than inside the movement step, so their flash
    /// and animation timers count frames.
    pub fn update(&mut self) {
        if self.shooting_cooldown.is_none() {
            self.shooting_cooldown = Some(Cooldown::with_variance(
                self.shooting_interval,
                self.shooting_variance,
                self.rng.as_mut(),
            ));
        }
        if let Some(cooldown) = self.shooting_cooldown.as_mut() {
            cooldown.tick();
        }

        self.cleanup();

        let capacity = f64::from((self.columns_wide * self.rows_high).max(1));
        let remaining = f64::from(self.live_count.max(0)) / capacity;
        self.movement_speed =
            (remaining.powi(2) * f64::from(self.base_speed)) as u32 + MINIMUM_SPEED;

        self.movement_interval += 1;
        if self.movement_interval >= self.movement_speed {
            self.movement_interval = 0;
            self.step();
        }

        for part in self.live_parts_mut() {
            part.update();
        }
    }

    /// One discrete movement step.
    fn step(&mut self) {
        if self.columns.is_empty() || self.bounds.is_zero_size() {
            return;
        }

        let flags = BoundaryFlags::evaluate(
            &self.bounds,
            self.origin_y,
            self.screen_width,
            self.screen_height,
        );
        let (direction, previous) = next_direction(self.direction, self.previous_direction, flags);
        if direction != self.direction {
            debug!("Formation now moving {:?}", direction);
        }
        self.direction = direction;
        self.previous_direction = previous;

        let (dx, dy) = match self.direction {
            Direction::Right => (X_SPEED, 0),
            Direction::Left => (-X_SPEED, 0),
            Direction::Down => (0, Y_SPEED),
        };
        self.bounds.x += dx;
        self.bounds.y += dy;
        self.origin_y += dy;

        // Explosions have been on screen since their destruction; drop them.
        for (index, column) in self.columns.iter_mut().enumerate() {
            let before = column.len();
            column.retain(|part| !part.is_destroyed());
            if column.len() != before {
                debug!("Removed {} destroyed parts from column {}", before - column.len(), index);
            }
        }

        for part in self.live_parts_mut() {
            part.move_by(dx, dy);
        }
    }

    /// Drop columns without live parts and recompute the bounding box.
    pub fn cleanup(&mut self) {
        let before = self.columns.len();
        self.columns
            .retain(|column| column.iter().any(|part| !part.is_destroyed()));
        if self.columns.len() != before {
            debug!("Removed {} empty columns", before - self.columns.len());
        }

        let mut left = i32::MAX;
        let mut right = i32::MIN;
        let mut top = i32::MAX;
        let mut bottom = i32::MIN;
        for part in self.iter() {
            left = left.min(part.x());
            right = right.max(part.x() + part.width());
            top = top.min(part.y());
            bottom = bottom.max(part.y() + part.height());
        }

        self.bounds = if left > right {
            Bounds {
                x: self.bounds.x,
                y: self.bounds.y,
                width: 0,
                height: 0,
            }
        } else {
            Bounds {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            }
        };
    }

    /// Fire from a random shooter once the shot cooldown has elapsed.
    /// Returns `true` if a projectile was emitted.
    pub fn shoot<F: ProjectileFactory>(
        &mut self,
        factory: &mut F,
        bullets: &mut Vec<F::Projectile>,
        sound: &mut dyn SoundPlayer,
    ) -> bool {
        if self.shooters.is_empty() {
            return false;
        }

        let index = self.rng.below(self.shooters.len());
        let Some(origin) = self.muzzle(self.shooters[index]) else {
            return false;
        };

        let rng = self.rng.as_mut();
        let Some(cooldown) = self.shooting_cooldown.as_mut() else {
            return false;
        };
        if !cooldown.check_finished() {
            return false;
        }
        cooldown.reset_varied(rng);

        sound.play(SoundCue::ShotFired);
        bullets.push(factory.create(origin.x, origin.y, 0, BULLET_SPEED));
        true
    }

    /// Fire from the middle shooter, ignoring the cooldown.
    /// Returns `true` if a projectile was emitted.
    pub fn reflect<F: ProjectileFactory>(
        &mut self,
        factory: &mut F,
        bullets: &mut Vec<F::Projectile>,
    ) -> bool {
        if self.shooters.is_empty() {
            return false;
        }

        let Some(origin) = self.muzzle(self.shooters[self.shooters.len() / 2]) else {
            return false;
        };
        bullets.push(factory.create(origin.x, origin.y, 0, BULLET_SPEED));
        true
    }

    /// Apply one hit (or a chain explosion) to `id`.
    ///
    /// Self-explosive kinds never receive chain explosions and take a normal
    /// hit instead. A hit part leaves the shooter pool unless it is a core
    /// that survived the hit.
    pub fn destroy(
        &mut self,
        id: PartId,
        chain_exploding: bool,
        sound: &mut dyn SoundPlayer,
    ) -> DestroyOutcome {
        let Some((column, row)) = self.locate(id) else {
            return DestroyOutcome::default();
        };

        let part = &mut self.columns[column][row];
        let traits = part.kind().traits();
        let destroyed_now = if chain_exploding && !traits.is_self_explosive {
            part.chain_explode(sound)
        } else {
            part.hit(sound)
        };

        if destroyed_now || !traits.is_core {
            self.shooters.retain(|shooter| *shooter != id);
        }

        if !destroyed_now {
            return DestroyOutcome::default();
        }
        let points = part.point_value();

        debug!("Destroyed part {:?} at ({}, {})", id, column, row);
        self.live_count -= 1;
        self.promote_shooter(column);
        DestroyOutcome {
            destroyed: 1,
            points,
        }
    }

    /// Hand the column's fire to its lowest live part once it has no
    /// shooter left.
    fn promote_shooter(&mut self, column: usize) {
        let Some(parts) = self.columns.get(column) else {
            return;
        };
        if parts.iter().any(|part| self.shooters.contains(&part.id())) {
            return;
        }
        if let Some(next) = parts.iter().rev().find(|part| !part.is_destroyed()) {
            debug!("Part {:?} now fires for column {}", next.id(), column);
            self.shooters.push(next.id());
        }
    }

    /// Chain-explode every live part adjacent to `origin` in the grid.
    /// Returns the parts destroyed by the blast with their outcomes.
    pub fn chain_reaction(
        &mut self,
        origin: PartId,
        sound: &mut dyn SoundPlayer,
    ) -> Vec<(PartId, DestroyOutcome)> {
        let Some(center) = self.part(origin).map(BossPart::position) else {
            return Vec::new();
        };
        let reach = self.separation.abs();

        let neighbours = self
            .iter()
            .filter(|part| part.id() != origin)
            .filter(|part| {
                let offset = part.position() - center;
                offset.x.abs() <= reach && offset.y.abs() <= reach
            })
            .map(BossPart::id)
            .collect::<Vec<_>>();

        neighbours
            .into_iter()
            .map(|id| (id, self.destroy(id, true, &mut *sound)))
            .filter(|(_, outcome)| outcome.destroyed > 0)
            .collect()
    }

    fn locate(&self, id: PartId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(column, parts)| {
            parts
                .iter()
                .position(|part| part.id() == id)
                .map(|row| (column, row))
        })
    }

    /// Projectile origin for a shooter: bottom edge, horizontal center.
    fn muzzle(&self, id: PartId) -> Option<IVec2> {
        self.part(id)
            .filter(|part| !part.is_destroyed())
            .map(|part| IVec2::new(part.center_x(), part.y() + part.height()))
    }

    /// Live parts, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = &BossPart> {
        self.columns
            .iter()
            .flatten()
            .filter(|part| !part.is_destroyed())
    }

    fn live_parts_mut(&mut self) -> impl Iterator<Item = &mut BossPart> {
        self.columns
            .iter_mut()
            .flatten()
            .filter(|part| !part.is_destroyed())
    }

    /// Every part still in the grid, including explosions awaiting removal.
    pub fn draw_iter(&self) -> impl Iterator<Item = &BossPart> {
        self.columns.iter().flatten()
    }

    pub fn part(&self, id: PartId) -> Option<&BossPart> {
        self.draw_iter().find(|part| part.id() == id)
    }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut BossPart> {
        self.columns
            .iter_mut()
            .flatten()
            .find(|part| part.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.live_count <= 0
    }

    pub fn variety(&self) -> &str {
        &self.variety
    }

    pub fn live_count(&self) -> i32 {
        self.live_count
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn previous_direction(&self) -> Direction {
        self.previous_direction
    }

    pub fn movement_speed(&self) -> u32 {
        self.movement_speed
    }

    pub fn shooters(&self) -> &[PartId] {
        &self.shooters
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Kind of each column, left to right.
    pub fn column_kinds(&self) -> Vec<PartKind> {
        self.columns
            .iter()
            .filter_map(|column| column.first().map(BossPart::kind))
            .collect()
    }

    /// Part ids in one column, top to bottom.
    pub fn column_ids(&self, column: usize) -> Vec<PartId> {
        self.columns
            .get(column)
            .map(|parts| parts.iter().map(BossPart::id).collect())
            .unwrap_or_default()
    }
}
