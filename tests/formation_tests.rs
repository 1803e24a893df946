//! Behaviour tests for [`BossFormation`] driven frame by frame, without an `App`.
//!
//! Covered scenarios:
//! 1. Kinds are assigned to columns round-robin.
//! 2. Cleanup drops empty columns and shrinks the bounds.
//! 3. The formation sweeps right, steps down at the edge and turns left on a grid line.
//! 4. Shots respect the varied cooldown; reflections ignore it.
//! 5. Destroy, chain reactions, the shooter pool and scoring.

use boss_formation::boss::{
    BossFormation, DestroyOutcome, Direction, PartId, PartKind, Variety, POINT_VALUE,
};
use boss_formation::combat::{ProjectileSpawn, SpawnFactory};
use boss_formation::config::GameSettings;
use boss_formation::core::{RngSource, SoundCue};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn variety(kinds: &[PartKind], health_per_part: i32, separation: i32) -> Variety {
    Variety {
        name: "Test".to_string(),
        kinds: kinds.to_vec(),
        health_per_part,
        separation,
        reflects_shots: false,
    }
}

fn arms(health_per_part: i32) -> Variety {
    variety(
        &[PartKind::LeftArm, PartKind::Middle, PartKind::RightArm],
        health_per_part,
        40,
    )
}

fn settings(formation_width: u32) -> GameSettings {
    GameSettings {
        formation_width,
        ..Default::default()
    }
}

fn build(variety: &Variety, settings: &GameSettings) -> BossFormation {
    BossFormation::new(variety, settings, Box::new(RngSource::seeded(7)))
}

fn run(formation: &mut BossFormation, frames: u32) {
    for _ in 0..frames {
        formation.update();
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn kinds_cycle_across_columns() {
    let formation = build(&arms(6), &settings(5));
    assert_eq!(
        formation.column_kinds(),
        vec![
            PartKind::LeftArm,
            PartKind::Middle,
            PartKind::RightArm,
            PartKind::LeftArm,
            PartKind::Middle,
        ]
    );
    assert_eq!(formation.live_count(), 5);
    assert_eq!(formation.shooters().len(), 5);
}

#[test]
fn rows_are_spaced_by_separation_and_bottom_row_shoots() {
    let settings = GameSettings {
        formation_width: 2,
        formation_height: 3,
        ..Default::default()
    };
    let formation = build(&arms(2), &settings);

    let column = formation.column_ids(0);
    assert_eq!(column.len(), 3);
    let ys: Vec<i32> = column
        .iter()
        .filter_map(|id| formation.part(*id))
        .map(|part| part.y())
        .collect();
    assert_eq!(ys, vec![100, 140, 180]);

    assert_eq!(formation.shooters(), &[column[2], formation.column_ids(1)[2]]);
    assert_eq!(formation.bounds().height, 2 * 40 + 48);
}

// ── Cleanup ───────────────────────────────────────────────────────────────────

#[test]
fn cleanup_drops_empty_columns_and_recomputes_bounds() {
    let mut formation = build(&arms(1), &settings(3));
    let middle = formation.column_ids(1)[0];

    let outcome = formation.destroy(middle, false, &mut Vec::new());
    assert_eq!(outcome.destroyed, 1);
    formation.cleanup();

    assert_eq!(formation.column_count(), 2);
    let bounds = formation.bounds();
    assert_eq!(bounds.x, 20);
    assert_eq!(bounds.width, 104);
    assert_eq!(bounds.height, 48);
}

#[test]
fn destroyed_parts_stay_drawable_until_the_next_step() {
    let mut formation = build(&arms(1), &settings(3));
    let left = formation.column_ids(0)[0];
    let mut cues = Vec::new();
    formation.destroy(left, false, &mut cues);

    // Tombstone still present, but no longer live.
    assert!(formation.part(left).is_some_and(|part| part.is_destroyed()));
    assert_eq!(formation.iter().count(), 2);
    assert_eq!(formation.draw_iter().count(), 3);

    // Hitting the tombstone changes nothing.
    assert_eq!(
        formation.destroy(left, false, &mut cues),
        DestroyOutcome::default()
    );
    assert_eq!(cues, vec![SoundCue::PartDestroyed]);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn formation_sweeps_right_then_descends_then_turns_left() {
    let settings = GameSettings {
        formation_width: 3,
        base_speed: 0,
        screen_width: 200,
        ..Default::default()
    };
    let mut formation = build(&arms(6), &settings);
    assert_eq!(formation.direction(), Direction::Right);

    // One step every 10 frames; steps 1-7 move right.
    run(&mut formation, 70);
    assert_eq!(formation.direction(), Direction::Right);
    assert_eq!(formation.bounds().x, 20 + 7 * 8);

    // Step 8 reaches the right margin.
    run(&mut formation, 10);
    assert_eq!(formation.direction(), Direction::Down);
    assert_eq!(formation.previous_direction(), Direction::Right);
    assert_eq!(formation.bounds().y, 104);

    // Steps 9-12 keep descending until y lands on a multiple of 20.
    run(&mut formation, 40);
    assert_eq!(formation.direction(), Direction::Down);
    assert_eq!(formation.bounds().y, 120);

    run(&mut formation, 10);
    assert_eq!(formation.direction(), Direction::Left);
    assert_eq!(formation.bounds().y, 120);
    assert_eq!(formation.bounds().x, 76 - 8);
}

#[test]
fn descent_ends_after_the_top_row_is_destroyed() {
    let settings = GameSettings {
        formation_width: 3,
        formation_height: 2,
        base_speed: 0,
        screen_width: 200,
        ..Default::default()
    };
    let mut formation = build(&variety(&[PartKind::Middle], 6, 30), &settings);
    for column in 0..3 {
        let top = formation.column_ids(column)[0];
        for _ in 0..6 {
            formation.destroy(top, false, &mut Vec::new());
        }
    }
    formation.cleanup();
    assert_eq!(formation.bounds().y, 130);
    assert_eq!(formation.bounds().width, 84);

    // Step 11 reaches the right margin.
    run(&mut formation, 110);
    assert_eq!(formation.direction(), Direction::Down);

    // Four more steps bring the layout back onto a grid line.
    run(&mut formation, 40);
    assert_eq!(formation.direction(), Direction::Down);
    assert_eq!(formation.bounds().y, 150);

    run(&mut formation, 10);
    assert_eq!(formation.direction(), Direction::Left);
    assert_eq!(formation.bounds().y, 150);
}

#[test]
fn losing_parts_speeds_up_movement() {
    let mut formation = build(&arms(1), &settings(3));
    formation.update();
    assert_eq!(formation.movement_speed(), 60 + 10);

    let ids: Vec<PartId> = formation.iter().map(|part| part.id()).collect();
    formation.destroy(ids[0], false, &mut Vec::new());
    formation.destroy(ids[1], false, &mut Vec::new());
    formation.update();

    // floor((1/3)^2 * 60) + 10
    assert_eq!(formation.movement_speed(), 16);
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn shots_wait_for_the_varied_cooldown() {
    let settings = GameSettings {
        formation_width: 3,
        shooting_frequency: 10,
        ..Default::default()
    };
    let mut formation = build(&arms(6), &settings);
    let mut bullets = Vec::new();
    let mut cues = Vec::new();

    // No cooldown before the first update.
    assert!(!formation.shoot(&mut SpawnFactory, &mut bullets, &mut cues));

    formation.update();
    assert!(!formation.shoot(&mut SpawnFactory, &mut bullets, &mut cues));
    assert!(bullets.is_empty());

    // The interval is drawn from 10 +/- 2 frames.
    run(&mut formation, 12);
    assert!(formation.shoot(&mut SpawnFactory, &mut bullets, &mut cues));
    assert!(!formation.shoot(&mut SpawnFactory, &mut bullets, &mut cues));

    assert_eq!(bullets.len(), 1);
    let shot = bullets[0];
    assert!([32, 72, 112].contains(&shot.x));
    assert_eq!(shot.y, 148);
    assert_eq!((shot.speed_x, shot.speed_y), (0, 4));
    assert_eq!(cues, vec![SoundCue::ShotFired]);
}

#[test]
fn reflect_ignores_the_cooldown_and_fires_from_the_middle() {
    let mut formation = build(&arms(5), &settings(3));
    let mut bullets = Vec::new();

    assert!(formation.reflect(&mut SpawnFactory, &mut bullets));
    assert_eq!(
        bullets,
        vec![ProjectileSpawn {
            x: 72,
            y: 148,
            speed_x: 0,
            speed_y: 4,
        }]
    );
}

#[test]
fn hit_parts_leave_the_shooter_pool() {
    let mut formation = build(&arms(5), &settings(3));
    let ids: Vec<PartId> = formation.iter().map(|part| part.id()).collect();
    let mut cues = Vec::new();

    for id in &ids {
        assert_eq!(
            formation.destroy(*id, false, &mut cues),
            DestroyOutcome::default()
        );
    }
    assert!(formation.shooters().is_empty());
    assert_eq!(formation.live_count(), 3);

    let mut bullets = Vec::new();
    assert!(!formation.reflect(&mut SpawnFactory, &mut bullets));
    run(&mut formation, 200);
    assert!(!formation.shoot(&mut SpawnFactory, &mut bullets, &mut cues));
    assert!(bullets.is_empty());
}

#[test]
fn next_part_up_the_column_takes_over_firing() {
    let settings = GameSettings {
        formation_width: 1,
        formation_height: 2,
        shooting_frequency: 10,
        ..Default::default()
    };
    let mut formation = build(&arms(1), &settings);
    let [top, bottom] = [formation.column_ids(0)[0], formation.column_ids(0)[1]];
    assert_eq!(formation.shooters(), &[bottom]);

    formation.destroy(bottom, false, &mut Vec::new());
    assert_eq!(formation.shooters(), &[top]);

    let mut bullets = Vec::new();
    run(&mut formation, 13);
    assert!(formation.shoot(&mut SpawnFactory, &mut bullets, &mut Vec::new()));
    // Fired from the top part's bottom edge.
    assert_eq!(bullets[0].y, 100 + 48);

    formation.destroy(top, false, &mut Vec::new());
    assert!(formation.shooters().is_empty());
}

#[test]
fn core_keeps_shooting_until_destroyed() {
    let mut formation = build(&variety(&[PartKind::Core], 3, 170), &settings(1));
    let core = formation.column_ids(0)[0];
    let mut cues = Vec::new();

    formation.destroy(core, false, &mut cues);
    formation.destroy(core, false, &mut cues);
    assert_eq!(formation.shooters(), &[core]);

    let outcome = formation.destroy(core, false, &mut cues);
    assert_eq!(outcome.destroyed, 1);
    assert!(formation.shooters().is_empty());
    assert_eq!(
        cues,
        vec![SoundCue::Hit, SoundCue::Hit, SoundCue::BossDied]
    );
}

// ── Destruction ───────────────────────────────────────────────────────────────

#[test]
fn destroying_an_absent_part_is_a_no_op() {
    let mut formation = build(&arms(1), &settings(3));
    let mut cues = Vec::new();

    assert_eq!(
        formation.destroy(PartId(99), false, &mut cues),
        DestroyOutcome::default()
    );
    assert!(cues.is_empty());
    assert_eq!(formation.live_count(), 3);
}

#[test]
fn points_are_awarded_only_on_destruction() {
    let mut formation = build(&arms(2), &settings(1));
    let part = formation.column_ids(0)[0];
    let mut cues = Vec::new();

    assert_eq!(formation.destroy(part, false, &mut cues).points, 0);
    let outcome = formation.destroy(part, false, &mut cues);
    assert_eq!(
        outcome,
        DestroyOutcome {
            destroyed: 1,
            points: POINT_VALUE,
        }
    );
}

#[test]
fn formation_is_empty_once_every_part_is_destroyed() {
    let mut formation = build(&arms(1), &settings(2));
    assert!(!formation.is_empty());

    let ids: Vec<PartId> = formation.iter().map(|part| part.id()).collect();
    for id in ids {
        formation.destroy(id, false, &mut Vec::new());
    }
    assert!(formation.is_empty());

    // Empty formations keep ticking without moving.
    let before = formation.bounds();
    run(&mut formation, 100);
    assert_eq!(formation.column_count(), 0);
    assert_eq!((formation.bounds().x, formation.bounds().y), (before.x, before.y));
    assert!(formation.bounds().is_zero_size());
}

#[test]
fn zero_width_formation_starts_empty() {
    let mut formation = build(&arms(1), &settings(0));
    assert!(formation.is_empty());
    run(&mut formation, 10);
    assert_eq!(formation.live_count(), 0);
}

#[test]
fn explosive_parts_chain_into_neighbours() {
    let hive = variety(
        &[PartKind::Drone, PartKind::Explosive, PartKind::Drone],
        2,
        30,
    );
    let mut formation = build(&hive, &settings(3));
    let bomb = formation.column_ids(1)[0];
    let mut cues = Vec::new();

    formation.destroy(bomb, false, &mut cues);
    assert_eq!(formation.destroy(bomb, false, &mut cues).destroyed, 1);

    let chained = formation.chain_reaction(bomb, &mut cues);
    assert_eq!(chained.len(), 2);
    assert!(chained.iter().all(|(_, outcome)| outcome.points == POINT_VALUE));
    assert!(formation
        .draw_iter()
        .filter(|part| part.id() != bomb)
        .all(|part| part.is_chain_exploded()));
    assert!(formation.is_empty());
}

#[test]
fn chain_reactions_only_hit_other_explosives() {
    let field = variety(
        &[PartKind::Explosive, PartKind::Explosive, PartKind::Drone],
        2,
        30,
    );
    let mut formation = build(&field, &settings(3));
    let first = formation.column_ids(0)[0];
    let second = formation.column_ids(1)[0];
    let mut cues = Vec::new();

    formation.destroy(first, false, &mut cues);
    formation.destroy(first, false, &mut cues);
    assert!(formation.chain_reaction(first, &mut cues).is_empty());

    let neighbour = formation.part(second).unwrap();
    assert_eq!(neighbour.hp(), 1);
    assert!(!neighbour.is_chain_exploded());
    assert_eq!(formation.live_count(), 2);
}
