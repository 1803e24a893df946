//! Combat systems - boss fire, bullet motion, hit resolution and scoring.

use bevy::prelude::*;

use super::components::*;
use crate::boss::{ActiveBoss, BossFormation, DestroyOutcome, EncounterSet, PartId};
use crate::config::GameSettings;
use crate::core::{BossPartDestroyed, GameState, ScoreEvent, SoundCueEvent};

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<Score>()

        // Bullets keep flying while a boss is on screen
        .add_systems(
            Update,
            (move_projectiles, despawn_offscreen_projectiles)
                .chain()
                .in_set(EncounterSet::Advance),
        )

        // Boss fire
        .add_systems(Update, formation_fire.in_set(EncounterSet::Fire))

        // Player hits
        .add_systems(Update, resolve_player_hits.in_set(EncounterSet::Resolve))

        // Scoring
        .add_systems(Update, accumulate_score.in_set(EncounterSet::Outcome))

        // Leftover bullets do not survive the encounter
        .add_systems(OnExit(GameState::Encounter), clear_projectiles);
}

/// Advance every bullet by its velocity.
fn move_projectiles(mut query: Query<&mut Projectile>) {
    for mut projectile in query.iter_mut() {
        let velocity = projectile.velocity;
        projectile.position += velocity;
    }
}

fn despawn_offscreen_projectiles(
    mut commands: Commands,
    query: Query<(Entity, &Projectile)>,
    settings: Res<GameSettings>,
) {
    for (entity, projectile) in query.iter() {
        if projectile.is_off_screen(settings.screen_width, settings.screen_height) {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Let the formation fire once its shot cooldown allows it.
fn formation_fire(
    mut commands: Commands,
    mut boss: ResMut<ActiveBoss>,
    mut cues: EventWriter<SoundCueEvent>,
) {
    let mut shots = Vec::new();
    if boss.formation.shoot(&mut BossShotFactory, &mut shots, &mut cues) {
        commands.spawn_batch(shots);
    }
}

/// Check player bullets against live parts.
///
/// Each bullet damages at most one part and is consumed by the hit.
/// Destroying a self-explosive part sets off its neighbours.
fn resolve_player_hits(
    mut commands: Commands,
    mut boss: ResMut<ActiveBoss>,
    projectiles: Query<(Entity, &Projectile)>,
    mut cues: EventWriter<SoundCueEvent>,
    mut destroyed_events: EventWriter<BossPartDestroyed>,
    mut score_events: EventWriter<ScoreEvent>,
) {
    let boss = &mut *boss;
    let mut reflected = Vec::new();

    for (entity, projectile) in projectiles.iter() {
        if projectile.faction != Faction::Player {
            continue;
        }

        let Some(target) = boss
            .formation
            .iter()
            .find(|part| projectile.overlaps(part))
            .map(|part| part.id())
        else {
            continue;
        };
        commands.entity(entity).despawn_recursive();

        let mut outcome = boss.formation.destroy(target, false, &mut cues);
        if outcome.destroyed > 0 {
            report_destroyed(&boss.formation, target, &mut destroyed_events);

            let explosive = boss
                .formation
                .part(target)
                .is_some_and(|part| part.kind().traits().is_self_explosive);
            if explosive {
                for (id, chained) in boss.formation.chain_reaction(target, &mut cues) {
                    report_destroyed(&boss.formation, id, &mut destroyed_events);
                    outcome = outcome.merge(chained);
                }
            }
        }

        if boss.variety.reflects_shots {
            boss.formation.reflect(&mut BossShotFactory, &mut reflected);
        }

        send_score(outcome, &mut score_events);
    }

    if !reflected.is_empty() {
        commands.spawn_batch(reflected);
    }
}

fn report_destroyed(
    formation: &BossFormation,
    id: PartId,
    events: &mut EventWriter<BossPartDestroyed>,
) {
    let Some(part) = formation.part(id) else {
        return;
    };
    events.send(BossPartDestroyed {
        part: id,
        kind: part.kind(),
        position: part.position(),
        chain_exploded: part.is_chain_exploded(),
    });
}

fn send_score(outcome: DestroyOutcome, events: &mut EventWriter<ScoreEvent>) {
    if outcome.destroyed == 0 {
        return;
    }
    events.send(ScoreEvent {
        destroyed: outcome.destroyed,
        points: outcome.points,
    });
}

/// Fold score events into the session score.
fn accumulate_score(mut events: EventReader<ScoreEvent>, mut score: ResMut<Score>) {
    for event in events.read() {
        score.add(event.destroyed, event.points);
        debug!(
            "Score +{} ({} parts), total {}",
            event.points, event.destroyed, score.points
        );
    }
}

fn clear_projectiles(mut commands: Commands, query: Query<Entity, With<Projectile>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
