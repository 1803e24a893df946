//! Boss plugin - loads boss data and drives the active formation.

use bevy::prelude::*;

use super::formation::BossFormation;
use super::variety::{load_variety_catalog, Variety, VarietyCatalog};
use crate::config::{load_game_settings, GameSettings};
use crate::core::{BossDefeated, GameState, RandomSource, RngSource};

/// System set ordering for one encounter frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EncounterSet {
    /// Formation movement and part animation.
    Advance,
    /// Formation shots.
    Fire,
    /// Player shots against boss parts.
    Resolve,
    /// Scoring and defeat checks.
    Outcome,
}

/// The boss currently on screen.
#[derive(Resource)]
pub struct ActiveBoss {
    pub formation: BossFormation,
    pub variety: Variety,
    defeated: bool,
}

impl ActiveBoss {
    pub fn new(formation: BossFormation, variety: Variety) -> Self {
        Self {
            formation,
            variety,
            defeated: false,
        }
    }

    /// Whether the defeat has already been announced.
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }
}

/// Boss plugin - handles data loading and the formation lifecycle.
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<GameSettings>()
            .init_resource::<VarietyCatalog>()

            // Data files
            .add_systems(Startup, (load_game_settings, load_variety_catalog))

            // System ordering
            .configure_sets(
                Update,
                (
                    EncounterSet::Advance,
                    EncounterSet::Fire,
                    EncounterSet::Resolve,
                    EncounterSet::Outcome,
                )
                    .chain()
                    .run_if(in_state(GameState::Encounter))
                    .run_if(resource_exists::<ActiveBoss>),
            )

            // Lifecycle
            .add_systems(OnEnter(GameState::Encounter), spawn_boss)
            .add_systems(OnExit(GameState::Encounter), despawn_boss)

            // Per-frame systems
            .add_systems(Update, advance_formation.in_set(EncounterSet::Advance))
            .add_systems(Update, check_boss_defeated.in_set(EncounterSet::Outcome));
    }
}

/// Build the formation for the configured variety.
fn spawn_boss(
    mut commands: Commands,
    settings: Res<GameSettings>,
    catalog: Res<VarietyCatalog>,
) {
    if !settings.boss_level {
        info!("Level has no boss encounter");
        return;
    }

    let variety = catalog.lookup(&settings.boss_type).clone();
    let rng: Box<dyn RandomSource> = match settings.rng_seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::from_entropy()),
    };
    let formation = BossFormation::new(&variety, &settings, rng);

    info!(
        "Spawned boss '{}' with {} parts",
        variety.name,
        formation.live_count()
    );
    commands.insert_resource(ActiveBoss::new(formation, variety));
}

fn despawn_boss(mut commands: Commands) {
    commands.remove_resource::<ActiveBoss>();
}

/// Tick the formation once per frame.
fn advance_formation(mut boss: ResMut<ActiveBoss>) {
    boss.formation.update();
}

/// Announce the defeat once the last part is gone.
fn check_boss_defeated(mut boss: ResMut<ActiveBoss>, mut defeated: EventWriter<BossDefeated>) {
    if boss.defeated || !boss.formation.is_empty() {
        return;
    }
    boss.defeated = true;
    defeated.send(BossDefeated {
        variety: boss.variety.name.clone(),
    });
}
