//! Boss variety templates and the catalog they are looked up from.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use super::kind::PartKind;
use crate::error::BossDataError;

/// Default location of the catalog file.
pub const CATALOG_PATH: &str = "assets/data/bosses.ron";

/// Name of the fallback variety in the built-in catalog.
pub const DEFAULT_VARIETY: &str = "DefaultBoss";

fn default_separation() -> i32 {
    40
}

/// Template describing one kind of boss.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Variety {
    pub name: String,
    /// Part kinds, cycled round-robin across columns.
    pub kinds: Vec<PartKind>,
    pub health_per_part: i32,
    /// Distance between neighbouring columns and rows.
    #[serde(default = "default_separation")]
    pub separation: i32,
    /// Answers player hits by firing back via `BossFormation::reflect`.
    #[serde(default)]
    pub reflects_shots: bool,
}

/// Catalog file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub default: String,
    pub varieties: Vec<Variety>,
}

/// Immutable table of boss varieties.
#[derive(Resource, Debug, Clone)]
pub struct VarietyCatalog {
    varieties: HashMap<String, Variety>,
    default: String,
}

impl Default for VarietyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VarietyCatalog {
    /// Validate and index a set of varieties.
    pub fn new(
        varieties: Vec<Variety>,
        default: impl Into<String>,
    ) -> Result<Self, BossDataError> {
        let default = default.into();
        let mut table = HashMap::with_capacity(varieties.len());

        for variety in varieties {
            if variety.kinds.is_empty() {
                return Err(BossDataError::EmptyKinds { name: variety.name });
            }
            if variety.health_per_part < 1 {
                return Err(BossDataError::InvalidHealth {
                    name: variety.name,
                    health: variety.health_per_part,
                });
            }
            if table.contains_key(&variety.name) {
                return Err(BossDataError::DuplicateVariety { name: variety.name });
            }
            table.insert(variety.name.clone(), variety);
        }

        if !table.contains_key(&default) {
            return Err(BossDataError::MissingDefault { name: default });
        }

        Ok(Self {
            varieties: table,
            default,
        })
    }

    /// The varieties shipped with the game.
    pub fn builtin() -> Self {
        let arms = vec![PartKind::LeftArm, PartKind::Middle, PartKind::RightArm];
        let variety = |name: &str, health_per_part: i32, reflects_shots: bool| Variety {
            name: name.to_string(),
            kinds: arms.clone(),
            health_per_part,
            separation: default_separation(),
            reflects_shots,
        };

        let mut varieties = HashMap::new();
        for v in [
            variety("Crab", 8, false),
            variety("Turtle", 5, true),
            variety(DEFAULT_VARIETY, 6, false),
        ] {
            varieties.insert(v.name.clone(), v);
        }

        Self {
            varieties,
            default: DEFAULT_VARIETY.to_string(),
        }
    }

    /// Parse and validate a catalog from RON text.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, BossDataError> {
        let file: CatalogFile =
            ron::from_str(contents).map_err(|e| BossDataError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        Self::new(file.varieties, file.default)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: &str) -> Result<Self, BossDataError> {
        let contents = fs::read_to_string(path).map_err(|e| BossDataError::ReadError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, path)
    }

    /// Variety registered as `name`, or the default variety.
    pub fn lookup(&self, name: &str) -> &Variety {
        if let Some(variety) = self.varieties.get(name) {
            return variety;
        }
        warn!(
            "Unknown boss variety '{}', falling back to '{}'",
            name, self.default
        );
        &self.varieties[&self.default]
    }

    pub fn get(&self, name: &str) -> Option<&Variety> {
        self.varieties.get(name)
    }

    pub fn default_variety(&self) -> &Variety {
        &self.varieties[&self.default]
    }

    pub fn len(&self) -> usize {
        self.varieties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.varieties.is_empty()
    }
}

/// Load the variety catalog at startup.
///
/// A file that fails validation is rejected as a whole and the built-in
/// catalog stays in place.
pub fn load_variety_catalog(mut catalog: ResMut<VarietyCatalog>) {
    match VarietyCatalog::load(CATALOG_PATH) {
        Ok(loaded) => {
            info!("Loaded {} boss varieties from {}", loaded.len(), CATALOG_PATH);
            *catalog = loaded;
        }
        Err(BossDataError::ReadError { path, details }) => {
            warn!("Could not read {}: {}. Using built-in varieties.", path, details);
        }
        Err(e) => {
            error!("Rejected boss catalog: {}. Using built-in varieties.", e);
        }
    }
}
