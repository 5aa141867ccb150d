//! Enemy, troop and map event registries
//!
//! Registries are keyed by the record's own id. The host's JSON files are
//! arrays whose slot 0 (and any deleted entry) is `null`; those holes are
//! skipped on load.
//!
//! # Example
//!
//! ```ignore
//! let db = Database::load_dir("data", 1)?;
//! let troop = db.troop(3).expect("troop 3");
//! for member in &troop.members {
//!     let enemy = db.enemy(member.enemy_id);
//! }
//! ```

use super::notetag::{extract_metadata, Meta};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

pub type EnemyId = u32;
pub type TroopId = u32;
pub type EventId = u32;

/// Errors raised while loading data files
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An enemy definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: EnemyId,

    /// Battler graphic name, used as the enemy's label
    pub battler_name: String,

    #[serde(default)]
    pub exp: u32,

    #[serde(default)]
    pub gold: u32,
}

impl Enemy {
    pub fn new(id: EnemyId, battler_name: impl Into<String>, exp: u32, gold: u32) -> Self {
        Enemy {
            id,
            battler_name: battler_name.into(),
            exp,
            gold,
        }
    }
}

/// One enemy slot in a troop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TroopMemberRef {
    pub enemy_id: EnemyId,
}

/// An ordered group of enemies fought together
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Troop {
    pub id: TroopId,

    #[serde(default)]
    pub name: String,

    /// Declaration order, duplicates allowed
    #[serde(default)]
    pub members: Vec<TroopMemberRef>,
}

impl Troop {
    pub fn new(id: TroopId, name: impl Into<String>, enemy_ids: &[EnemyId]) -> Self {
        Troop {
            id,
            name: name.into(),
            members: enemy_ids
                .iter()
                .map(|&enemy_id| TroopMemberRef { enemy_id })
                .collect(),
        }
    }
}

/// An event placed on the current map
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapEvent {
    pub id: EventId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub note: String,

    /// Tile position
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,

    /// Extracted from `note`
    #[serde(skip)]
    pub meta: Meta,
}

impl MapEvent {
    pub fn new(id: EventId, name: impl Into<String>, note: impl Into<String>, x: i32, y: i32) -> Self {
        let note = note.into();
        MapEvent {
            id,
            name: name.into(),
            meta: extract_metadata(&note),
            note,
            x,
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default)]
    pub currency_unit: String,
}

#[derive(Deserialize)]
struct MapFile {
    #[serde(default)]
    events: Vec<Option<MapEvent>>,
}

/// Read-only game data shared by all overlays
#[derive(Debug, Clone)]
pub struct Database {
    enemies: HashMap<EnemyId, Enemy>,
    troops: HashMap<TroopId, Troop>,
    events: BTreeMap<EventId, MapEvent>,
    system: SystemData,
}

impl Database {
    /// Creates an empty database with the given currency unit
    pub fn new(currency_unit: impl Into<String>) -> Self {
        Database {
            enemies: HashMap::new(),
            troops: HashMap::new(),
            events: BTreeMap::new(),
            system: SystemData {
                currency_unit: currency_unit.into(),
            },
        }
    }

    /// Loads `Enemies.json`, `Troops.json`, `System.json` and `MapNNN.json`
    pub fn load_dir(dir: impl AsRef<Path>, map_id: u32) -> Result<Self, DataError> {
        let dir = dir.as_ref();

        let enemies: Vec<Option<Enemy>> = read_json(&dir.join("Enemies.json"))?;
        let troops: Vec<Option<Troop>> = read_json(&dir.join("Troops.json"))?;
        let system: SystemData = read_json(&dir.join("System.json"))?;
        let map: MapFile = read_json(&dir.join(format!("Map{:03}.json", map_id)))?;

        let mut db = Database::new(system.currency_unit);
        enemies.into_iter().flatten().for_each(|enemy| db.insert_enemy(enemy));
        troops.into_iter().flatten().for_each(|troop| db.insert_troop(troop));
        for mut event in map.events.into_iter().flatten() {
            event.meta = extract_metadata(&event.note);
            db.insert_event(event);
        }

        info!(
            "Loaded {} enemies, {} troops, {} events from {}",
            db.enemies.len(),
            db.troops.len(),
            db.events.len(),
            dir.display()
        );

        Ok(db)
    }

    pub fn insert_enemy(&mut self, enemy: Enemy) {
        self.enemies.insert(enemy.id, enemy);
    }

    pub fn insert_troop(&mut self, troop: Troop) {
        self.troops.insert(troop.id, troop);
    }

    pub fn insert_event(&mut self, event: MapEvent) {
        self.events.insert(event.id, event);
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn troop(&self, id: TroopId) -> Option<&Troop> {
        self.troops.get(&id)
    }

    pub fn event(&self, id: EventId) -> Option<&MapEvent> {
        self.events.get(&id)
    }

    /// Map events in id order
    pub fn events(&self) -> impl Iterator<Item = &MapEvent> {
        self.events.values()
    }

    pub fn currency_unit(&self) -> &str {
        &self.system.currency_unit
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!("Parsing {}", path.display());
    serde_json::from_str(&json).map_err(|source| DataError::Parse {
        path: path.display().to_string(),
        source,
    })
}
