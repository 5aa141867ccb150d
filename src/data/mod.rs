//! Game data consumed by the overlays
//!
//! Everything here is read-only from the overlay's point of view: enemy and
//! troop registries, the current map's events and the system currency unit.
//!
//! # Architecture
//!
//! - `database`: id-indexed registries and JSON loading
//! - `notetag`: `<Key:value>` metadata extraction from note fields
//! - `encounter`: the `OnMapTroop` tag parsed into an [`EncounterReference`]

pub mod database;
pub mod encounter;
pub mod notetag;

pub use database::{
    DataError, Database, Enemy, EnemyId, EventId, MapEvent, SystemData, Troop, TroopId,
    TroopMemberRef,
};
pub use encounter::{EncounterReference, TagError, ENCOUNTER_TAG};
pub use notetag::{extract_metadata, Meta, MetaValue};
