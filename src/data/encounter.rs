//! The `OnMapTroop` encounter tag
//!
//! Authoring format on a map event's note: `<OnMapTroop: id[, reserved...]>`.
//! The first field is the troop id; trailing fields are kept but unused.

use super::database::TroopId;
use super::notetag::{Meta, MetaValue};

/// Tag name looked up in an event's metadata
pub const ENCOUNTER_TAG: &str = "OnMapTroop";

/// Reasons an `OnMapTroop` tag cannot be used
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("OnMapTroop tag has no troop id")]
    MissingTroopId,

    #[error("OnMapTroop troop id is not a non-negative integer: {0:?}")]
    InvalidTroopId(String),
}

/// A parsed encounter tag. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterReference {
    pub troop_id: TroopId,

    /// Extra comma-separated fields, trimmed, in authoring order
    pub reserved: Vec<String>,
}

impl EncounterReference {
    pub fn new(troop_id: TroopId) -> Self {
        EncounterReference {
            troop_id,
            reserved: Vec::new(),
        }
    }

    /// Parses the tag value (`" 3, foo"`)
    pub fn parse(value: &str) -> Result<Self, TagError> {
        let mut fields = value.split(',').map(str::trim);

        let id_field = match fields.next() {
            Some(field) if !field.is_empty() => field,
            _ => return Err(TagError::MissingTroopId),
        };

        let troop_id = id_field
            .parse::<TroopId>()
            .map_err(|_| TagError::InvalidTroopId(id_field.to_string()))?;

        Ok(EncounterReference {
            troop_id,
            reserved: fields.map(str::to_string).collect(),
        })
    }

    /// Looks for the encounter tag in event metadata
    ///
    /// `None` means the event is not an encounter at all.
    pub fn from_meta(meta: &Meta) -> Option<Result<Self, TagError>> {
        let value = meta.get(ENCOUNTER_TAG)?;
        Some(match value {
            MetaValue::Text(text) => Self::parse(text),
            MetaValue::Flag => Err(TagError::MissingTroopId),
        })
    }
}
