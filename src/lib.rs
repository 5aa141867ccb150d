//! On-map troop overlays
//!
//! Map events tagged `<OnMapTroop: id>` get a small window above their
//! sprite listing the troop's enemies and the exp and gold it is worth.
//!
//! # Modules
//!
//! - `config`: display options from plugin parameters
//! - `data`: enemy/troop/map event registries and notetags
//! - `summary`: troop to overlay text
//! - `overlay`: overlay window and its per-sprite anchor
//! - `spriteset`: host sprites that own the anchors
//! - `text`: bitmap font
//! - `render`: SDL2 backend (feature `sdl`)

pub mod config;
pub mod data;
pub mod overlay;
pub mod spriteset;
pub mod summary;
pub mod text;

#[cfg(feature = "sdl")]
pub mod render;

pub use config::{DisplayOptions, OverlayStyle, PluginParameters};
pub use data::{Database, EncounterReference};
pub use overlay::{AnchorState, OverlayAnchor, OverlayContext};
pub use spriteset::{CharacterSprite, Spriteset};
pub use summary::{resolve, ResolveError, TroopSummary};
