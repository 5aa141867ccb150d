//! World-space troop overlays
//!
//! An overlay is a small window floating above an encounter sprite that
//! lists the troop behind it and what beating it pays out.
//!
//! # Architecture
//!
//! - `surface`: what the host must provide ([`TextSurface`], [`OverlayHost`])
//! - `window`: [`TroopInfoWindow`], text caching, sizing and redraw
//! - `anchor`: [`OverlayAnchor`], the per-sprite lifecycle and placement
//!
//! # Example Usage
//!
//! ```ignore
//! let ctx = OverlayContext::new(&database, &options);
//! let mut anchor = OverlayAnchor::new(Some(event.id));
//!
//! // Every frame, after the sprite has moved
//! anchor.update(&mut layer, &sprite_bounds, &ctx);
//! ```

pub mod anchor;
pub mod surface;
pub mod window;

pub use anchor::{overlay_position, AnchorState, OverlayAnchor, OverlayContext};
pub use surface::{OverlayHost, Size, SpriteBounds, TextSurface};
pub use window::{measure_text, TroopInfoWindow};
