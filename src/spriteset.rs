// Character sprites and the spriteset that owns them
//
// A CharacterSprite is the host-side adapter for one map event: it knows
// where the event is drawn and owns that event's OverlayAnchor. The sprite
// delegates its per-frame overlay work to the anchor instead of the anchor
// hooking into the sprite.

use crate::data::{Database, EventId};
use crate::overlay::{OverlayAnchor, OverlayContext, OverlayHost, SpriteBounds, TextSurface};
use log::debug;

/// Default size of a character frame in pixels
pub const CHARACTER_SIZE: u32 = 48;

/// One event's sprite plus its overlay
pub struct CharacterSprite<S> {
    pub event_id: EventId,
    pub bounds: SpriteBounds,
    anchor: OverlayAnchor<S>,
}

impl<S: TextSurface> CharacterSprite<S> {
    pub fn new(event_id: EventId, bounds: SpriteBounds) -> Self {
        CharacterSprite {
            event_id,
            bounds,
            anchor: OverlayAnchor::new(Some(event_id)),
        }
    }

    /// Places the sprite on a tile: centered horizontally, standing on the
    /// tile's bottom edge
    pub fn on_tile(event_id: EventId, tile_x: i32, tile_y: i32, tile_size: u32) -> Self {
        let tile = tile_size as i32;
        let bounds = SpriteBounds::new(
            tile_x * tile + tile / 2,
            (tile_y + 1) * tile,
            CHARACTER_SIZE,
            CHARACTER_SIZE,
        );
        Self::new(event_id, bounds)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    /// Per-frame update; the overlay follows wherever the sprite is now
    pub fn update<H>(&mut self, host: &mut H, ctx: &OverlayContext)
    where
        H: OverlayHost<Surface = S>,
    {
        self.anchor.update(host, &self.bounds, ctx);
    }

    pub fn anchor(&self) -> &OverlayAnchor<S> {
        &self.anchor
    }

    pub fn anchor_mut(&mut self) -> &mut OverlayAnchor<S> {
        &mut self.anchor
    }
}

/// All character sprites of the current map
pub struct Spriteset<S> {
    sprites: Vec<CharacterSprite<S>>,
}

impl<S: TextSurface> Spriteset<S> {
    pub fn new() -> Self {
        Spriteset {
            sprites: Vec::new(),
        }
    }

    /// One sprite per map event, in event id order
    pub fn from_events(db: &Database, tile_size: u32) -> Self {
        let mut spriteset = Self::new();
        for event in db.events() {
            spriteset.add(CharacterSprite::on_tile(event.id, event.x, event.y, tile_size));
        }
        spriteset
    }

    /// Adds a sprite, replacing (and tearing down) any sprite for the same event
    pub fn add(&mut self, sprite: CharacterSprite<S>) {
        self.remove(sprite.event_id);
        self.sprites.push(sprite);
    }

    /// Removes an event's sprite, tearing its overlay down first
    ///
    /// Returns the released overlay surface, if the overlay had one.
    pub fn remove(&mut self, event_id: EventId) -> Option<S> {
        let index = self.sprites.iter().position(|s| s.event_id == event_id)?;
        let mut sprite = self.sprites.remove(index);
        debug!("Removing sprite for event {}", event_id);
        sprite.anchor.teardown()
    }

    pub fn update_all<H>(&mut self, host: &mut H, ctx: &OverlayContext)
    where
        H: OverlayHost<Surface = S>,
    {
        for sprite in self.sprites.iter_mut() {
            sprite.update(host, ctx);
        }
    }

    /// Re-resolves every overlay's text. Returns how many were redrawn.
    pub fn refresh_overlays(&mut self, ctx: &OverlayContext) -> usize {
        let mut redrawn = 0;
        for sprite in self.sprites.iter_mut() {
            if sprite.anchor.refresh(ctx) {
                redrawn += 1;
            }
        }
        redrawn
    }

    pub fn get(&self, event_id: EventId) -> Option<&CharacterSprite<S>> {
        self.sprites.iter().find(|s| s.event_id == event_id)
    }

    pub fn get_mut(&mut self, event_id: EventId) -> Option<&mut CharacterSprite<S>> {
        self.sprites.iter_mut().find(|s| s.event_id == event_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterSprite<S>> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CharacterSprite<S>> {
        self.sprites.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl<S: TextSurface> Default for Spriteset<S> {
    fn default() -> Self {
        Self::new()
    }
}
