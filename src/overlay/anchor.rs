//! Overlay anchor: one troop overlay attached to one character sprite
//!
//! # States
//!
//! ```text
//! Detached --(overlay layer available)--> BoundHidden   (no usable encounter)
//!                                    \--> BoundVisible  (encounter resolved)
//! ```
//!
//! The event's encounter tag is read once, on the transition out of
//! `Detached`. Later edits to the tag are not picked up until the sprite
//! (and its anchor) is recreated. `refresh` re-resolves the text from the
//! same encounter reference.
//!
//! The anchor refers to its event by id only; it does not own or borrow the
//! character. The host sprite owns the anchor and calls `teardown` when the
//! sprite goes away.

use super::surface::{OverlayHost, Size, SpriteBounds, TextSurface};
use super::window::TroopInfoWindow;
use crate::config::DisplayOptions;
use crate::data::{Database, EncounterReference, EventId};
use crate::summary;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorState {
    /// No overlay surface yet
    Detached,

    /// Surface exists, nothing to show
    BoundHidden,

    /// Surface exists, shown above the sprite
    BoundVisible,
}

/// Read-only inputs shared by every anchor during a tick
#[derive(Debug, Clone, Copy)]
pub struct OverlayContext<'a> {
    pub database: &'a Database,
    pub options: &'a DisplayOptions,
}

impl<'a> OverlayContext<'a> {
    pub fn new(database: &'a Database, options: &'a DisplayOptions) -> Self {
        OverlayContext { database, options }
    }
}

/// Top-left corner for an overlay of `size` above `sprite`
///
/// Horizontally centered, bottom edge on the sprite's top edge. Not clamped
/// to the screen.
pub fn overlay_position(sprite: &SpriteBounds, size: Size) -> (i32, i32) {
    let x = sprite.x - (size.width / 2) as i32;
    let y = sprite.y - sprite.height as i32 - size.height as i32;
    (x, y)
}

pub struct OverlayAnchor<S> {
    event_id: Option<EventId>,
    encounter: Option<EncounterReference>,
    window: Option<TroopInfoWindow<S>>,
    state: AnchorState,
    warned: bool,
}

impl<S: TextSurface> OverlayAnchor<S> {
    /// `event_id` is `None` for characters that are not map events
    pub fn new(event_id: Option<EventId>) -> Self {
        OverlayAnchor {
            event_id,
            encounter: None,
            window: None,
            state: AnchorState::Detached,
            warned: false,
        }
    }

    /// Per-tick update: attach if needed, then follow the sprite
    pub fn update<H>(&mut self, host: &mut H, sprite: &SpriteBounds, ctx: &OverlayContext)
    where
        H: OverlayHost<Surface = S>,
    {
        if self.state == AnchorState::Detached && !self.attach(host, ctx) {
            return;
        }

        // TODO: hover-only display for always_displayed == false once the
        // host reports the pointer position; the flag is ignored until then.
        if self.state == AnchorState::BoundVisible {
            self.follow(sprite);
        }
    }

    fn attach<H>(&mut self, host: &mut H, ctx: &OverlayContext) -> bool
    where
        H: OverlayHost<Surface = S>,
    {
        let Some(surface) = host.create_surface() else {
            return false;
        };

        self.window = Some(TroopInfoWindow::new(surface));
        self.state = AnchorState::BoundHidden;
        self.encounter = self.read_encounter(ctx.database);

        debug!("Overlay attached for event {:?}", self.event_id);

        if self.encounter.is_some() {
            self.refresh(ctx);
        }
        true
    }

    fn read_encounter(&mut self, db: &Database) -> Option<EncounterReference> {
        let event = db.event(self.event_id?)?;
        match EncounterReference::from_meta(&event.meta)? {
            Ok(reference) => Some(reference),
            Err(err) => {
                self.warn_once(format_args!("event {} ({}): {}", event.id, event.name, err));
                None
            }
        }
    }

    /// Re-resolves the summary text
    ///
    /// Returns `true` only if the overlay had to be redrawn. Does nothing
    /// while detached or without an encounter.
    pub fn refresh(&mut self, ctx: &OverlayContext) -> bool {
        let (Some(window), Some(encounter)) = (self.window.as_mut(), self.encounter.as_ref()) else {
            return false;
        };

        match summary::resolve(encounter, ctx.database, ctx.options) {
            Ok(text) => {
                let redrawn = window.set_text(text);
                if self.state != AnchorState::BoundVisible {
                    window.set_visible(true);
                    self.state = AnchorState::BoundVisible;
                    debug!("Overlay for event {:?} now visible", self.event_id);
                }
                redrawn
            }
            Err(err) => {
                window.set_text("");
                window.set_visible(false);
                self.state = AnchorState::BoundHidden;
                let event_id = self.event_id;
                self.warn_once(format_args!("event {:?}: {}", event_id, err));
                false
            }
        }
    }

    fn follow(&mut self, sprite: &SpriteBounds) {
        if let Some(window) = self.window.as_mut() {
            let (x, y) = overlay_position(sprite, window.size());
            window.set_position(x, y);
        }
    }

    fn warn_once(&mut self, message: std::fmt::Arguments) {
        if !self.warned {
            warn!("Troop overlay hidden: {}", message);
            self.warned = true;
        }
    }

    /// Host hook for sprite removal: hides and drops the overlay
    ///
    /// Returns the released surface, if there was one.
    pub fn teardown(&mut self) -> Option<S> {
        let window = self.window.take()?;
        self.state = AnchorState::Detached;
        self.encounter = None;
        debug!("Overlay for event {:?} torn down", self.event_id);
        Some(window.into_surface())
    }

    pub fn state(&self) -> AnchorState {
        self.state
    }

    pub fn event_id(&self) -> Option<EventId> {
        self.event_id
    }

    pub fn encounter(&self) -> Option<&EncounterReference> {
        self.encounter.as_ref()
    }

    pub fn window(&self) -> Option<&TroopInfoWindow<S>> {
        self.window.as_ref()
    }

    /// Current overlay text; empty when nothing is bound
    pub fn cached_text(&self) -> &str {
        self.window.as_ref().map_or("", |window| window.text())
    }

    pub fn measured_size(&self) -> Option<Size> {
        self.window.as_ref().map(TroopInfoWindow::size)
    }

    pub fn is_visible(&self) -> bool {
        self.window.as_ref().is_some_and(TroopInfoWindow::is_visible)
    }
}
