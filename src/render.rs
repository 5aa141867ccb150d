//! SDL2 backend for troop overlays
//!
//! [`CanvasLabel`] keeps what the overlay asked for (size, position, text
//! lines) and paints it onto the canvas during the render pass.
//! [`SdlOverlayLayer`] hands out labels once the map layer exists.
//!
//! # Example
//!
//! ```ignore
//! let mut layer = SdlOverlayLayer::new(LabelStyle::default());
//! layer.set_ready(true); // map layer is up
//! let ctx = OverlayContext::new(&database, &options);
//!
//! spriteset.update_all(&mut layer, &ctx);
//! for sprite in spriteset.iter() {
//!     if let Some(window) = sprite.anchor().window() {
//!         window.surface().render(&mut canvas)?;
//!     }
//! }
//! ```

use crate::config::OverlayStyle;
use crate::overlay::{OverlayHost, Size, TextSurface};
use crate::text::{draw_simple_text, text_width, GLYPH_HEIGHT};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Colors and font scale of overlay labels
#[derive(Debug, Clone)]
pub struct LabelStyle {
    /// Window metrics, shared with the overlay sizing
    pub metrics: OverlayStyle,

    /// Bitmap font scale (2 = 10x14 pixel glyphs)
    pub font_scale: u32,

    pub background_color: Color,
    pub border_color: Color,
    pub text_color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle {
            metrics: OverlayStyle {
                line_height: 18,
                text_padding: 4,
                standard_padding: 6,
            },
            font_scale: 2,
            background_color: Color::RGBA(10, 10, 30, 190),
            border_color: Color::RGB(200, 200, 220),
            text_color: Color::RGB(255, 255, 255),
        }
    }
}

/// A label surface painted with the bitmap font
pub struct CanvasLabel {
    style: LabelStyle,
    size: Size,
    position: (i32, i32),
    visible: bool,
    lines: Vec<(String, i32, i32)>,
}

impl CanvasLabel {
    pub fn new(style: LabelStyle) -> Self {
        CanvasLabel {
            style,
            size: Size::default(),
            position: (0, 0),
            visible: false,
            lines: Vec::new(),
        }
    }

    /// Paints the label. Hidden labels draw nothing.
    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        if !self.visible || self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        let (x, y) = self.position;
        let frame = Rect::new(x, y, self.size.width, self.size.height);

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(frame)?;
        canvas.set_blend_mode(BlendMode::None);

        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(frame)?;

        // Glyphs sit vertically centered in their line
        let padding = self.style.metrics.standard_padding as i32;
        let glyph_height = (GLYPH_HEIGHT * self.style.font_scale) as i32;
        let baseline = (self.style.metrics.line_height as i32 - glyph_height) / 2;

        for (text, line_x, line_y) in &self.lines {
            draw_simple_text(
                canvas,
                text,
                x + padding + line_x,
                y + padding + line_y + baseline,
                self.style.text_color,
                self.style.font_scale,
            )?;
        }

        Ok(())
    }
}

impl TextSurface for CanvasLabel {
    fn style(&self) -> OverlayStyle {
        self.style.metrics
    }

    fn measure_line(&self, line: &str) -> u32 {
        text_width(line, self.style.font_scale)
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.lines.clear();
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.lines.push((text.to_string(), x, y));
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// The map scene's overlay layer
pub struct SdlOverlayLayer {
    style: LabelStyle,
    ready: bool,
}

impl SdlOverlayLayer {
    pub fn new(style: LabelStyle) -> Self {
        SdlOverlayLayer { style, ready: false }
    }

    /// Overlays attach only once the layer is ready
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }
}

impl OverlayHost for SdlOverlayLayer {
    type Surface = CanvasLabel;

    fn create_surface(&mut self) -> Option<CanvasLabel> {
        self.ready.then(|| CanvasLabel::new(self.style.clone()))
    }
}
